//! # Sets Architecture
//!
//! Sets is a **UI-agnostic query engine** over a vault of documents with
//! frontmatter. It selects documents by attribute clauses, sorts them, and
//! creates or edits documents so that they satisfy a query.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the `sets` CLI, an editor plugin, ...)             │
//! │  - Parses arguments, renders output, persists the vault     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses `key:op:value` clauses and sort fields            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - select, types, collections, create                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Query Engine (query/)                                      │
//! │  - Operators, dynamic values, compiled queries              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract VaultDb trait                                   │
//! │  - InMemoryVault (JSON snapshots, tests)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Attributes
//!
//! Clauses name attributes by key. Keys starting with `__` are intrinsic
//! (computed from the file: name, path, timestamps); every other key reads
//! the document's frontmatter. See [`attributes`].
//!
//! ## No I/O in Core
//!
//! Nothing here writes to stdout or stderr. Diagnostics go through `tracing`;
//! installing a subscriber is the client's job.

pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
