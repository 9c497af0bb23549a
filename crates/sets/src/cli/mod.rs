//! # CLI Behavior
//!
//! This is **one possible UI client** for sets, not the application itself.
//! It works on a vault snapshot: a JSON array of documents, each with a path,
//! timestamps and an optional frontmatter object.
//!
//! ```text
//! sets query type:eq:book status:neq:done -s priority:desc
//! sets members "Reading List.md"
//! sets add books/Dune.md "Reading List.md"
//! sets new Foundation --type book --in "Reading List.md"
//! ```
//!
//! Commands that change the vault (`add`, `new`) write the snapshot back.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and dispatch to the API
//! - `logging`: tracing subscriber setup
//! - `render`: text, JSON and YAML output
//! - `setup`: argument parsing via clap

mod commands;
mod logging;
mod render;
pub mod setup;

pub use commands::run;
