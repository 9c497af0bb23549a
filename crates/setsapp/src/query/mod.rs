//! # Query Engine
//!
//! A query is a conjunction of clauses, each an `(attribute, operator, value)`
//! triple, plus an optional list of sort fields.
//!
//! ```text
//! clauses ──compile──▶ Query ──matches(doc)──▶ bool
//!                        │
//!                        ├──enforce(frontmatter)──▶ frontmatter that matches
//!                        └──sort(docs)
//! ```
//!
//! - [`operator`]: the closed set of operators with their match, enforce and
//!   selectivity behavior.
//! - [`dynamic`]: clause values resolved at evaluation time (`@link-to-this`).
//! - [`clause`]: clauses, sort fields and their string forms.
//! - [`compiled`]: the compiled, immutable [`Query`].
//!
//! ## Example
//!
//! ```
//! use setsapp::config::SetsConfig;
//! use setsapp::model::Document;
//! use setsapp::query::{Clause, Query};
//! use setsapp::store::memory::InMemoryVault;
//!
//! let vault = InMemoryVault::from_documents([
//!     Document::new("Dune.md").with_attr("status", "done"),
//!     Document::new("Emma.md").with_attr("status", "todo"),
//! ]);
//! let query = Query::compile(
//!     &vault,
//!     Clause::eq("status", "done"),
//!     &[],
//!     None,
//!     &SetsConfig::default(),
//! )
//! .unwrap();
//!
//! let dune = Document::new("Dune.md").with_attr("status", "done");
//! assert!(query.matches(Some(&dune)).unwrap());
//! ```

pub mod clause;
pub mod compiled;
pub mod dynamic;
pub mod operator;

pub use clause::{Clause, Clauses, SortField};
pub use compiled::Query;
pub use dynamic::{ClauseValue, EvalContext, LINK_TO_THIS};
pub use operator::{CompatibleKinds, Operator};
