//! # Storage Layer
//!
//! Queries don't read files. They consume the vault through the [`VaultDb`]
//! trait, which answers three questions:
//!
//! 1. **What is attribute `k`?** [`VaultDb::attribute_definition`] resolves a key
//!    to an [`AttributeDefinition`](crate::attributes::AttributeDefinition),
//!    carrying the declared kind for extrinsic keys.
//! 2. **How is document `d` referenced?** [`VaultDb::generate_link`] returns the
//!    stable link token other documents store to point at `d`.
//! 3. **Which documents exist?** [`VaultDb::documents`] and [`VaultDb::document`].
//!
//! Writing is limited to what the command layer needs to materialize enforced
//! attributes: inserting a new document and replacing a frontmatter block.
//! Reading from and writing to disk is the embedding application's job.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryVault`]: Map-backed vault used by tests and the CLI,
//!   loadable from a JSON snapshot.

use crate::attributes::{AttributeDef, AttributeKey};
use crate::error::Result;
use crate::model::{Document, Frontmatter};

pub mod memory;

/// Abstract interface to a document vault.
///
/// `Send + Sync` so that a query borrowing the vault can be evaluated from
/// several threads at once.
pub trait VaultDb: Send + Sync {
    /// Resolve an attribute key. Fails with `UnresolvedAttribute` when the
    /// vault has no way to read the key.
    fn attribute_definition(&self, key: &AttributeKey) -> Result<AttributeDef>;

    /// Stable reference token for `doc`, e.g. `[[Dune]]`.
    fn generate_link(&self, doc: &Document) -> String;

    /// All documents, in path order.
    fn documents(&self) -> Vec<Document>;

    /// A document by path.
    fn document(&self, path: &str) -> Result<Document>;

    /// Add a new document. Fails with `AlreadyExists` if the path is taken.
    fn insert(&mut self, doc: Document) -> Result<()>;

    /// Replace a document's frontmatter block, returning the updated document.
    fn set_frontmatter(&mut self, path: &str, frontmatter: Frontmatter) -> Result<Document>;
}
