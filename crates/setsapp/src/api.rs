//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients.
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: string clauses (`key:op[:value]`) and sort fields
//!   (`key[:asc|desc]`) are parsed here, and context documents are looked up
//!   by path
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business logic belongs in `commands/*.rs`; presentation belongs to the client.
//!
//! ## Generic Over VaultDb
//!
//! `SetsApi<S: VaultDb>` is generic over the vault, so the same facade serves
//! the in-memory snapshot vault used by the CLI and any embedding
//! application's own store.

use crate::commands;
use crate::config::SetsConfig;
use crate::error::Result;
use crate::query::{Clause, Clauses, Query, SortField};
use crate::store::VaultDb;

/// The main API facade for sets operations.
pub struct SetsApi<S: VaultDb> {
    store: S,
    config: SetsConfig,
}

impl<S: VaultDb> SetsApi<S> {
    pub fn new(store: S, config: SetsConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn config(&self) -> &SetsConfig {
        &self.config
    }

    /// Compile string clauses and sort fields, binding the document at
    /// `context` (a vault path) as the query's context.
    pub fn compile<C: AsRef<str>, F: AsRef<str>>(
        &self,
        clauses: &[C],
        sort: &[F],
        context: Option<&str>,
    ) -> Result<Query<'_>> {
        let clauses = parse_clauses(clauses)?;
        let sort = parse_sort_fields(sort)?;
        let context = context.map(|path| self.store.document(path)).transpose()?;
        Query::compile(&self.store, clauses, &sort, context, &self.config)
    }

    pub fn select<C: AsRef<str>, F: AsRef<str>>(
        &self,
        clauses: &[C],
        sort: &[F],
        context: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let query = self.compile(clauses, sort, context)?;
        commands::select::run(&self.store, &query)
    }

    pub fn types(&self) -> Result<commands::CmdResult> {
        commands::types::run(&self.store, &self.config)
    }

    pub fn collections(&self) -> Result<commands::CmdResult> {
        commands::collections::list(&self.store, &self.config)
    }

    pub fn members(&self, collection_path: &str) -> Result<commands::CmdResult> {
        commands::collections::members(&self.store, &self.config, collection_path)
    }

    pub fn available_collections(&self, doc_path: &str) -> Result<commands::CmdResult> {
        commands::collections::available(&self.store, &self.config, doc_path)
    }

    pub fn add_to_collection(
        &mut self,
        doc_path: &str,
        collection_path: &str,
    ) -> Result<commands::CmdResult> {
        commands::collections::add(&mut self.store, &self.config, doc_path, collection_path)
    }

    pub fn new_instance(&mut self, type_name: &str, name: &str) -> Result<commands::CmdResult> {
        commands::create::new_instance(&mut self.store, &self.config, type_name, name)
    }

    /// Create a document satisfying string clauses, e.g. the clauses of the
    /// view the user is looking at.
    pub fn new_document<C: AsRef<str>>(
        &mut self,
        clauses: &[C],
        context: Option<&str>,
        name: &str,
    ) -> Result<commands::CmdResult> {
        let clauses = parse_clauses(clauses)?;
        self.create(clauses, context, name)
    }

    pub fn create(
        &mut self,
        clauses: impl Into<Clauses>,
        context: Option<&str>,
        name: &str,
    ) -> Result<commands::CmdResult> {
        commands::create::new_document(&mut self.store, &self.config, clauses, context, name)
    }
}

/// Parse `key:op[:value]` expressions.
pub fn parse_clauses<C: AsRef<str>>(exprs: &[C]) -> Result<Vec<Clause>> {
    exprs.iter().map(|e| e.as_ref().parse()).collect()
}

/// Parse `key[:asc|desc]` expressions.
pub fn parse_sort_fields<F: AsRef<str>>(exprs: &[F]) -> Result<Vec<SortField>> {
    exprs.iter().map(|e| e.as_ref().parse()).collect()
}
