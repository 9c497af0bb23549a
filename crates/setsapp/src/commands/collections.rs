//! Collections.
//!
//! A collection is a document whose type attribute equals
//! `collection_type`. A document belongs to a collection when its collection
//! attribute holds a link to it:
//!
//! ```yaml
//! # books/Dune.md
//! type: book
//! collection: ["[[Reading List]]"]
//! ```
//!
//! Membership is expressed with the same queries clients use: members are
//! `collection hasall @link-to-this` with the collection as context, and
//! adding a document enforces `collection hasthis`.

use crate::commands::select::matching;
use crate::commands::{plural, CmdMessage, CmdResult, DisplayDoc};
use crate::config::SetsConfig;
use crate::error::Result;
use crate::model::Document;
use crate::query::{Clause, Operator, Query};
use crate::store::VaultDb;
use tracing::info;

fn collection_query<'a, S: VaultDb>(store: &'a S, config: &SetsConfig) -> Result<Query<'a>> {
    Query::compile(
        store,
        Clause::eq(config.type_attribute.as_str(), config.collection_type.as_str()),
        &[],
        None,
        config,
    )
}

fn collection_docs<S: VaultDb>(store: &S, config: &SetsConfig) -> Result<Vec<Document>> {
    matching(store, &collection_query(store, config)?)
}

fn is_collection<S: VaultDb>(store: &S, config: &SetsConfig, doc: &Document) -> Result<bool> {
    collection_query(store, config)?.matches(Some(doc))
}

fn not_a_collection(doc: &Document, config: &SetsConfig) -> CmdMessage {
    CmdMessage::warning(format!(
        "{} is not a {} ({} is not '{}')",
        doc.name(),
        config.collection_type,
        config.type_attribute,
        config.collection_type
    ))
}

/// Query matching documents that link to the collection bound as context.
fn membership<'a, S: VaultDb>(
    store: &'a S,
    config: &SetsConfig,
    op: Operator,
    collection: Document,
) -> Result<Query<'a>> {
    Query::compile(
        store,
        Clause::link_to_this(config.collection_attribute.as_str(), op),
        &[],
        Some(collection),
        config,
    )
}

/// Every collection in the vault.
pub fn list<S: VaultDb>(store: &S, config: &SetsConfig) -> Result<CmdResult> {
    let docs = collection_docs(store, config)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(plural(docs.len(), "collection")));
    let listed = docs
        .into_iter()
        .map(|doc| DisplayDoc::new(store, doc))
        .collect();
    Ok(result.with_listed_docs(listed))
}

/// Documents that belong to the collection at `collection_path`.
pub fn members<S: VaultDb>(
    store: &S,
    config: &SetsConfig,
    collection_path: &str,
) -> Result<CmdResult> {
    let collection = store.document(collection_path)?;
    let mut result = CmdResult::default();
    if !is_collection(store, config, &collection)? {
        result.add_message(not_a_collection(&collection, config));
    }
    let query = membership(store, config, Operator::HasAll, collection)?;
    let docs = matching(store, &query)?;

    result.add_message(CmdMessage::info(format!(
        "{} in {}",
        plural(docs.len(), "member"),
        query.infer_collection().unwrap_or_default()
    )));
    let listed = docs
        .into_iter()
        .map(|doc| DisplayDoc::new(store, doc))
        .collect();
    Ok(result.with_listed_docs(listed))
}

/// Collections the document at `doc_path` could be added to: every
/// collection it doesn't already belong to, other than itself.
pub fn available<S: VaultDb>(
    store: &S,
    config: &SetsConfig,
    doc_path: &str,
) -> Result<CmdResult> {
    let doc = store.document(doc_path)?;
    let mut listed = Vec::new();
    for collection in collection_docs(store, config)? {
        if collection.path == doc.path {
            continue;
        }
        let query = membership(store, config, Operator::HasThis, collection.clone())?;
        if !query.matches(Some(&doc))? {
            listed.push(DisplayDoc::new(store, collection));
        }
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} available for {}",
        plural(listed.len(), "collection"),
        doc.name()
    )));
    Ok(result.with_listed_docs(listed))
}

/// Add the document at `doc_path` to the collection at `collection_path`.
/// Adding a document that is already a member changes nothing.
pub fn add<S: VaultDb>(
    store: &mut S,
    config: &SetsConfig,
    doc_path: &str,
    collection_path: &str,
) -> Result<CmdResult> {
    let doc = store.document(doc_path)?;
    let collection = store.document(collection_path)?;
    let collection_name = collection.name().to_string();

    let mut result = CmdResult::default();
    if !is_collection(&*store, config, &collection)? {
        result.add_message(not_a_collection(&collection, config));
    }

    let (already_member, frontmatter) = {
        let query = membership(&*store, config, Operator::HasThis, collection)?;
        (query.matches(Some(&doc))?, query.enforce_document(&doc)?)
    };

    if already_member {
        result.add_message(CmdMessage::info(format!(
            "{} is already in {}",
            doc.name(),
            collection_name
        )));
        return Ok(result.with_affected_docs(vec![DisplayDoc::new(&*store, doc)]));
    }

    let updated = store.set_frontmatter(doc_path, frontmatter)?;
    info!(doc = %doc_path, collection = %collection_path, "added to collection");
    result.add_message(CmdMessage::success(format!(
        "Added {} to {}",
        updated.name(),
        collection_name
    )));
    Ok(result.with_affected_docs(vec![DisplayDoc::new(&*store, updated)]))
}
