//! # Command Layer
//!
//! The operations a sets client performs, as pure functions over a
//! [`VaultDb`](crate::store::VaultDb). Each command compiles the queries it
//! needs, runs them, and returns a structured [`CmdResult`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, no file formatting. Persisting the vault is the
//!   caller's job.
//! - **Argument parsing**: string clauses are parsed by the API facade.
//!
//! ## Command Modules
//!
//! - [`select`]: documents matching a query, sorted
//! - [`types`]: distinct document types
//! - [`collections`]: list collections, their members, and add documents to them
//! - [`create`]: new documents that satisfy a query

use crate::model::Document;
use crate::store::VaultDb;
use serde::Serialize;

pub mod collections;
pub mod create;
pub mod select;
pub mod types;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A document paired with the link other documents use to reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayDoc {
    pub link: String,
    #[serde(flatten)]
    pub doc: Document,
}

impl DisplayDoc {
    pub fn new<S: VaultDb + ?Sized>(store: &S, doc: Document) -> Self {
        Self {
            link: store.generate_link(&doc),
            doc,
        }
    }

    pub fn name(&self) -> &str {
        self.doc.name()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Documents created or modified by the command.
    pub affected_docs: Vec<DisplayDoc>,
    /// Documents to display.
    pub listed_docs: Vec<DisplayDoc>,
    /// Plain values to display, e.g. type names.
    pub values: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_docs(mut self, docs: Vec<DisplayDoc>) -> Self {
        self.affected_docs = docs;
        self
    }

    pub fn with_listed_docs(mut self, docs: Vec<DisplayDoc>) -> Self {
        self.listed_docs = docs;
        self
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    /// Names of the listed documents, in order.
    pub fn listed_names(&self) -> Vec<&str> {
        self.listed_docs.iter().map(DisplayDoc::name).collect()
    }
}

pub(crate) fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}
