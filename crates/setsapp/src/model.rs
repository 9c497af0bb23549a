//! # Domain Model: Documents
//!
//! A [`Document`] is a file in the vault: a path, two timestamps and an
//! optional frontmatter block of named values.
//!
//! ## Frontmatter Presence
//!
//! `frontmatter: None` means the file has no structured block at all, which
//! is different from an empty block (`Some` of an empty map). Queries rely on
//! the distinction: a query that reads any frontmatter attribute rejects
//! documents without a block before evaluating a single clause.
//!
//! ## Names
//!
//! The document name is the file stem of its path: `notes/Dune.md` is named
//! `Dune`. New documents get the `.md` extension.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::attributes::AttrValue;

/// A document's structured data, keyed by attribute name.
pub type Frontmatter = BTreeMap<String, AttrValue>;

pub const DOCUMENT_EXT: &str = ".md";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    #[serde(default = "Utc::now")]
    pub ctime: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub mtime: DateTime<Utc>,
    #[serde(default)]
    pub frontmatter: Option<Frontmatter>,
}

impl Document {
    pub fn new(path: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            path: path.into(),
            ctime: now,
            mtime: now,
            frontmatter: None,
        }
    }

    pub fn with_frontmatter(mut self, frontmatter: Frontmatter) -> Self {
        self.frontmatter = Some(frontmatter);
        self
    }

    /// Builder helper: set a single frontmatter field, creating the block.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.frontmatter
            .get_or_insert_with(Frontmatter::new)
            .insert(name.into(), value.into());
        self
    }

    /// File stem: the last path segment without its extension.
    pub fn name(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        }
    }

    /// The path without a trailing `.md`.
    pub fn path_stem(&self) -> &str {
        self.path.strip_suffix(DOCUMENT_EXT).unwrap_or(&self.path)
    }

    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }

    /// Raw frontmatter value, or `None` when absent.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.frontmatter.as_ref().and_then(|fm| fm.get(name))
    }
}

/// Path for a new document called `name` in the vault root.
pub fn path_for_name(name: &str) -> String {
    format!("{}{}", name.trim(), DOCUMENT_EXT)
}
