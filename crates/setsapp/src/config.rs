//! # Configuration
//!
//! Sets configuration is managed by [`confique`], which handles layered loading
//! from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SETS_TYPE_ATTRIBUTE`, `SETS_COLLECTION_ATTRIBUTE`, etc.
//! 2. **Project Config**: `sets.toml` next to the vault.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `type_attribute` | `type` | Frontmatter field naming a document's type |
//! | `collection_attribute` | `collection` | Frontmatter field listing the collections a document belongs to |
//! | `collection_type` | `collection` | Type name that marks a document as a collection |
//! | `properties` | none | Declared kinds for frontmatter fields, e.g. `priority = "number"` |
//!
//! Queries never read configuration on their own: the value is passed to
//! [`crate::query::Query::compile`] explicitly.

use crate::attributes::AttributeKind;
use crate::error::{Result, SetsError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sets.toml";

/// Configuration for sets, stored in `sets.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetsConfig {
    /// Frontmatter field naming a document's type.
    #[config(default = "type", env = "SETS_TYPE_ATTRIBUTE")]
    pub type_attribute: String,

    /// Frontmatter field holding links to the collections a document is in.
    #[config(default = "collection", env = "SETS_COLLECTION_ATTRIBUTE")]
    pub collection_attribute: String,

    /// Type name of collection documents.
    #[config(default = "collection", env = "SETS_COLLECTION_TYPE")]
    pub collection_type: String,

    /// Declared kinds for frontmatter fields. Undeclared fields are `any`.
    pub properties: Option<BTreeMap<String, AttributeKind>>,
}

impl Default for SetsConfig {
    fn default() -> Self {
        Self {
            type_attribute: "type".to_string(),
            collection_attribute: "collection".to_string(),
            collection_type: "collection".to_string(),
            properties: None,
        }
    }
}

impl SetsConfig {
    /// Load configuration from the environment, the project file (when given)
    /// and the global config file, over compiled defaults.
    pub fn load(project_file: Option<&Path>) -> Result<Self> {
        let mut builder = SetsConfig::builder().env();
        if let Some(path) = project_file {
            builder = builder.file(path);
        }
        if let Some(path) = global_config_path() {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| SetsError::Config(e.to_string()))
    }

    /// Declared property kinds, empty when none are configured.
    pub fn properties(&self) -> BTreeMap<String, AttributeKind> {
        self.properties.clone().unwrap_or_default()
    }
}

/// `sets.toml` in the OS config directory, if one can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sets").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SetsConfig::default();
        assert_eq!(config.type_attribute, "type");
        assert_eq!(config.collection_attribute, "collection");
        assert_eq!(config.collection_type, "collection");
        assert!(config.properties().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config: SetsConfig = toml::from_str(
            r#"
            type_attribute = "kind"
            collection_attribute = "in"
            collection_type = "list"

            [properties]
            priority = "number"
            due = "date"
            "#,
        )
        .unwrap();
        assert_eq!(config.type_attribute, "kind");
        assert_eq!(config.collection_attribute, "in");
        assert_eq!(config.collection_type, "list");
        assert_eq!(
            config.properties().get("priority"),
            Some(&AttributeKind::Number)
        );
        assert_eq!(config.properties().get("due"), Some(&AttributeKind::Date));
    }

    #[test]
    fn test_load_from_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "type_attribute = \"category\"\n").unwrap();

        let config = SetsConfig::load(Some(&path)).unwrap();
        // Env vars may override in a developer shell; only assert when unset.
        if std::env::var("SETS_TYPE_ATTRIBUTE").is_err() {
            assert_eq!(config.type_attribute, "category");
        }
    }
}
