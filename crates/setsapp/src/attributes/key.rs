//! Attribute keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Computed attributes every document has, regardless of its frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrinsicAttributeKey {
    FileName,
    FileCreationDate,
    FileModificationDate,
    FilePath,
}

impl IntrinsicAttributeKey {
    pub const ALL: &'static [IntrinsicAttributeKey] = &[
        IntrinsicAttributeKey::FileName,
        IntrinsicAttributeKey::FileCreationDate,
        IntrinsicAttributeKey::FileModificationDate,
        IntrinsicAttributeKey::FilePath,
    ];

    /// The reserved name used in clauses.
    pub fn as_str(self) -> &'static str {
        match self {
            IntrinsicAttributeKey::FileName => "__bname",
            IntrinsicAttributeKey::FileCreationDate => "__ctime",
            IntrinsicAttributeKey::FileModificationDate => "__mtime",
            IntrinsicAttributeKey::FilePath => "__path",
        }
    }

    /// Exact match against the reserved names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

/// Key naming an attribute: either intrinsic or a frontmatter field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Intrinsic(IntrinsicAttributeKey),
    Extrinsic(String),
}

impl AttributeKey {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match IntrinsicAttributeKey::parse(&name) {
            Some(key) => AttributeKey::Intrinsic(key),
            None => AttributeKey::Extrinsic(name),
        }
    }

    pub fn is_intrinsic(&self) -> bool {
        matches!(self, AttributeKey::Intrinsic(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttributeKey::Intrinsic(key) => key.as_str(),
            AttributeKey::Extrinsic(name) => name,
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AttributeKey {
    fn from(name: &str) -> Self {
        AttributeKey::new(name)
    }
}

impl From<String> for AttributeKey {
    fn from(name: String) -> Self {
        AttributeKey::new(name)
    }
}

impl From<IntrinsicAttributeKey> for AttributeKey {
    fn from(key: IntrinsicAttributeKey) -> Self {
        AttributeKey::Intrinsic(key)
    }
}

impl Serialize for AttributeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttributeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(AttributeKey::new(name))
    }
}
