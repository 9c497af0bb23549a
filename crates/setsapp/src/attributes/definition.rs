//! Attribute definitions: how a key turns into a value for a document.

use super::key::{AttributeKey, IntrinsicAttributeKey};
use super::spec::{intrinsic_spec, AttributeKind};
use super::value::AttrValue;
use crate::model::Document;
use std::fmt;
use std::sync::Arc;

/// Resolves one attribute for any document.
///
/// Definitions are shared by compiled queries, which may be evaluated from
/// several threads, hence the `Send + Sync` bound.
pub trait AttributeDefinition: fmt::Debug + Send + Sync {
    fn key(&self) -> &AttributeKey;

    fn kind(&self) -> AttributeKind;

    fn display_name(&self) -> String;

    /// Value of this attribute on `doc`, coerced to the declared kind.
    /// Missing values are [`AttrValue::Null`].
    fn value(&self, doc: &Document) -> AttrValue;
}

pub type AttributeDef = Arc<dyn AttributeDefinition>;

/// A computed attribute: name, path, timestamps.
#[derive(Debug, Clone)]
pub struct IntrinsicAttribute {
    key: AttributeKey,
    intrinsic: IntrinsicAttributeKey,
}

impl IntrinsicAttribute {
    pub fn new(intrinsic: IntrinsicAttributeKey) -> Self {
        Self {
            key: AttributeKey::Intrinsic(intrinsic),
            intrinsic,
        }
    }
}

impl AttributeDefinition for IntrinsicAttribute {
    fn key(&self) -> &AttributeKey {
        &self.key
    }

    fn kind(&self) -> AttributeKind {
        intrinsic_spec(self.intrinsic).kind
    }

    fn display_name(&self) -> String {
        intrinsic_spec(self.intrinsic).display_name.to_string()
    }

    fn value(&self, doc: &Document) -> AttrValue {
        match self.intrinsic {
            IntrinsicAttributeKey::FileName => AttrValue::Text(doc.name().to_string()),
            IntrinsicAttributeKey::FileCreationDate => AttrValue::Date(doc.ctime),
            IntrinsicAttributeKey::FileModificationDate => AttrValue::Date(doc.mtime),
            IntrinsicAttributeKey::FilePath => AttrValue::Text(doc.path.clone()),
        }
    }
}

/// A stored attribute read from the document's frontmatter.
#[derive(Debug, Clone)]
pub struct FrontmatterAttribute {
    key: AttributeKey,
    kind: AttributeKind,
}

impl FrontmatterAttribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            key: AttributeKey::Extrinsic(name.into()),
            kind,
        }
    }
}

impl AttributeDefinition for FrontmatterAttribute {
    fn key(&self) -> &AttributeKey {
        &self.key
    }

    fn kind(&self) -> AttributeKind {
        self.kind
    }

    fn display_name(&self) -> String {
        self.key.as_str().to_string()
    }

    fn value(&self, doc: &Document) -> AttrValue {
        doc.get(self.key.as_str())
            .cloned()
            .map(|raw| self.kind.coerce(raw))
            .unwrap_or(AttrValue::Null)
    }
}
