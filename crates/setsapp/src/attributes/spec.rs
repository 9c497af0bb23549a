//! Attribute kinds and the intrinsic attribute registry.
//!
//! A kind is the declared type of an attribute. It decides how raw
//! frontmatter values (and clause values compared against them) are coerced
//! before any operator sees them.

use super::key::IntrinsicAttributeKey;
use super::value::{parse_bool, parse_date, parse_number, AttrValue};
use crate::error::{Result, SetsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Undeclared; values are used as stored.
    #[default]
    Any,

    Text,

    Number,

    /// Timestamp. Text values are parsed as RFC 3339 or `YYYY-MM-DD`.
    Date,

    Bool,

    /// List of values (tags, links, aliases).
    List,
}

impl AttributeKind {
    /// Coerce a raw value into this kind.
    ///
    /// Coercion never fails: a value that doesn't fit the kind is returned
    /// unchanged, and the comparison rules then treat it as incomparable.
    pub fn coerce(self, value: AttrValue) -> AttrValue {
        match (self, value) {
            (_, AttrValue::Null) => AttrValue::Null,
            (AttributeKind::Any, v) => v,
            (AttributeKind::Text, v @ (AttrValue::Text(_) | AttrValue::List(_))) => v,
            (AttributeKind::Text, v) => v.stringify().map(AttrValue::Text).unwrap_or(v),
            (AttributeKind::Number, AttrValue::Text(s)) => match parse_number(&s) {
                Some(n) => AttrValue::Number(n),
                None => AttrValue::Text(s),
            },
            (AttributeKind::Date, AttrValue::Text(s)) => match parse_date(&s) {
                Some(d) => AttrValue::Date(d),
                None => AttrValue::Text(s),
            },
            (AttributeKind::Bool, AttrValue::Text(s)) => match parse_bool(&s) {
                Some(b) => AttrValue::Bool(b),
                None => AttrValue::Text(s),
            },
            (AttributeKind::List, v @ AttrValue::List(_)) => v,
            (AttributeKind::List, v) => AttrValue::List(vec![v]),
            (_, v) => v,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Any => "any",
            AttributeKind::Text => "text",
            AttributeKind::Number => "number",
            AttributeKind::Date => "date",
            AttributeKind::Bool => "bool",
            AttributeKind::List => "list",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKind {
    type Err = SetsError;

    /// Accepts the kind names plus the property type names vaults commonly
    /// use (`checkbox`, `multitext`, `tags`, `datetime`).
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "*" => Ok(AttributeKind::Any),
            "text" | "string" => Ok(AttributeKind::Text),
            "number" => Ok(AttributeKind::Number),
            "date" | "datetime" => Ok(AttributeKind::Date),
            "bool" | "checkbox" => Ok(AttributeKind::Bool),
            "list" | "multitext" | "tags" | "aliases" => Ok(AttributeKind::List),
            other => Err(SetsError::Config(format!("unknown attribute kind '{}'", other))),
        }
    }
}

/// Specification for an intrinsic (computed) attribute.
#[derive(Debug, Clone)]
pub struct IntrinsicSpec {
    pub key: IntrinsicAttributeKey,
    pub kind: AttributeKind,
    pub display_name: &'static str,
}

impl IntrinsicSpec {
    const fn new(
        key: IntrinsicAttributeKey,
        kind: AttributeKind,
        display_name: &'static str,
    ) -> Self {
        Self {
            key,
            kind,
            display_name,
        }
    }
}

/// Registry of all intrinsic attributes.
///
/// Adding an intrinsic attribute means adding a key variant and an entry here.
pub const INTRINSIC_ATTRIBUTES: &[IntrinsicSpec] = &[
    IntrinsicSpec::new(IntrinsicAttributeKey::FileName, AttributeKind::Text, "Name"),
    IntrinsicSpec::new(
        IntrinsicAttributeKey::FileCreationDate,
        AttributeKind::Date,
        "Created",
    ),
    IntrinsicSpec::new(
        IntrinsicAttributeKey::FileModificationDate,
        AttributeKind::Date,
        "Modified",
    ),
    IntrinsicSpec::new(IntrinsicAttributeKey::FilePath, AttributeKind::Text, "Path"),
];

/// Look up the spec of an intrinsic attribute.
pub fn intrinsic_spec(key: IntrinsicAttributeKey) -> &'static IntrinsicSpec {
    INTRINSIC_ATTRIBUTES
        .iter()
        .find(|spec| spec.key == key)
        .unwrap_or(&INTRINSIC_ATTRIBUTES[0])
}
