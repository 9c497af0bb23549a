//! Dynamic clause values.
//!
//! A clause value is either a concrete [`AttrValue`] or a sentinel resolved
//! when the query runs. The sentinel is an explicit variant: it is recognized
//! once, when a clause is built from a raw literal, and never by inspecting
//! values during evaluation.
//!
//! | Literal | Variant | Resolves to |
//! |---------|---------|-------------|
//! | `@link-to-this` | [`ClauseValue::LinkToThis`] | link to the query's context document |

use crate::attributes::{AttrValue, AttributeDefinition, AttributeKey};
use crate::error::{Result, SetsError};
use crate::model::Document;
use crate::store::VaultDb;
use std::fmt;

/// Reserved literal for "a link to the context document".
pub const LINK_TO_THIS: &str = "@link-to-this";

#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    Concrete(AttrValue),
    LinkToThis,
}

impl ClauseValue {
    /// Build a clause value from a raw literal, recognizing the sentinel.
    pub fn parse_literal(value: AttrValue) -> Self {
        match value.as_text() {
            Some(LINK_TO_THIS) => ClauseValue::LinkToThis,
            _ => ClauseValue::Concrete(value),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        !matches!(self, ClauseValue::Concrete(_))
    }

    /// The literal this value was written as.
    pub fn literal(&self) -> AttrValue {
        match self {
            ClauseValue::Concrete(value) => value.clone(),
            ClauseValue::LinkToThis => AttrValue::Text(LINK_TO_THIS.to_string()),
        }
    }

    /// Concrete value to hand to the operator.
    ///
    /// Concrete values are coerced to the attribute's kind so they compare
    /// under the same rules as the document's value.
    pub fn resolve(&self, attr: &dyn AttributeDefinition, cx: &EvalContext<'_>) -> Result<AttrValue> {
        match self {
            ClauseValue::Concrete(value) => Ok(attr.kind().coerce(value.clone())),
            ClauseValue::LinkToThis => cx.this_link(attr.key()).map(AttrValue::Text),
        }
    }
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseValue::Concrete(value) => write!(f, "{}", value),
            ClauseValue::LinkToThis => f.write_str(LINK_TO_THIS),
        }
    }
}

impl From<AttrValue> for ClauseValue {
    fn from(value: AttrValue) -> Self {
        ClauseValue::parse_literal(value)
    }
}

/// What a clause is evaluated against besides the document itself: the vault
/// (for links) and the optional context document.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub store: &'a dyn VaultDb,
    pub context: Option<&'a Document>,
    /// Link to `context`, when already generated.
    context_link: Option<&'a str>,
}

impl<'a> EvalContext<'a> {
    pub fn new(store: &'a dyn VaultDb, context: Option<&'a Document>) -> Self {
        Self {
            store,
            context,
            context_link: None,
        }
    }

    /// Reuse a link generated for the context document up front.
    pub fn with_context_link(mut self, link: &'a str) -> Self {
        self.context_link = Some(link);
        self
    }

    /// Link to the context document. `key` names the clause asking, for the
    /// error message.
    pub fn this_link(&self, key: &AttributeKey) -> Result<String> {
        match (self.context_link, self.context) {
            (Some(link), _) => Ok(link.to_string()),
            (None, Some(doc)) => Ok(self.store.generate_link(doc)),
            (None, None) => Err(SetsError::MissingContext(key.to_string())),
        }
    }
}
