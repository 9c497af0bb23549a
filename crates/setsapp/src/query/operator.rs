//! Operator registry.
//!
//! Each [`Operator`] variant bundles a match predicate, an optional enforce
//! function, the attribute kinds it is meant for, a selectivity weight and a
//! display label. Adding an operator means adding a variant: every `match`
//! below is exhaustive, so the compiler points at each capability to define.
//!
//! | op | selectivity | enforce |
//! |----|-------------|---------|
//! | `eq` | 0 | set to value |
//! | `contains` | 2 | - |
//! | `hasall`, `hasthis` | 5 | union / append link |
//! | `gt`, `lt` | 5 | - |
//! | `gte`, `lte` | 5 | set to value |
//! | `isempty` | 10 | set to null |
//! | `notempty` | 10 | - |
//! | `nocontains` | 12 | - |
//! | `neq` | max | - |
//!
//! Lower selectivity runs first: cheap, discriminating clauses reject
//! documents before expensive or permissive ones are evaluated.

use super::dynamic::EvalContext;
use crate::attributes::{AttrValue, AttributeDefinition, AttributeKind};
use crate::error::{Result, SetsError};
use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    IsEmpty,
    NotEmpty,
    Contains,
    NoContains,
    HasAll,
    HasThis,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Attribute kinds an operator is meant for.
///
/// Advisory only: UIs use it to offer sensible operators, and query
/// compilation logs a warning on a mismatch, but evaluation proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibleKinds {
    All,
    Only(&'static [AttributeKind]),
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Operator::Eq,
        Operator::Neq,
        Operator::IsEmpty,
        Operator::NotEmpty,
        Operator::Contains,
        Operator::NoContains,
        Operator::HasAll,
        Operator::HasThis,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
    ];

    /// Registry lookup by name. Unknown names are an error, never a default.
    pub fn lookup(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| SetsError::UnknownOperator(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::IsEmpty => "isempty",
            Operator::NotEmpty => "notempty",
            Operator::Contains => "contains",
            Operator::NoContains => "nocontains",
            Operator::HasAll => "hasall",
            Operator::HasThis => "hasthis",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Operator::Eq => "Equal",
            Operator::Neq => "Not Equal",
            Operator::IsEmpty => "Is Empty",
            Operator::NotEmpty => "Is Not Empty",
            Operator::Contains => "Contains",
            Operator::NoContains => "Does Not Contain",
            Operator::HasAll => "Has All",
            Operator::HasThis => "Has This",
            Operator::Gt => "Greater Than",
            Operator::Gte => "Greater Than Or Equal",
            Operator::Lt => "Less Than",
            Operator::Lte => "Less Than Or Equal",
        }
    }

    pub fn selectiveness(self) -> f64 {
        match self {
            Operator::Eq => 0.0,
            Operator::Contains => 2.0,
            Operator::HasAll | Operator::HasThis => 5.0,
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => 5.0,
            Operator::IsEmpty | Operator::NotEmpty => 10.0,
            Operator::NoContains => 12.0,
            Operator::Neq => f64::MAX,
        }
    }

    pub fn compatible_kinds(self) -> CompatibleKinds {
        match self {
            Operator::HasAll | Operator::HasThis => CompatibleKinds::Only(&[AttributeKind::List]),
            Operator::Contains | Operator::NoContains => {
                CompatibleKinds::Only(&[AttributeKind::Text])
            }
            _ => CompatibleKinds::All,
        }
    }

    /// Whether this operator is meant for attributes of `kind`. Undeclared
    /// attributes (`Any`) are accepted by every operator.
    pub fn accepts(self, kind: AttributeKind) -> bool {
        match self.compatible_kinds() {
            CompatibleKinds::All => true,
            CompatibleKinds::Only(kinds) => kind == AttributeKind::Any || kinds.contains(&kind),
        }
    }

    /// Whether [`Operator::enforce`] can produce a value.
    pub fn can_enforce(self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::IsEmpty | Operator::HasAll | Operator::HasThis
                | Operator::Gte | Operator::Lte
        )
    }

    /// Test the attribute's value on `doc` against the resolved clause value.
    ///
    /// Shape mismatches (missing attribute, incomparable types) are `false`.
    /// The only error is `hasthis` without a context document.
    pub fn matches(
        self,
        attr: &dyn AttributeDefinition,
        doc: &Document,
        value: &AttrValue,
        cx: &EvalContext<'_>,
    ) -> Result<bool> {
        let current = attr.value(doc);
        let matched = match self {
            Operator::Eq => current.loose_eq(value),
            Operator::Neq => !current.loose_eq(value),
            Operator::IsEmpty => current.is_empty(),
            Operator::NotEmpty => !current.is_empty(),
            Operator::Contains => text_contains(&current, value),
            Operator::NoContains => !text_contains(&current, value),
            Operator::HasAll => match current.as_list() {
                Some(list) => value
                    .clone()
                    .into_list()
                    .iter()
                    .all(|item| list_has(list, item)),
                None => false,
            },
            Operator::HasThis => {
                let link = AttrValue::Text(cx.this_link(attr.key())?);
                current.as_list().is_some_and(|list| list_has(list, &link))
            }
            Operator::Gt => current.compare(value) == Some(Ordering::Greater),
            Operator::Gte => matches!(
                current.compare(value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt => current.compare(value) == Some(Ordering::Less),
            Operator::Lte => matches!(
                current.compare(value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        };
        Ok(matched)
    }

    /// Compute a value that makes this clause match, given the current one.
    ///
    /// Fails with `NotCreatable` for operators without an enforce function,
    /// and with `MissingContext` for `hasthis` without a context document.
    pub fn enforce(
        self,
        current: &AttrValue,
        value: &AttrValue,
        cx: &EvalContext<'_>,
        attr: &dyn AttributeDefinition,
    ) -> Result<AttrValue> {
        match self {
            Operator::Eq | Operator::Gte | Operator::Lte => Ok(value.clone()),
            Operator::IsEmpty => Ok(AttrValue::Null),
            Operator::HasAll => {
                let mut list = current_list(current);
                for item in value.clone().into_list() {
                    if !list_has(&list, &item) {
                        list.push(item);
                    }
                }
                Ok(AttrValue::List(list))
            }
            Operator::HasThis => {
                let link = AttrValue::Text(cx.this_link(attr.key())?);
                let mut list = current_list(current);
                if !list_has(&list, &link) {
                    list.push(link);
                }
                Ok(AttrValue::List(list))
            }
            Operator::Neq
            | Operator::NotEmpty
            | Operator::Contains
            | Operator::NoContains
            | Operator::Gt
            | Operator::Lt => Err(SetsError::NotCreatable(self.name().to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = SetsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s)
    }
}

/// Case-insensitive substring test on the text forms. A missing attribute or
/// a missing needle never contains anything.
fn text_contains(haystack: &AttrValue, needle: &AttrValue) -> bool {
    match (haystack.stringify(), needle.stringify()) {
        (Some(h), Some(n)) => h.to_lowercase().contains(&n.to_lowercase()),
        _ => false,
    }
}

fn list_has(list: &[AttrValue], item: &AttrValue) -> bool {
    list.iter().any(|el| el.loose_eq(item))
}

/// Existing list to extend; anything that isn't a list starts fresh.
fn current_list(current: &AttrValue) -> Vec<AttrValue> {
    current.as_list().map(<[AttrValue]>::to_vec).unwrap_or_default()
}
