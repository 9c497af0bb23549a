//! Attribute value types and comparison rules.
//!
//! Frontmatter is untyped on disk, so every value read from a document lands
//! in [`AttrValue`]. Operators never compare raw values directly: they go
//! through [`AttrValue::loose_eq`] and [`AttrValue::compare`], which define
//! one rule per pair of value types. Pairs without a rule are incomparable,
//! and incomparable clauses simply don't match.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Runtime representation of an attribute value.
///
/// Deserialization is untagged: JSON strings always become `Text`. Dates are
/// produced by coercion through a `Date` attribute kind, never by sniffing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Missing or explicitly null.
    #[default]
    Null,

    Bool(bool),

    Number(f64),

    Text(String),

    /// Timestamp, serialized as RFC 3339.
    Date(DateTime<Utc>),

    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Build a list value from anything convertible into values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AttrValue>,
    {
        AttrValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Convert a JSON value. Objects have no attribute counterpart and are
    /// kept as their JSON text.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Number(n) => n.as_f64().map(AttrValue::Number).unwrap_or(AttrValue::Null),
            Value::String(s) => AttrValue::Text(s),
            Value::Array(items) => AttrValue::List(items.into_iter().map(Self::from_json).collect()),
            obj @ Value::Object(_) => AttrValue::Text(obj.to_string()),
        }
    }

    /// Null, an empty string and an empty list count as empty. `0` and
    /// `false` do not.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Text(s) => s.is_empty(),
            AttrValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Wrap a scalar into a one-element list; null becomes the empty list.
    pub fn into_list(self) -> Vec<AttrValue> {
        match self {
            AttrValue::List(items) => items,
            AttrValue::Null => Vec::new(),
            other => vec![other],
        }
    }

    /// String form used by the text operators. Lists are joined with `,`.
    /// Returns `None` for null: a missing value has no text.
    pub fn stringify(&self) -> Option<String> {
        match self {
            AttrValue::Null => None,
            AttrValue::Bool(b) => Some(b.to_string()),
            AttrValue::Number(n) => Some(format_number(*n)),
            AttrValue::Text(s) => Some(s.clone()),
            AttrValue::Date(d) => Some(d.to_rfc3339()),
            AttrValue::List(items) => Some(
                items
                    .iter()
                    .map(|item| item.stringify().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// Equality across value types.
    ///
    /// Same-typed values compare directly. Text is parsed when compared with
    /// a number, bool or date. Lists are equal when they have loosely equal
    /// elements in the same order. Any other pairing is unequal.
    pub fn loose_eq(&self, other: &AttrValue) -> bool {
        use AttrValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (Number(n), Text(s)) | (Text(s), Number(n)) => parse_number(s) == Some(*n),
            (Bool(b), Text(s)) | (Text(s), Bool(b)) => parse_bool(s) == Some(*b),
            (Bool(b), Number(n)) | (Number(n), Bool(b)) => f64::from(u8::from(*b)) == *n,
            (Date(d), Text(s)) | (Text(s), Date(d)) => parse_date(s) == Some(*d),
            (List(a), List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => false,
        }
    }

    /// Ordering between two values, or `None` when they are incomparable.
    pub fn compare(&self, other: &AttrValue) -> Option<Ordering> {
        use AttrValue::*;
        match (self, other) {
            (Number(a), Number(b)) => a.partial_cmp(b),
            (Text(a), Text(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (Number(a), Text(s)) => parse_number(s).and_then(|b| a.partial_cmp(&b)),
            (Text(s), Number(b)) => parse_number(s).and_then(|a| a.partial_cmp(b)),
            (Date(a), Text(s)) => parse_date(s).map(|b| a.cmp(&b)),
            (Text(s), Date(b)) => parse_date(s).map(|a| a.cmp(b)),
            _ => None,
        }
    }

    /// Total order used for sorting result sets.
    ///
    /// Values of different types are grouped by type (bool, number, date,
    /// text, list) with nulls last; the cross-type rules of [`compare`] only
    /// apply to matching, since they are not transitive. Lists compare equal
    /// to each other.
    ///
    /// [`compare`]: AttrValue::compare
    pub fn sort_cmp(&self, other: &AttrValue) -> Ordering {
        use AttrValue::*;
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Bool(a), Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttrValue::Bool(_) => 0,
            AttrValue::Number(_) => 1,
            AttrValue::Date(_) => 2,
            AttrValue::Text(_) => 3,
            AttrValue::List(_) => 4,
            AttrValue::Null => 5,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stringify() {
            Some(s) => f.write_str(&s),
            None => f.write_str("null"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(n as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(f64::from(n))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(d: DateTime<Utc>) -> Self {
        AttrValue::Date(d)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(items: Vec<T>) -> Self {
        AttrValue::list(items)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttrValue::Null)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and `YYYY-MM-DD`
/// (midnight UTC).
pub(crate) fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
