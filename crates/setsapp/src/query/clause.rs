//! Clauses and sort fields.
//!
//! ## Expression Grammar
//!
//! UI clients pass clauses and sort fields as strings:
//!
//! - **Clause**: `key:op[:value]`, e.g. `status:eq:done`, `tags:hasall:["a","b"]`,
//!   `summary:isempty`. The value is parsed as JSON when it is valid JSON and
//!   taken as text otherwise, so `priority:gt:5` compares against the number 5.
//! - **Sort field**: `key` or `key:asc` (ascending), `key:desc` (descending).
//!
//! Keys may not contain `:`; values may.

use super::dynamic::ClauseValue;
use super::operator::Operator;
use crate::attributes::{AttrValue, AttributeKey};
use crate::error::{Result, SetsError};
use std::fmt;
use std::str::FromStr;

/// One `(attribute, operator, value)` test in a query's conjunction.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub key: AttributeKey,
    pub op: Operator,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(key: impl Into<AttributeKey>, op: Operator, value: ClauseValue) -> Self {
        Self {
            key: key.into(),
            op,
            value,
        }
    }

    /// Clause from a raw literal: the sentinel text becomes a dynamic value.
    pub fn literal(key: impl Into<AttributeKey>, op: Operator, value: impl Into<AttrValue>) -> Self {
        Self::new(key, op, ClauseValue::parse_literal(value.into()))
    }

    /// Clause from untyped parts, looking the operator up by name.
    pub fn parse(key: &str, op: &str, value: impl Into<AttrValue>) -> Result<Self> {
        Ok(Self::literal(key, Operator::lookup(op)?, value))
    }

    /// Convenience: an equality clause.
    pub fn eq(key: impl Into<AttributeKey>, value: impl Into<AttrValue>) -> Self {
        Self::literal(key, Operator::Eq, value)
    }

    /// Convenience: a clause whose value is a link to the context document.
    pub fn link_to_this(key: impl Into<AttributeKey>, op: Operator) -> Self {
        Self::new(key, op, ClauseValue::LinkToThis)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.op, self.value)
    }
}

impl FromStr for Clause {
    type Err = SetsError;

    fn from_str(expr: &str) -> Result<Self> {
        let mut parts = expr.splitn(3, ':');
        let key = parts.next().unwrap_or_default().trim();
        let op = parts.next().map(str::trim).ok_or_else(|| {
            SetsError::InvalidClause(format!("'{}' is missing an operator", expr))
        })?;
        if key.is_empty() {
            return Err(SetsError::InvalidClause(format!(
                "'{}' is missing an attribute",
                expr
            )));
        }
        let value = parts.next().map(parse_value).unwrap_or(AttrValue::Null);
        Clause::parse(key, op, value)
    }
}

/// JSON when it parses, text otherwise.
fn parse_value(raw: &str) -> AttrValue {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => AttrValue::from_json(json),
        Err(_) => AttrValue::Text(raw.to_string()),
    }
}

/// A sort key; `descending = true` sorts high to low.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub key: AttributeKey,
    pub descending: bool,
}

impl SortField {
    pub fn asc(key: impl Into<AttributeKey>) -> Self {
        Self {
            key: key.into(),
            descending: false,
        }
    }

    pub fn desc(key: impl Into<AttributeKey>) -> Self {
        Self {
            key: key.into(),
            descending: true,
        }
    }
}

impl FromStr for SortField {
    type Err = SetsError;

    fn from_str(expr: &str) -> Result<Self> {
        let (key, direction) = match expr.rsplit_once(':') {
            Some((key, dir)) => (key.trim(), Some(dir.trim())),
            None => (expr.trim(), None),
        };
        if key.is_empty() {
            return Err(SetsError::InvalidClause(format!(
                "sort field '{}' is missing an attribute",
                expr
            )));
        }
        match direction {
            None | Some("asc") => Ok(SortField::asc(key)),
            Some("desc") => Ok(SortField::desc(key)),
            Some(other) => Err(SetsError::InvalidClause(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

/// Clause list accepted by query compilation. A bare clause is normalized
/// into a one-element list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses(pub Vec<Clause>);

impl From<Clause> for Clauses {
    fn from(clause: Clause) -> Self {
        Clauses(vec![clause])
    }
}

impl From<Vec<Clause>> for Clauses {
    fn from(clauses: Vec<Clause>) -> Self {
        Clauses(clauses)
    }
}

impl<const N: usize> From<[Clause; N]> for Clauses {
    fn from(clauses: [Clause; N]) -> Self {
        Clauses(clauses.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::IntrinsicAttributeKey;

    #[test]
    fn parse_full_expression() {
        let clause: Clause = "status:eq:done".parse().unwrap();
        assert_eq!(clause, Clause::eq("status", "done"));
    }

    #[test]
    fn parse_json_values() {
        let clause: Clause = "priority:gt:5".parse().unwrap();
        assert_eq!(clause.value, ClauseValue::Concrete(AttrValue::Number(5.0)));

        let clause: Clause = r#"tags:hasall:["a","b"]"#.parse().unwrap();
        assert_eq!(
            clause.value,
            ClauseValue::Concrete(AttrValue::list(["a", "b"]))
        );
    }

    #[test]
    fn parse_value_keeps_colons() {
        let clause: Clause = "url:contains:https://example.com".parse().unwrap();
        assert_eq!(
            clause.value,
            ClauseValue::Concrete("https://example.com".into())
        );
    }

    #[test]
    fn parse_without_value() {
        let clause: Clause = "summary:isempty".parse().unwrap();
        assert_eq!(clause.op, Operator::IsEmpty);
        assert_eq!(clause.value, ClauseValue::Concrete(AttrValue::Null));
    }

    #[test]
    fn parse_sentinel() {
        let clause: Clause = "collection:hasall:@link-to-this".parse().unwrap();
        assert_eq!(clause.value, ClauseValue::LinkToThis);
    }

    #[test]
    fn parse_intrinsic_key() {
        let clause: Clause = "__bname:contains:dune".parse().unwrap();
        assert_eq!(
            clause.key,
            AttributeKey::Intrinsic(IntrinsicAttributeKey::FileName)
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "status".parse::<Clause>(),
            Err(SetsError::InvalidClause(_))
        ));
        assert!(matches!(
            ":eq:x".parse::<Clause>(),
            Err(SetsError::InvalidClause(_))
        ));
        assert!(matches!(
            "status:like:x".parse::<Clause>(),
            Err(SetsError::UnknownOperator(op)) if op == "like"
        ));
    }

    #[test]
    fn parse_sort_fields() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::asc("title"));
        assert_eq!(
            "__mtime:desc".parse::<SortField>().unwrap(),
            SortField::desc("__mtime")
        );
        assert_eq!("title:asc".parse::<SortField>().unwrap(), SortField::asc("title"));
        assert!("title:sideways".parse::<SortField>().is_err());
        assert!("".parse::<SortField>().is_err());
    }

    #[test]
    fn bare_clause_normalizes_to_list() {
        let clauses: Clauses = Clause::eq("type", "book").into();
        assert_eq!(clauses.0.len(), 1);
    }
}
