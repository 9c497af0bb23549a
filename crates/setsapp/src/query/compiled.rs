//! Compiled queries.
//!
//! [`Query::compile`] turns a clause list into an evaluator bound to a vault:
//!
//! 1. Clauses are stably sorted by ascending operator selectiveness. This only
//!    changes how early a document is rejected, never which documents match.
//! 2. Every key (clause and sort) is resolved through the vault; an
//!    unresolvable key fails compilation.
//! 3. Concrete clause values are coerced to their attribute's kind once.
//!    Dynamic values are resolved on each evaluation.
//! 4. `has_extrinsic` and `can_create` are computed, and the sort fields are
//!    stored reversed.
//!
//! Compilation either yields a complete `Query` or an error; a compiled query
//! is immutable and `Send + Sync`.

use super::clause::{Clause, Clauses, SortField};
use super::dynamic::{ClauseValue, EvalContext};
use super::operator::Operator;
use crate::attributes::{AttrValue, AttributeDef, AttributeKey};
use crate::config::SetsConfig;
use crate::error::{Result, SetsError};
use crate::model::{Document, Frontmatter};
use crate::store::VaultDb;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace, warn};

struct CompiledClause {
    clause: Clause,
    attr: AttributeDef,
    /// Kind-coerced value for concrete clauses; `None` when dynamic.
    concrete: Option<AttrValue>,
}

impl CompiledClause {
    fn value(&self, cx: &EvalContext<'_>) -> Result<Cow<'_, AttrValue>> {
        match &self.concrete {
            Some(value) => Ok(Cow::Borrowed(value)),
            None => self.clause.value.resolve(self.attr.as_ref(), cx).map(Cow::Owned),
        }
    }
}

pub struct Query<'a> {
    store: &'a dyn VaultDb,
    clauses: Vec<CompiledClause>,
    has_extrinsic: bool,
    can_create: bool,
    context: Option<Document>,
    context_link: Option<String>,
    sort_by: Vec<SortField>,
    sort_attrs: Vec<AttributeDef>,
    config: SetsConfig,
}

impl<'a> Query<'a> {
    pub fn compile(
        store: &'a dyn VaultDb,
        clauses: impl Into<Clauses>,
        sort: &[SortField],
        context: Option<Document>,
        config: &SetsConfig,
    ) -> Result<Self> {
        let clauses: Clauses = clauses.into();
        let mut clauses = clauses.0;
        clauses.sort_by(|a, b| a.op.selectiveness().total_cmp(&b.op.selectiveness()));

        let clauses = clauses
            .into_iter()
            .map(|clause| {
                let attr = store.attribute_definition(&clause.key)?;
                if !clause.op.accepts(attr.kind()) {
                    warn!(
                        key = %clause.key,
                        op = %clause.op,
                        kind = %attr.kind(),
                        "operator is not meant for this attribute kind"
                    );
                }
                let concrete = match &clause.value {
                    ClauseValue::Concrete(value) => Some(attr.kind().coerce(value.clone())),
                    ClauseValue::LinkToThis => None,
                };
                Ok(CompiledClause {
                    clause,
                    attr,
                    concrete,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let sort_by: Vec<SortField> = sort.iter().rev().cloned().collect();
        let sort_attrs = sort_by
            .iter()
            .map(|field| store.attribute_definition(&field.key))
            .collect::<Result<Vec<_>>>()?;

        let has_extrinsic = clauses.iter().any(|c| !c.clause.key.is_intrinsic());
        let can_create = clauses.iter().all(|c| c.clause.op.can_enforce());
        let context_link = context.as_ref().map(|doc| store.generate_link(doc));

        let query = Self {
            store,
            clauses,
            has_extrinsic,
            can_create,
            context,
            context_link,
            sort_by,
            sort_attrs,
            config: config.clone(),
        };
        debug!(query = %query, has_extrinsic, can_create, "compiled query");
        Ok(query)
    }

    fn eval_context(&self) -> EvalContext<'_> {
        let cx = EvalContext::new(self.store, self.context.as_ref());
        match &self.context_link {
            Some(link) => cx.with_context_link(link),
            None => cx,
        }
    }

    /// Whether `doc` satisfies every clause.
    ///
    /// No document never matches. A query reading frontmatter rejects
    /// documents without a frontmatter block. A dynamic value without a
    /// context document is an error, not a non-match.
    pub fn matches(&self, doc: Option<&Document>) -> Result<bool> {
        let Some(doc) = doc else {
            return Ok(false);
        };
        if self.has_extrinsic && !doc.has_frontmatter() {
            trace!(path = %doc.path, "rejected: no frontmatter");
            return Ok(false);
        }
        let cx = self.eval_context();
        for compiled in &self.clauses {
            let value = compiled.value(&cx)?;
            if !compiled
                .clause
                .op
                .matches(compiled.attr.as_ref(), doc, &value, &cx)?
            {
                trace!(path = %doc.path, clause = %compiled.clause, "rejected");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Clauses on `key` using `op`, in evaluation order.
    pub fn clauses_by_attr(&self, key: impl Into<AttributeKey>, op: Operator) -> Vec<&Clause> {
        let key = key.into();
        self.clauses()
            .filter(|c| c.key == key && c.op == op)
            .collect()
    }

    /// Equality clauses on `key`.
    pub fn clauses_by_key(&self, key: impl Into<AttributeKey>) -> Vec<&Clause> {
        self.clauses_by_attr(key, Operator::Eq)
    }

    /// The type this query selects for, from its first `type eq` clause.
    pub fn infer_set_type(&self) -> Option<String> {
        self.clauses_by_key(self.config.type_attribute.as_str())
            .first()
            .and_then(|clause| clause.value.literal().stringify())
    }

    /// Link to the collection this query lists: set when the query asks for
    /// documents whose collection attribute links back to the bound context.
    pub fn infer_collection(&self) -> Option<String> {
        let key = AttributeKey::new(self.config.collection_attribute.as_str());
        let links_back = self.clauses().any(|c| {
            c.key == key
                && match c.op {
                    Operator::HasAll => c.value == ClauseValue::LinkToThis,
                    Operator::HasThis => true,
                    _ => false,
                }
        });
        if !links_back {
            return None;
        }
        self.context_link.clone()
    }

    /// Rewrite `frontmatter` so that a document carrying it matches.
    ///
    /// Fails with `NotCreatable` when an operator has no enforce. Intrinsic
    /// clauses are skipped. On error the map is left untouched.
    pub fn enforce(&self, frontmatter: &mut Frontmatter) -> Result<()> {
        if let Some(blocking) = self.clauses().find(|c| !c.op.can_enforce()) {
            return Err(SetsError::NotCreatable(blocking.op.name().to_string()));
        }
        let cx = self.eval_context();
        let mut staged = frontmatter.clone();
        for compiled in &self.clauses {
            let AttributeKey::Extrinsic(name) = &compiled.clause.key else {
                continue;
            };
            let value = compiled.value(&cx)?;
            let kind = compiled.attr.kind();
            let current = kind.coerce(staged.get(name).cloned().unwrap_or_default());
            let enforced = compiled
                .clause
                .op
                .enforce(&current, &value, &cx, compiled.attr.as_ref())?;
            staged.insert(name.clone(), enforced);
        }
        *frontmatter = staged;
        Ok(())
    }

    /// Frontmatter for `doc` after enforcing this query on it.
    pub fn enforce_document(&self, doc: &Document) -> Result<Frontmatter> {
        let mut frontmatter = doc.frontmatter.clone().unwrap_or_default();
        self.enforce(&mut frontmatter)?;
        Ok(frontmatter)
    }

    /// Order `docs` by the sort fields. Each stored field is applied as a
    /// stable sort, so the first field the caller declared ends up primary.
    /// Null values go last in either direction.
    pub fn sort(&self, docs: &mut [Document]) {
        for (field, attr) in self.sort_by.iter().zip(&self.sort_attrs) {
            docs.sort_by(|a, b| sort_order(&attr.value(a), &attr.value(b), field.descending));
        }
    }

    /// Clauses in evaluation order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().map(|c| &c.clause)
    }

    pub fn has_extrinsic(&self) -> bool {
        self.has_extrinsic
    }

    pub fn can_create(&self) -> bool {
        self.can_create
    }

    pub fn context(&self) -> Option<&Document> {
        self.context.as_ref()
    }

    /// Sort fields as stored: reversed from declaration order.
    pub fn sortby(&self) -> &[SortField] {
        &self.sort_by
    }
}

fn sort_order(a: &AttrValue, b: &AttrValue, descending: bool) -> Ordering {
    if descending && !a.is_null() && !b.is_null() {
        b.sort_cmp(a)
    } else {
        a.sort_cmp(b)
    }
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("*");
        }
        for (i, clause) in self.clauses().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("clauses", &self.clauses().collect::<Vec<_>>())
            .field("has_extrinsic", &self.has_extrinsic)
            .field("can_create", &self.can_create)
            .field("context", &self.context.as_ref().map(|d| &d.path))
            .field("sort_by", &self.sort_by)
            .finish()
    }
}
