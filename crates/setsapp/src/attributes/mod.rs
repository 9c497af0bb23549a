//! # Attribute System
//!
//! Every clause of a query names an attribute. This module turns those names
//! into values:
//!
//! - **Keys**: [`AttributeKey`] is either intrinsic (computed from the file)
//!   or extrinsic (a frontmatter field).
//! - **Kinds**: [`AttributeKind`] is an attribute's declared type, used to
//!   coerce raw values before comparison.
//! - **Values**: [`AttrValue`] is the typed runtime value, with one comparison
//!   rule per pair of value types.
//! - **Definitions**: [`AttributeDefinition`] reads an attribute off a
//!   [`crate::model::Document`].
//!
//! ## Intrinsic Attributes
//!
//! | Key | Kind | Value |
//! |-----|------|-------|
//! | `__bname` | `Text` | File name without extension |
//! | `__ctime` | `Date` | Creation time |
//! | `__mtime` | `Date` | Modification time |
//! | `__path` | `Text` | Vault-relative path |
//!
//! Any other key is extrinsic and read from the frontmatter.

mod definition;
mod key;
mod spec;
mod value;

pub use definition::{AttributeDef, AttributeDefinition, FrontmatterAttribute, IntrinsicAttribute};
pub use key::{AttributeKey, IntrinsicAttributeKey};
pub use spec::{intrinsic_spec, AttributeKind, IntrinsicSpec, INTRINSIC_ATTRIBUTES};
pub use value::AttrValue;
