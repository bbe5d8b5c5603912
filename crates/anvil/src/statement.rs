//! Top-level statements.

use crate::value::{Attribute, Value};

/// A single top-level assignment: `IDENT (":" IDENT)? ATTR_BLOCK? ":=" VALUE`.
///
/// `attributes` lives on the assignment itself, rather than folded into
/// `value`'s own (nonexistent) attribute slot — see `DESIGN.md` for the
/// reasoning.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub key: String,
    pub attributes: Vec<Attribute>,
    pub value: Value,
    pub parent: Option<String>,
}
