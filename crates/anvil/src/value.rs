//! The value algebra.
//!
//! `Value` is the closed sum every parsed tree is made of — pure data, no
//! pointers back into the parser, no interior mutability. Every variant
//! derives `Debug, Clone, PartialEq` with one doc line apiece, and exposes a
//! strict/lenient accessor pair per scalar kind rather than a raw stack
//! representation.

use indexmap::IndexMap;

use crate::error::AccessError;
use crate::lookup::Lookup;

/// Numeric literal: either an integer or a float. A single unified variant
/// carrying one or the other, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

/// Backtick-delimited freeform text with an optional `@tag` prefix, e.g.
/// `` @md`**bold**` ``.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Blob {
    pub content: String,
    pub tag: Option<String>,
}

/// A `(key, optional literal value)` pair. The literal, when present, is any
/// [`Value`] variant *except* `Array`, `Object`, `Tuple`, or `Blob` — the
/// parser enforces this at parse time (`InvalidValueInAttribute`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub key: String,
    pub value: Option<Value>,
}

/// An ordered identifier → value mapping with unique keys. Backs both
/// `Value::Object` and, via the same [`Lookup`] implementation, the
/// top-level [`Module`](crate::Module) façade, so the two share one
/// implementation rather than two.
///
/// Key uniqueness is a structural guarantee of `IndexMap`, not a runtime
/// check re-derived here; insertion order is preserved by the same type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Object {
    fields: IndexMap<String, Value>,
}

impl Object {
    pub(crate) fn new(fields: IndexMap<String, Value>) -> Self {
        Object { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Lookup for Object {
    fn try_get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn context_name(&self) -> String {
        "<object>".to_string()
    }
}

/// The closed value universe. Every parsed tree is built exclusively from
/// these variants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
pub enum Value {
    /// The single `null` inhabitant.
    Null,
    /// `true` / `false`.
    Boolean(bool),
    /// A decimal or hex integer, or a float (requires a dot or exponent).
    Numeric(Numeric),
    /// Escape-decoded UTF-8 text.
    String(String),
    /// A dotted/colon-segmented symbol, e.g. `minecraft:diamond_sword`.
    Bare(String),
    /// Freeform backtick-delimited text with an optional tag.
    Blob(Blob),
    /// An ordered sequence; elements need not share a type.
    Array(Vec<Value>),
    /// A fixed-arity (≥ 2), position-indexed sequence.
    Tuple(Vec<Value>),
    /// An ordered identifier → value mapping with unique keys.
    Object(Object),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Numeric(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_bare(&self) -> bool {
        matches!(self, Value::Bare(_))
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Value::Blob(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Variant name used in `TypeMismatch` messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Numeric(_) => "numeric",
            Value::String(_) => "string",
            Value::Bare(_) => "bare",
            Value::Blob(_) => "blob",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
            Value::Object(_) => "object",
        }
    }

    /// Decoded string text. `Null` special-cases to the literal `"null"`;
    /// `Bare` is NOT interchangeable with `String` here — use [`as_bare`]
    /// for that.
    ///
    /// [`as_bare`]: Value::as_bare
    pub fn as_string(&self) -> Result<&str, AccessError> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            Value::Null => Ok("null"),
            other => Err(AccessError::type_mismatch("string", other.kind_name())),
        }
    }

    pub fn as_string_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_string().unwrap_or(default)
    }

    /// Raw identifier text of a `Bare` value.
    pub fn as_bare(&self) -> Result<&str, AccessError> {
        match self {
            Value::Bare(s) => Ok(s.as_str()),
            other => Err(AccessError::type_mismatch("bare", other.kind_name())),
        }
    }

    pub fn as_bare_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_bare().unwrap_or(default)
    }

    /// Integer value. A `Float` truncates toward zero.
    pub fn as_long(&self) -> Result<i64, AccessError> {
        match self {
            Value::Numeric(Numeric::Integer(n)) => Ok(*n),
            Value::Numeric(Numeric::Float(f)) => Ok(*f as i64),
            other => Err(AccessError::type_mismatch("numeric", other.kind_name())),
        }
    }

    pub fn as_long_or(&self, default: i64) -> i64 {
        self.as_long().unwrap_or(default)
    }

    /// Float value. An `Integer` widens losslessly (within f64 precision).
    pub fn as_double(&self) -> Result<f64, AccessError> {
        match self {
            Value::Numeric(Numeric::Float(f)) => Ok(*f),
            Value::Numeric(Numeric::Integer(n)) => Ok(*n as f64),
            other => Err(AccessError::type_mismatch("numeric", other.kind_name())),
        }
    }

    pub fn as_double_or(&self, default: f64) -> f64 {
        self.as_double().unwrap_or(default)
    }

    pub fn as_boolean(&self) -> Result<bool, AccessError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(AccessError::type_mismatch("boolean", other.kind_name())),
        }
    }

    pub fn as_boolean_or(&self, default: bool) -> bool {
        self.as_boolean().unwrap_or(default)
    }

    pub fn as_array(&self) -> Result<&[Value], AccessError> {
        match self {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(AccessError::type_mismatch("array", other.kind_name())),
        }
    }

    pub fn as_tuple(&self) -> Result<&[Value], AccessError> {
        match self {
            Value::Tuple(items) => Ok(items.as_slice()),
            other => Err(AccessError::type_mismatch("tuple", other.kind_name())),
        }
    }

    pub fn as_object(&self) -> Result<&Object, AccessError> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(AccessError::type_mismatch("object", other.kind_name())),
        }
    }

    pub fn as_blob(&self) -> Result<&Blob, AccessError> {
        match self {
            Value::Blob(blob) => Ok(blob),
            other => Err(AccessError::type_mismatch("blob", other.kind_name())),
        }
    }

    /// True for the scalar variants an attribute literal may carry: every
    /// variant except `Array`, `Object`, `Tuple`, and `Blob`.
    pub(crate) fn is_valid_attribute_literal(&self) -> bool {
        !matches!(
            self,
            Value::Array(_) | Value::Object(_) | Value::Tuple(_) | Value::Blob(_)
        )
    }
}
