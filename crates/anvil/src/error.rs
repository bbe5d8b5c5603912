//! Error taxonomy.
//!
//! `ErrorCode` gives every failure a stable, matchable identity instead of a
//! free-form string, and `ParseError` pairs a code with the `(line, column)`
//! of the offending position. `AccessError` is a separate family raised by
//! the lookup façade against an already-constructed [`Module`] — it is never
//! mixed with parse-time errors.

use thiserror::Error;

/// Stable identifier for a single parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    // Lexical
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("invalid exponent")]
    InvalidExponent,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated freeform blob")]
    UnterminatedFreeform,
    #[error("expected a backtick to open the blob body")]
    ExpectedBacktick,

    // Structural
    #[error("expected ':='")]
    ExpectedAssign,
    #[error("expected an identifier")]
    ExpectedIdentifier,
    #[error("expected an object field")]
    ExpectedObjectField,
    #[error("expected '}}' to close object")]
    ExpectedObjectClose,
    #[error("expected ']' to close array")]
    ExpectedArrayClose,
    #[error("expected ')' to close tuple")]
    ExpectedTupleClose,
    #[error("missing ',' between array elements")]
    MissingCommaInArray,
    #[error("missing ',' between attributes")]
    MissingCommaInAttributes,
    #[error("expected ',' between tuple elements")]
    ExpectedCommaInTuple,
    #[error("trailing ',' before ']' is not allowed")]
    TrailingCommaInArray,
    #[error("empty object '{{}}' is not allowed")]
    EmptyObjectNotAllowed,
    #[error("empty tuple '()' is not allowed")]
    EmptyTupleElement,
    #[error("tuple must have at least two elements")]
    TupleTooShort,
    #[error("':=' is not allowed here")]
    AssignmentNotAllowedHere,
    #[error("'=>' is not a valid operator here")]
    RocketOpNotValid,

    // Semantic
    #[error("identifier is a reserved word")]
    IdentifierIsKeyword,
    #[error("reserved word is not a valid object key")]
    InvalidKeyInObject,
    #[error("reserved word is not a valid attribute key")]
    AttributeIsKeyword,
    #[error("duplicate field in object")]
    DuplicateFieldInObject,
    #[error("duplicate attribute key")]
    DuplicateAttributeKey,
    #[error("duplicate top-level key")]
    DuplicateTopLevelKey,
    #[error("array, object, tuple, and blob values are not allowed in attributes")]
    InvalidValueInAttribute,

    // Meta
    #[error("multiple shebang lines")]
    MultipleShebang,
    #[error("shebang after statements")]
    ShebangAfterStatements,
    #[error("I/O error")]
    IoError,
    #[error("parsing failed")]
    ParsingFailed,
}

/// A single recorded parse failure with its source position.
///
/// `line` and `column` are 1-based and point at the character position at
/// the moment the error was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {code}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub code: ErrorCode,
}

/// Errors raised by the lookup façade against a constructed module or
/// object. Distinct from [`ParseError`]: these are per-call accessor
/// failures, not accumulated parse diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    #[error("no such key '{key}' in {context}")]
    NoSuchKey { context: String, key: String },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AccessError {
    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        AccessError::TypeMismatch { expected, found }
    }
}
