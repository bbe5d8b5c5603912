//! Parser configuration.
//!
//! A small, `Default`-implementing knob set that lets an external caller
//! tune behavior without forking the parser. A parser built with no config
//! behaves identically to one built with `ParserConfig::default()`.

use crate::dialect::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of errors recorded before further errors are only
    /// counted, not retained. Parsing still runs to completion either way.
    pub max_errors: usize,
    /// Skip shebang/extension sniffing and force a dialect.
    pub dialect_override: Option<Dialect>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_errors: 25,
            dialect_override: None,
        }
    }
}
