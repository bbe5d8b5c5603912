//! Anvil: a recursive-descent parser and immutable value tree for a
//! hierarchical, human-authored configuration/data language (`.aml` /
//! `.asl`).
//!
//! ```
//! use anvil::{parse, Lookup, SourceId};
//!
//! let module = parse("name := \"Badkraft\"\nage := 42\n", SourceId::Sentinel).unwrap();
//! assert_eq!(module.get_string("name").unwrap(), "Badkraft");
//! assert_eq!(module.get_long("age").unwrap(), 42);
//! ```

mod config;
mod cursor;
mod dialect;
mod error;
mod format;
mod lookup;
mod module;
mod operators;
mod parser;
mod reserved;
mod statement;
mod value;

pub use config::ParserConfig;
pub use dialect::Dialect;
pub use error::{AccessError, ErrorCode, ParseError};
pub use lookup::Lookup;
pub use module::{Module, ModuleHandle, SourceId};
pub use parser::{parse, parse_with_config, ParseOutcome};
pub use statement::Statement;
pub use value::{Attribute, Blob, Numeric, Object, Value};
