//! Pretty-printer.
//!
//! Walks a [`Module`]/[`Value`] tree with a small recursive `format_value`
//! helper threading an indentation depth, a dedicated string-escaping
//! helper, and one match arm per variant. The output is Anvil's own source
//! syntax rather than a foreign notation, so it is itself valid, reparseable
//! `.aml`/`.asl` text.

use crate::module::Module;
use crate::value::{Numeric, Value};

const INDENT: &str = "  ";

pub fn format_module(module: &Module) -> String {
    let mut out = String::new();
    if !module.attributes().is_empty() {
        out.push_str("@[");
        for (i, attr) in module.attributes().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            format_attribute(attr, &mut out);
        }
        out.push_str("]\n");
    }
    for stmt in module.statements() {
        out.push_str(&stmt.key);
        if let Some(parent) = &stmt.parent {
            out.push(':');
            out.push_str(parent);
        }
        if !stmt.attributes.is_empty() {
            out.push_str(" @[");
            for (i, attr) in stmt.attributes.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                format_attribute(attr, &mut out);
            }
            out.push(']');
        }
        out.push_str(" := ");
        format_value(&stmt.value, 0, &mut out);
        out.push('\n');
    }
    out
}

fn format_attribute(attr: &crate::value::Attribute, out: &mut String) {
    out.push_str(&attr.key);
    if let Some(value) = &attr.value {
        out.push('=');
        format_value(value, 0, out);
    }
}

pub fn format_value(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Numeric(Numeric::Integer(n)) => out.push_str(&n.to_string()),
        Value::Numeric(Numeric::Float(f)) => out.push_str(&format_float(*f)),
        Value::String(s) => {
            out.push('"');
            escape_string(s, out);
            out.push('"');
        }
        Value::Bare(s) => out.push_str(s),
        Value::Blob(blob) => {
            out.push('@');
            if let Some(tag) = &blob.tag {
                out.push_str(tag);
            }
            out.push('`');
            out.push_str(&blob.content);
            out.push('`');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                format_value(item, depth + 1, out);
            }
            out.push(']');
        }
        Value::Tuple(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                format_value(item, depth + 1, out);
            }
            out.push(')');
        }
        Value::Object(obj) => {
            out.push_str("{\n");
            let indent = INDENT.repeat(depth + 1);
            for (key, field) in obj.iter() {
                out.push_str(&indent);
                out.push_str(key);
                out.push_str(" := ");
                format_value(field, depth + 1, out);
                out.push('\n');
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}

/// Mirrors the parser's own escape table: `\n \t \r \\ \"`.
fn escape_string(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
}

/// Always emits a decimal point so the output re-lexes as a Float, never an
/// Integer.
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Attribute;

    #[test]
    fn formats_scalars() {
        let mut out = String::new();
        format_value(&Value::Numeric(Numeric::Integer(42)), 0, &mut out);
        assert_eq!(out, "42");

        let mut out = String::new();
        format_value(&Value::Boolean(false), 0, &mut out);
        assert_eq!(out, "false");
    }

    #[test]
    fn whole_float_keeps_a_decimal_point() {
        let mut out = String::new();
        format_value(&Value::Numeric(Numeric::Float(20.0)), 0, &mut out);
        assert_eq!(out, "20.0");
    }

    #[test]
    fn escapes_string_special_characters() {
        let mut out = String::new();
        format_value(&Value::String("a\nb\"c".to_string()), 0, &mut out);
        assert_eq!(out, "\"a\\nb\\\"c\"");
    }

    #[test]
    fn formats_tag_only_attribute_with_no_equals() {
        let mut out = String::new();
        format_attribute(
            &Attribute {
                key: "experimental".to_string(),
                value: None,
            },
            &mut out,
        );
        assert_eq!(out, "experimental");
    }
}
