//! Recursive-descent parser.
//!
//! A `Cursor`-driven recognizer with a `Vec<ParseError>` accumulator, built
//! for this language's statement/value grammar. One [`Cursor`] drives the
//! whole parse; every grammar function takes `&mut self` and leaves the
//! cursor positioned just past what it consumed, error or not — recovery is
//! always forward progress, never a rewind into already-read territory (the
//! one exception, shebang detection, uses [`Cursor::set_position`] exactly
//! once per parse).

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::dialect::Dialect;
use crate::error::{ErrorCode, ParseError};
use crate::module::{Module, SourceId};
use crate::operators::Operator;
use crate::reserved::is_reserved;
use crate::statement::Statement;
use crate::value::{Attribute, Blob, Numeric, Object, Value};

/// Result of a failed parse: the (possibly truncated) recorded errors, plus
/// the true count so a caller can report "showing 25 of 312 errors" rather
/// than silently dropping the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub errors: Vec<ParseError>,
    pub total_error_count: usize,
}

/// Parse `source` with default settings. `source_id` supplies the namespace
/// and dialect-extension hint.
pub fn parse(source: &str, source_id: SourceId) -> Result<Module, ParseOutcome> {
    parse_with_config(source, source_id, ParserConfig::default())
}

pub fn parse_with_config(
    source: &str,
    source_id: SourceId,
    config: ParserConfig,
) -> Result<Module, ParseOutcome> {
    let mut parser = Parser::new(source, config);
    parser.parse_module(source_id)
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    config: ParserConfig,
    errors: Vec<ParseError>,
    total_error_count: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, config: ParserConfig) -> Self {
        Parser {
            cursor: Cursor::new(source),
            config,
            errors: Vec::new(),
            total_error_count: 0,
        }
    }

    fn record_error(&mut self, line: usize, column: usize, code: ErrorCode) {
        tracing::debug!(line, column, ?code, "parse error recorded");
        self.total_error_count += 1;
        if self.errors.len() < self.config.max_errors {
            self.errors.push(ParseError { line, column, code });
        }
    }

    fn pos(&self) -> (usize, usize) {
        (self.cursor.line(), self.cursor.column())
    }

    // ---- top level -----------------------------------------------------

    fn parse_module(&mut self, source_id: SourceId) -> Result<Module, ParseOutcome> {
        let dialect = self.detect_dialect(&source_id);
        self.cursor.skip_whitespace();

        let mut module_attributes = Vec::new();
        while self.cursor.is_at("@[", 0) {
            let mut attrs = self.parse_attribute_block();
            module_attributes.append(&mut attrs);
            self.cursor.skip_whitespace();
        }

        let mut statements = Vec::new();
        let mut seen_keys = HashSet::new();
        let mut any_statement_seen = false;

        while !self.cursor.at_end() {
            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                break;
            }
            if self.cursor.is_at("#!", 0) {
                let (line, column) = self.pos();
                let code = if any_statement_seen {
                    ErrorCode::ShebangAfterStatements
                } else {
                    ErrorCode::MultipleShebang
                };
                self.record_error(line, column, code);
                self.recover_top_level();
                continue;
            }

            let (line, column) = self.pos();
            if let Some(stmt) = self.parse_statement() {
                if !seen_keys.insert(stmt.key.clone()) {
                    self.record_error(line, column, ErrorCode::DuplicateTopLevelKey);
                } else {
                    statements.push(stmt);
                }
                any_statement_seen = true;
            }
            self.cursor.skip_whitespace();
        }

        tracing::debug!(
            statements = statements.len(),
            errors = self.total_error_count,
            "module parse complete"
        );

        if !self.errors.is_empty() {
            return Err(ParseOutcome {
                errors: std::mem::take(&mut self.errors),
                total_error_count: self.total_error_count,
            });
        }

        let namespace = source_id.derive_namespace();
        Ok(Module::build(
            namespace,
            source_id,
            dialect,
            module_attributes,
            statements,
        ))
    }

    /// Shebang sniff, then extension fallback, then permissive default. The
    /// single `set_position` rewind undoes the speculative shebang probe
    /// when neither dialect marker is present.
    fn detect_dialect(&mut self, source_id: &SourceId) -> Dialect {
        if let Some(forced) = self.config.dialect_override {
            return forced;
        }
        self.cursor.skip_whitespace();
        let saved = (self.cursor.offset(), self.cursor.line(), self.cursor.column());
        if self.cursor.is_at("#!aml", 0) {
            self.cursor.consume_n(5);
            return Dialect::Aml;
        }
        if self.cursor.is_at("#!asl", 0) {
            self.cursor.consume_n(5);
            return Dialect::Asl;
        }
        self.cursor.set_position(saved.0, saved.1, saved.2);
        Dialect::from_extension(source_id.as_str()).unwrap_or(Dialect::Asl)
    }

    // ---- recovery --------------------------------------------------------

    /// Top-level recovery boundary: advance to the next newline or `;`.
    fn recover_top_level(&mut self) {
        while !self.cursor.at_end() && self.cursor.peek(0) != '\n' && self.cursor.peek(0) != ';' {
            self.cursor.consume();
        }
        if self.cursor.peek(0) == ';' {
            self.cursor.consume();
        }
    }

    /// Container recovery: the caller has already consumed one opening
    /// delimiter and wants to skip to its matching closer. Counts every
    /// bracket kind encountered (not just the one that opened this
    /// container) so nested malformed input doesn't close the wrong level.
    fn recover_container(&mut self) {
        let mut depth = 1usize;
        while depth > 0 && !self.cursor.at_end() {
            match self.cursor.peek(0) {
                '{' | '[' | '(' => {
                    depth += 1;
                    self.cursor.consume();
                }
                '}' | ']' | ')' => {
                    depth -= 1;
                    self.cursor.consume();
                }
                _ => {
                    self.cursor.consume();
                }
            }
        }
    }

    // ---- statements & attributes ------------------------------------------

    fn parse_statement(&mut self) -> Option<Statement> {
        self.cursor.skip_whitespace();
        let (line, column) = self.pos();
        let key = self.scan_ident();
        if key.is_empty() {
            self.record_error(line, column, ErrorCode::UnexpectedToken);
            self.recover_top_level();
            return None;
        }
        if is_reserved(&key) {
            self.record_error(line, column, ErrorCode::IdentifierIsKeyword);
        }

        self.cursor.skip_whitespace();
        let mut parent = None;
        if !self.cursor.is_operator(Operator::Assign) && self.cursor.is_operator(Operator::Colon) {
            self.cursor.consume_operator(Operator::Colon);
            self.cursor.skip_whitespace();
            let (pline, pcolumn) = self.pos();
            let parent_name = self.scan_ident();
            if parent_name.is_empty() {
                self.record_error(pline, pcolumn, ErrorCode::ExpectedIdentifier);
            } else {
                parent = Some(parent_name);
            }
            self.cursor.skip_whitespace();
        }

        let mut attributes = Vec::new();
        if self.cursor.is_at("@[", 0) {
            attributes = self.parse_attribute_block();
            self.cursor.skip_whitespace();
        }

        if !self.cursor.consume_operator(Operator::Assign) {
            let (aline, acolumn) = self.pos();
            self.record_error(aline, acolumn, ErrorCode::ExpectedAssign);
            self.recover_top_level();
            return None;
        }
        self.cursor.skip_whitespace();
        let value = self.parse_value();
        self.cursor.skip_whitespace();
        self.cursor.consume_operator(Operator::Comma);

        tracing::debug!(key = %key, "statement parsed");
        Some(Statement {
            key,
            attributes,
            value,
            parent,
        })
    }

    /// `@[ key ("=" literal)? ("," key ("=" literal)?)* "]"`. Caller has
    /// already confirmed `is_at("@[")`.
    fn parse_attribute_block(&mut self) -> Vec<Attribute> {
        let (block_line, block_column) = self.pos();
        self.cursor.consume_operator(Operator::At);
        self.cursor.consume_operator(Operator::LBracket);
        self.cursor.skip_whitespace();

        let mut attrs: Vec<Attribute> = Vec::new();
        if self.cursor.consume_operator(Operator::RBracket) {
            return attrs;
        }

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                self.record_error(block_line, block_column, ErrorCode::ExpectedArrayClose);
                return attrs;
            }

            let (kline, kcolumn) = self.pos();
            let key = self.scan_ident();
            if key.is_empty() {
                self.record_error(kline, kcolumn, ErrorCode::ExpectedIdentifier);
                self.recover_container();
                return attrs;
            }
            if is_reserved(&key) {
                self.record_error(kline, kcolumn, ErrorCode::AttributeIsKeyword);
            }

            self.cursor.skip_whitespace();
            let mut value = None;
            if self.cursor.consume_operator(Operator::Equal) {
                self.cursor.skip_whitespace();
                let (vline, vcolumn) = self.pos();
                let literal = self.parse_value();
                if literal.is_valid_attribute_literal() {
                    value = Some(literal);
                } else {
                    self.record_error(vline, vcolumn, ErrorCode::InvalidValueInAttribute);
                }
            }

            if attrs.iter().any(|existing| existing.key == key) {
                self.record_error(kline, kcolumn, ErrorCode::DuplicateAttributeKey);
            } else {
                attrs.push(Attribute { key, value });
            }

            self.cursor.skip_whitespace();
            if self.cursor.consume_operator(Operator::Comma) {
                continue;
            }
            if self.cursor.is_operator(Operator::RBracket) {
                break;
            }
            let (cline, ccolumn) = self.pos();
            self.record_error(cline, ccolumn, ErrorCode::MissingCommaInAttributes);
            self.recover_container();
            return attrs;
        }

        self.cursor.skip_whitespace();
        if !self.cursor.consume_operator(Operator::RBracket) {
            self.record_error(block_line, block_column, ErrorCode::ExpectedArrayClose);
            self.recover_container();
        }
        attrs
    }

    // ---- values ------------------------------------------------------------

    fn parse_value(&mut self) -> Value {
        self.cursor.skip_whitespace();
        let (line, column) = self.pos();

        if self.cursor.is_operator(Operator::Assign) {
            self.record_error(line, column, ErrorCode::AssignmentNotAllowedHere);
            self.cursor.consume_operator(Operator::Assign);
            return self.parse_value();
        }

        match self.cursor.peek(0) {
            '{' => self.parse_object(),
            '[' => self.parse_array(),
            '(' => self.parse_tuple(),
            '"' => self.parse_string(),
            '@' => self.parse_blob(),
            '#' => self.parse_number(),
            c if c == '-' || Cursor::is_digit(c) => self.parse_number(),
            c if Cursor::is_alpha(c) => self.parse_keyword_or_bare(),
            _ => {
                self.record_error(line, column, ErrorCode::UnexpectedToken);
                if !self.cursor.at_end() {
                    self.cursor.consume();
                }
                Value::Null
            }
        }
    }

    fn parse_object(&mut self) -> Value {
        let (line, column) = self.pos();
        self.cursor.consume_operator(Operator::LBrace);
        self.cursor.skip_whitespace();

        if self.cursor.consume_operator(Operator::RBrace) {
            self.record_error(line, column, ErrorCode::EmptyObjectNotAllowed);
            return Value::Object(Object::new(IndexMap::new()));
        }

        let mut fields = IndexMap::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                self.record_error(line, column, ErrorCode::ExpectedObjectClose);
                break;
            }
            if self.cursor.is_operator(Operator::RBrace) {
                break;
            }

            let (kline, kcolumn) = self.pos();
            let key = self.scan_ident();
            if key.is_empty() {
                self.record_error(kline, kcolumn, ErrorCode::ExpectedObjectField);
                self.recover_container();
                return Value::Object(Object::new(fields));
            }
            if is_reserved(&key) {
                self.record_error(kline, kcolumn, ErrorCode::InvalidKeyInObject);
            }

            self.cursor.skip_whitespace();
            if self.cursor.is_at("@[", 0) {
                // Field-level attribute blocks are parsed (and validated)
                // for their side-effecting errors, then discarded: Object
                // has no attribute-storage slot in the data model.
                let _ = self.parse_attribute_block();
                self.cursor.skip_whitespace();
            }

            if !self.cursor.consume_operator(Operator::Assign) {
                let (aline, acolumn) = self.pos();
                self.record_error(aline, acolumn, ErrorCode::ExpectedAssign);
            }
            let value = self.parse_value();

            if fields.contains_key(&key) {
                self.record_error(kline, kcolumn, ErrorCode::DuplicateFieldInObject);
            } else {
                fields.insert(key, value);
            }

            self.cursor.skip_whitespace();
            if self.cursor.consume_operator(Operator::Comma) {
                continue;
            }
            if self.cursor.is_operator(Operator::RBrace) || self.cursor.at_end() {
                break;
            }
            // whitespace alone separates fields; loop continues.
        }

        self.cursor.skip_whitespace();
        if !self.cursor.consume_operator(Operator::RBrace) {
            self.record_error(line, column, ErrorCode::ExpectedObjectClose);
            self.recover_container();
        }
        Value::Object(Object::new(fields))
    }

    fn parse_array(&mut self) -> Value {
        self.cursor.consume_operator(Operator::LBracket);
        self.cursor.skip_whitespace();

        let mut items = Vec::new();
        if self.cursor.consume_operator(Operator::RBracket) {
            return Value::Array(items);
        }

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                let (line, column) = self.pos();
                self.record_error(line, column, ErrorCode::ExpectedArrayClose);
                return Value::Array(items);
            }
            items.push(self.parse_value());
            self.cursor.skip_whitespace();

            if self.cursor.consume_operator(Operator::Comma) {
                self.cursor.skip_whitespace();
                if self.cursor.is_operator(Operator::RBracket) {
                    let (line, column) = self.pos();
                    self.record_error(line, column, ErrorCode::TrailingCommaInArray);
                    break;
                }
                continue;
            }
            if self.cursor.is_operator(Operator::RBracket) {
                break;
            }
            let (line, column) = self.pos();
            self.record_error(line, column, ErrorCode::MissingCommaInArray);
            self.recover_container();
            return Value::Array(items);
        }

        self.cursor.consume_operator(Operator::RBracket);
        Value::Array(items)
    }

    fn parse_tuple(&mut self) -> Value {
        let (line, column) = self.pos();
        self.cursor.consume_operator(Operator::LParen);
        self.cursor.skip_whitespace();

        if self.cursor.consume_operator(Operator::RParen) {
            self.record_error(line, column, ErrorCode::EmptyTupleElement);
            self.check_rocket_after_tuple();
            return Value::Tuple(vec![]);
        }

        let mut items = vec![self.parse_value()];
        self.cursor.skip_whitespace();

        loop {
            if self.cursor.is_operator(Operator::RParen) {
                break;
            }
            if self.cursor.consume_operator(Operator::Comma) {
                self.cursor.skip_whitespace();
                items.push(self.parse_value());
                self.cursor.skip_whitespace();
                continue;
            }
            let (cline, ccolumn) = self.pos();
            self.record_error(cline, ccolumn, ErrorCode::ExpectedCommaInTuple);
            self.recover_container();
            return Value::Tuple(items);
        }

        if !self.cursor.consume_operator(Operator::RParen) {
            self.record_error(line, column, ErrorCode::ExpectedTupleClose);
            self.recover_container();
            return Value::Tuple(items);
        }

        if items.len() < 2 {
            self.record_error(line, column, ErrorCode::TupleTooShort);
        }
        self.check_rocket_after_tuple();
        Value::Tuple(items)
    }

    fn check_rocket_after_tuple(&mut self) {
        if self.cursor.is_operator(Operator::Rocket) {
            let (line, column) = self.pos();
            self.record_error(line, column, ErrorCode::RocketOpNotValid);
            self.cursor.consume_operator(Operator::Rocket);
        }
    }

    fn parse_string(&mut self) -> Value {
        let (line, column) = self.pos();
        self.cursor.consume_operator(Operator::Quote);
        let mut content = String::new();
        loop {
            if self.cursor.at_end() {
                self.record_error(line, column, ErrorCode::UnterminatedString);
                break;
            }
            match self.cursor.peek(0) {
                '"' => {
                    self.cursor.consume();
                    break;
                }
                '\\' => {
                    self.cursor.consume();
                    match self.cursor.consume() {
                        'n' => content.push('\n'),
                        't' => content.push('\t'),
                        'r' => content.push('\r'),
                        '\\' => content.push('\\'),
                        '"' => content.push('"'),
                        // Unknown escapes pass through verbatim, for
                        // forward compatibility with future escapes.
                        other => {
                            content.push('\\');
                            content.push(other);
                        }
                    }
                }
                _ => content.push(self.cursor.consume()),
            }
        }
        Value::String(content)
    }

    /// `"@" IDENT? "`" (escape | char)* "`"`.
    fn parse_blob(&mut self) -> Value {
        self.cursor.consume_operator(Operator::At);
        let tag = if Cursor::is_alpha(self.cursor.peek(0)) {
            let (tline, tcolumn) = self.pos();
            let name = self.scan_ident();
            if is_reserved(&name) {
                self.record_error(tline, tcolumn, ErrorCode::IdentifierIsKeyword);
            }
            Some(name)
        } else {
            None
        };

        if !self.cursor.consume_operator(Operator::Backtick) {
            let (line, column) = self.pos();
            self.record_error(line, column, ErrorCode::ExpectedBacktick);
            return Value::Blob(Blob {
                content: String::new(),
                tag,
            });
        }

        let start = self.cursor.offset();
        loop {
            if self.cursor.at_end() {
                let (line, column) = self.pos();
                self.record_error(line, column, ErrorCode::UnterminatedFreeform);
                break;
            }
            if self.cursor.peek(0) == '`' && !self.cursor.is_escaped(self.cursor.offset()) {
                break;
            }
            self.cursor.consume();
        }
        let raw = self.cursor.substring(start, self.cursor.offset());
        self.cursor.consume_operator(Operator::Backtick);
        Value::Blob(Blob {
            content: unescape_backticks(&raw),
            tag,
        })
    }

    fn parse_number(&mut self) -> Value {
        let (line, column) = self.pos();
        let negative = self.cursor.peek(0) == '-';
        if negative {
            self.cursor.consume();
        }

        if self.cursor.peek(0) == '#' {
            self.cursor.consume();
            return self.finish_hex(line, column, negative);
        }
        if self.cursor.is_at("0x", 0) {
            self.cursor.consume_n(2);
            return self.finish_hex(line, column, negative);
        }

        let int_part = self.scan_digit_run();
        if int_part.is_empty() {
            self.record_error(line, column, ErrorCode::InvalidNumber);
            return Value::Numeric(Numeric::Integer(0));
        }

        let mut is_float = false;
        let mut frac_part = String::new();
        if self.cursor.peek(0) == '.' && Cursor::is_digit(self.cursor.peek(1)) {
            self.cursor.consume();
            is_float = true;
            frac_part = self.scan_digit_run();
        }

        let mut exponent = String::new();
        if matches!(self.cursor.peek(0), 'e' | 'E') {
            let saved = (self.cursor.offset(), self.cursor.line(), self.cursor.column());
            self.cursor.consume();
            let sign = if matches!(self.cursor.peek(0), '+' | '-') {
                self.cursor.consume().to_string()
            } else {
                String::new()
            };
            let digits = self.scan_digit_run();
            if digits.is_empty() {
                let (eline, ecolumn) = self.pos();
                self.record_error(eline, ecolumn, ErrorCode::InvalidExponent);
                self.cursor.set_position(saved.0, saved.1, saved.2);
            } else {
                is_float = true;
                exponent = format!("e{}{}", if sign == "-" { "-" } else { "+" }, digits);
            }
        }

        let mut text = String::new();
        if negative {
            text.push('-');
        }
        text.push_str(&int_part);
        if is_float {
            text.push('.');
            text.push_str(if frac_part.is_empty() { "0" } else { &frac_part });
            text.push_str(&exponent);
            match text.parse::<f64>() {
                Ok(f) => Value::Numeric(Numeric::Float(f)),
                Err(_) => {
                    self.record_error(line, column, ErrorCode::InvalidNumber);
                    Value::Numeric(Numeric::Float(0.0))
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => Value::Numeric(Numeric::Integer(n)),
                Err(_) => {
                    self.record_error(line, column, ErrorCode::InvalidNumber);
                    Value::Numeric(Numeric::Integer(0))
                }
            }
        }
    }

    fn finish_hex(&mut self, line: usize, column: usize, negative: bool) -> Value {
        let hex = self.scan_hex_run();
        if hex.is_empty() {
            self.record_error(line, column, ErrorCode::InvalidNumber);
            return Value::Numeric(Numeric::Integer(0));
        }
        match i64::from_str_radix(&hex, 16) {
            Ok(n) => Value::Numeric(Numeric::Integer(if negative { -n } else { n })),
            Err(_) => {
                self.record_error(line, column, ErrorCode::InvalidNumber);
                Value::Numeric(Numeric::Integer(0))
            }
        }
    }

    fn scan_digit_run(&mut self) -> String {
        let mut s = String::new();
        while Cursor::is_digit(self.cursor.peek(0)) || self.cursor.peek(0) == '_' {
            let c = self.cursor.consume();
            if c != '_' {
                s.push(c);
            }
        }
        s
    }

    fn scan_hex_run(&mut self) -> String {
        let mut s = String::new();
        while Cursor::is_hex_digit(self.cursor.peek(0)) || self.cursor.peek(0) == '_' {
            let c = self.cursor.consume();
            if c != '_' {
                s.push(c);
            }
        }
        s
    }

    fn parse_keyword_or_bare(&mut self) -> Value {
        let (line, column) = self.pos();
        if self.is_keyword_at("null") {
            self.cursor.consume_n(4);
            return Value::Null;
        }
        if self.is_keyword_at("true") {
            self.cursor.consume_n(4);
            return Value::Boolean(true);
        }
        if self.is_keyword_at("false") {
            self.cursor.consume_n(5);
            return Value::Boolean(false);
        }

        let text = self.scan_bare();
        if text.is_empty() {
            self.record_error(line, column, ErrorCode::UnexpectedToken);
            self.cursor.consume();
            return Value::Null;
        }
        if is_reserved(&text) {
            self.record_error(line, column, ErrorCode::IdentifierIsKeyword);
        }
        Value::Bare(text)
    }

    fn is_keyword_at(&self, word: &str) -> bool {
        self.cursor.is(word) && !Cursor::is_alphanumeric(self.cursor.peek(word.chars().count()))
    }

    /// Plain identifiers: statement/object/attribute keys, parent names,
    /// blob tags. No dots or colons.
    fn scan_ident(&mut self) -> String {
        let mut s = String::new();
        if !Cursor::is_alpha(self.cursor.peek(0)) {
            return s;
        }
        s.push(self.cursor.consume());
        while Cursor::is_alphanumeric(self.cursor.peek(0)) {
            s.push(self.cursor.consume());
        }
        s
    }

    /// Bare *values*: dotted/colon-segmented symbols. A `.`/`:` is only
    /// consumed when it is followed by another identifier character, which
    /// is what keeps a trailing or doubled separator from ever being
    /// swallowed — no rewind needed.
    fn scan_bare(&mut self) -> String {
        let mut s = String::new();
        if !Cursor::is_alpha(self.cursor.peek(0)) {
            return s;
        }
        s.push(self.cursor.consume());
        loop {
            if Cursor::is_alphanumeric(self.cursor.peek(0)) {
                s.push(self.cursor.consume());
            } else if matches!(self.cursor.peek(0), '.' | ':')
                && Cursor::is_alphanumeric(self.cursor.peek(1))
            {
                s.push(self.cursor.consume());
            } else {
                break;
            }
        }
        s
    }
}

fn unescape_backticks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'`') {
            out.push('`');
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Lookup;

    fn parse_ok(source: &str) -> Module {
        match parse(source, SourceId::Sentinel) {
            Ok(module) => module,
            Err(outcome) => panic!("expected successful parse, got {:?}", outcome.errors),
        }
    }

    fn parse_err(source: &str) -> ParseOutcome {
        match parse(source, SourceId::Sentinel) {
            Ok(module) => panic!("expected parse failure, got {:?}", module),
            Err(outcome) => outcome,
        }
    }

    #[test]
    fn parses_scalar_statements() {
        let module = parse_ok(
            "name := \"Badkraft\"\nage := 42\nadmin := true\nhealth := 20.0\nid := badkraft\n",
        );
        assert_eq!(module.get_string("name").unwrap(), "Badkraft");
        assert_eq!(module.get_long("age").unwrap(), 42);
        assert_eq!(module.get_boolean("admin").unwrap(), true);
        assert_eq!(module.get_double("health").unwrap(), 20.0);
        assert_eq!(module.get("id").unwrap().as_bare().unwrap(), "badkraft");
        assert!(module.get_string("id").is_err());
    }

    #[test]
    fn parses_nested_object_tuple_and_array() {
        let module = parse_ok(
            "player := { name := \"Grok\", pos := (10, 64, -300), inventory := [ \"a\", \"b\" ] }",
        );
        let player = module.get_object("player").unwrap();
        assert_eq!(player.get_string("name").unwrap(), "Grok");
        let pos = player.get_tuple("pos").unwrap();
        assert_eq!(pos[2].as_long().unwrap(), -300);
        assert_eq!(player.get_array("inventory").unwrap().len(), 2);
    }

    #[test]
    fn merges_module_level_attribute_blocks_in_order() {
        let module = parse_ok(
            "@[version=\"1.0.0\", mc_version=\"1.21.10\"]\n@[source=\"x\", debug=true, experimental]\nx := 1\n",
        );
        let keys: Vec<&str> = module.attributes().iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["version", "mc_version", "source", "debug", "experimental"]);
        assert!(module.attributes()[4].value.is_none());
        assert_eq!(
            module.attributes()[3].value.as_ref().unwrap().as_boolean().unwrap(),
            true
        );
    }

    #[test]
    fn rejects_duplicate_top_level_key() {
        let outcome = parse_err("a := 1\na := 2\n");
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DuplicateTopLevelKey));
    }

    #[test]
    fn rejects_short_and_empty_tuples() {
        let outcome = parse_err("x := (1)\n");
        assert!(outcome.errors.iter().any(|e| e.code == ErrorCode::TupleTooShort));

        let outcome = parse_err("x := ()\n");
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptyTupleElement));
    }

    #[test]
    fn rejects_non_scalar_attribute_literal() {
        let outcome = parse_err("x @[meta=[1,2]] := 1\n");
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidValueInAttribute));
    }

    #[test]
    fn hex_and_underscore_numbers() {
        let module = parse_ok("a := #ff\nb := 0xFF\nc := 1_000_000\n");
        assert_eq!(module.get_long("a").unwrap(), 255);
        assert_eq!(module.get_long("b").unwrap(), 255);
        assert_eq!(module.get_long("c").unwrap(), 1_000_000);
    }

    #[test]
    fn float_requires_dot_or_exponent() {
        let module = parse_ok("a := 1.5\nb := 2e3\nc := 4\n");
        assert!(module.get("a").unwrap().is_numeric());
        assert_eq!(module.get_double("a").unwrap(), 1.5);
        assert_eq!(module.get_double("b").unwrap(), 2000.0);
        assert!(module.get_long("c").is_ok());
    }

    #[test]
    fn blob_with_tag_and_escaped_backtick() {
        let module = parse_ok("x := @md`a \\` b`\n");
        let blob = module.get_blob("x").unwrap();
        assert_eq!(blob.tag.as_deref(), Some("md"));
        assert_eq!(blob.content, "a ` b");
    }

    #[test]
    fn dotted_bare_values_without_trailing_separator() {
        let module = parse_ok("x := minecraft:diamond_sword\n");
        assert_eq!(module.get("x").unwrap().as_bare().unwrap(), "minecraft:diamond_sword");
    }

    #[test]
    fn shebang_selects_dialect() {
        let module = parse_ok("#!aml\nx := 1\n");
        assert_eq!(module.dialect(), Dialect::Aml);
    }

    #[test]
    fn assignment_inside_a_container_is_rejected() {
        let outcome = parse_err("x := [ := 1 ]\n");
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::AssignmentNotAllowedHere));
    }

    #[test]
    fn error_budget_caps_recorded_errors_but_keeps_counting() {
        let mut source = String::new();
        for _ in 0..40 {
            source.push_str("x := (1)\n");
        }
        let outcome = parse_err(&source);
        assert_eq!(outcome.errors.len(), 25);
        assert!(outcome.total_error_count > 25);
    }
}
