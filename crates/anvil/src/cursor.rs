//! Source cursor.
//!
//! A mutable read position over an immutable source buffer: a reusable
//! character-level cursor the parser can peek, consume, and rewind at will.
//!
//! Positions are tracked as `(offset, line, column)`, all 1-based except
//! `offset`, which is a character index into the buffer (not a byte index —
//! the buffer is decoded once into a `Vec<char>` so indexing and slicing
//! never split a multi-byte code point).

use crate::operators::Operator;

pub struct Cursor<'a> {
    #[allow(dead_code)]
    source: &'a str,
    chars: Vec<char>,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            source,
            chars: source.chars().collect(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.chars.len()
    }

    /// Character `offset` positions ahead of the cursor, or `\0` past end.
    pub fn peek(&self, offset: usize) -> char {
        self.chars.get(self.offset + offset).copied().unwrap_or('\0')
    }

    /// Does `literal` match starting `offset` characters ahead, without
    /// advancing?
    pub fn is_at(&self, literal: &str, offset: usize) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(offset + i) == c)
    }

    pub fn is(&self, literal: &str) -> bool {
        self.is_at(literal, 0)
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.is(op.symbol())
    }

    /// Advance one character, updating line/column. Returns the consumed
    /// character, or `\0` if already at end (a no-op).
    pub fn consume(&mut self) -> char {
        let c = self.peek(0);
        if c != '\0' {
            self.offset += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    pub fn consume_n(&mut self, n: usize) -> String {
        (0..n).map(|_| self.consume()).collect()
    }

    /// Advance past `op` iff it matches at the current position.
    pub fn consume_operator(&mut self, op: Operator) -> bool {
        if self.is_operator(op) {
            self.consume_n(op.len());
            true
        } else {
            false
        }
    }

    /// Skip spaces, tabs, CR, LF, `//` line comments, and nestable `/* */`
    /// block comments. Comments never reach the grammar.
    pub fn skip_whitespace(&mut self) {
        loop {
            match self.peek(0) {
                ' ' | '\t' | '\r' | '\n' => {
                    self.consume();
                }
                '/' if self.peek(1) == '/' => {
                    while !self.at_end() && self.peek(0) != '\n' {
                        self.consume();
                    }
                }
                '/' if self.peek(1) == '*' => {
                    self.consume();
                    self.consume();
                    let mut depth = 1usize;
                    while depth > 0 && !self.at_end() {
                        if self.peek(0) == '/' && self.peek(1) == '*' {
                            self.consume();
                            self.consume();
                            depth += 1;
                        } else if self.peek(0) == '*' && self.peek(1) == '/' {
                            self.consume();
                            self.consume();
                            depth -= 1;
                        } else {
                            self.consume();
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// True if an odd number of backslashes immediately precede `index`.
    pub fn is_escaped(&self, index: usize) -> bool {
        let mut count = 0usize;
        let mut i = index;
        while i > 0 {
            i -= 1;
            if self.chars.get(i) == Some(&'\\') {
                count += 1;
            } else {
                break;
            }
        }
        count % 2 == 1
    }

    pub fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    pub fn is_hex_digit(c: char) -> bool {
        c.is_ascii_hexdigit()
    }

    pub fn is_alpha(c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    pub fn is_alphanumeric(c: char) -> bool {
        Cursor::is_alpha(c) || c.is_ascii_digit()
    }

    /// Borrowed slice of source text between two character indices.
    pub fn substring(&self, start: usize, end: usize) -> String {
        let start = start.min(self.chars.len());
        let end = end.min(self.chars.len());
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }

    /// Single-shot rewind: restore a previously captured position. Used to
    /// undo a speculative lookahead (e.g. probing for a shebang) rather than
    /// to back out of committed parsing.
    pub fn set_position(&mut self, offset: usize, line: usize, column: usize) {
        self.offset = offset;
        self.line = line;
        self.column = column;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.consume();
        cursor.consume();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.consume(); // the newline
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
    }

    #[test]
    fn peek_past_end_is_nul() {
        let cursor = Cursor::new("x");
        assert_eq!(cursor.peek(5), '\0');
    }

    #[test]
    fn skip_whitespace_handles_nested_block_comments() {
        let mut cursor = Cursor::new("/* a /* b */ c */x");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(0), 'x');
    }

    #[test]
    fn skip_whitespace_handles_line_comments() {
        let mut cursor = Cursor::new("// comment\nx");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(0), 'x');
    }

    #[test]
    fn is_escaped_counts_preceding_backslashes() {
        // chars: a \ \ " b -- two backslashes cancel, so the quote at
        // index 3 is not itself escaped.
        let cursor = Cursor::new("a\\\\\"b");
        assert!(!cursor.is_escaped(3));
        // chars: a \ " b -- one backslash, so the quote at index 2 is escaped.
        let cursor = Cursor::new("a\\\"b");
        assert!(cursor.is_escaped(2));
    }

    #[test]
    fn consume_operator_advances_by_symbol_length() {
        let mut cursor = Cursor::new(":= rest");
        assert!(cursor.consume_operator(Operator::Assign));
        assert_eq!(cursor.offset(), 2);
        assert!(!cursor.consume_operator(Operator::Assign));
    }

    #[test]
    fn set_position_is_a_single_shot_rewind() {
        let mut cursor = Cursor::new("#!aml\nrest");
        let (off, line, col) = (cursor.offset(), cursor.line(), cursor.column());
        cursor.skip_whitespace();
        assert!(cursor.is("#!aml"));
        cursor.set_position(off, line, col);
        assert_eq!(cursor.offset(), off);
        assert!(cursor.is("#!aml"));
    }
}
