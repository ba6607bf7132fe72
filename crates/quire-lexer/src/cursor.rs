use core::ops::Range;

use crate::token::{Token, TokenKind};

/// A position within a byte range of a text.
///
/// Offsets are bytes into the whole text, so tokens can be mapped back
/// without adjusting for where the range began.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    position: usize,
    end: usize,
}

/// Move `index` back to the nearest character boundary of `text`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl<'a> Cursor<'a> {
    /// Cover `range` of `text`, clamped to the text and to character
    /// boundaries.
    pub(crate) fn new(text: &'a str, range: Range<usize>) -> Self {
        let end = floor_char_boundary(text, range.end);
        let position = floor_char_boundary(text, range.start).min(end);
        Self {
            text,
            position,
            end,
        }
    }

    pub(crate) const fn position(&self) -> usize {
        self.position
    }

    pub(crate) const fn at_end(&self) -> bool {
        self.position >= self.end
    }

    fn rest(&self) -> &'a str {
        &self.text[self.position..self.end]
    }

    /// Peek at the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at the character `offset` characters ahead.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Whether the remaining range starts with `prefix`.
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume and return the next character.
    pub(crate) fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consume characters while `predicate` holds.
    pub(crate) fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            let _ = self.consume();
        }
    }

    /// A token of `kind` from `start` to the current position.
    pub(crate) const fn token_from(&self, start: usize, kind: TokenKind) -> Token {
        Token {
            kind,
            start,
            end: self.position,
        }
    }

    /// The `EndOfInput` token at the end of the range.
    pub(crate) const fn end_of_input(&self) -> Token {
        Token {
            kind: TokenKind::EndOfInput,
            start: self.end,
            end: self.end,
        }
    }

    /// The text from `start` to the current position.
    pub(crate) fn slice(&self, start: usize) -> &'a str {
        &self.text[start..self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_clamped_to_char_boundaries() {
        // 'é' is two bytes at offsets 1..3
        let cursor = Cursor::new("aéb", 2..10);
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek(), Some('é'));
    }

    #[test]
    fn test_consume_stops_at_range_end() {
        let mut cursor = Cursor::new("abcdef", 1..3);
        assert_eq!(cursor.consume(), Some('b'));
        assert_eq!(cursor.consume(), Some('c'));
        assert_eq!(cursor.consume(), None);
        assert!(cursor.at_end());
    }
}
