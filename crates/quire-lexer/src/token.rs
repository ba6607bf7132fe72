use strum_macros::Display;

/// The classification of a lexed range, as a syntax highlighter sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    /// No more tokens in the range.
    EndOfInput,
    /// A reserved word or reserved symbol.
    Keyword,
    /// Identifiers, numbers and punctuation.
    Token,
    /// A complete string, character or symbol literal.
    Constant,
    /// A literal that is still open at the end of the range.
    MultiLineConstant,
    /// A complete comment.
    Comment,
    /// A comment that is still open at the end of the range.
    MultiLineComment,
}

/// One lexed range of the input, as byte offsets into the full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What the range holds.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the last character.
    pub end: usize,
}

impl Token {
    /// The token's text within `source`, the text it was lexed from.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or_default()
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token covers no text (only `EndOfInput` does).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The only state carried from one lexed range to the next.
///
/// Editors re-lex one line (or one damaged range) at a time: set the state
/// that held at the range start, lex, and store the state read back at the
/// end for the next range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexState {
    /// The range ended inside a string literal.
    pub in_multi_line_constant: bool,
    /// The range ended inside a block comment.
    pub in_multi_line_comment: bool,
}
