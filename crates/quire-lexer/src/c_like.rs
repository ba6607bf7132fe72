//! Tokenizer for Java, C and C++ source.

use core::ops::Range;

use strum_macros::{Display, EnumString};

use crate::cursor::Cursor;
use crate::token::{LexState, Token, TokenKind};
use crate::tokenizer::LanguageTokenizer;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

/// Words C++ reserves beyond C. Names with underscores (`static_cast` and
/// friends) are left out since only all-lowercase-letter words classify.
const CPP_EXTRA_KEYWORDS: &[&str] = &[
    "asm", "bool", "catch", "class", "delete", "explicit", "export", "false", "friend",
    "mutable", "namespace", "new", "nullptr", "operator", "private", "protected", "public",
    "template", "this", "throw", "true", "try", "typeid", "typename", "using", "virtual",
];

/// Which member of the C family is being lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CDialect {
    /// Java, with `//` comments.
    Java,
    /// C without `//` comments.
    C,
    /// C++: the C keywords plus the C++ ones.
    Cpp,
}

impl CDialect {
    /// Whether `//` starts a comment. Plain C only has block comments.
    #[must_use]
    pub const fn has_line_comments(self) -> bool {
        !matches!(self, Self::C)
    }

    /// Whether `word` is reserved in this dialect.
    #[must_use]
    pub fn is_keyword(self, word: &str) -> bool {
        match self {
            Self::Java => JAVA_KEYWORDS.contains(&word),
            Self::C => C_KEYWORDS.contains(&word),
            Self::Cpp => C_KEYWORDS.contains(&word) || CPP_EXTRA_KEYWORDS.contains(&word),
        }
    }
}

/// Lexes one range of C-family source.
///
/// ```
/// use quire_lexer::{CDialect, CLikeTokenizer, LanguageTokenizer, TokenKind};
///
/// let source = "int count = 0; // start";
/// let mut tokenizer = CLikeTokenizer::new(source, 0..source.len(), CDialect::Java);
/// let kinds: Vec<TokenKind> = tokenizer.tokenize_all().iter().map(|t| t.kind).collect();
/// assert_eq!(kinds[0], TokenKind::Keyword);
/// assert_eq!(kinds.last(), Some(&TokenKind::Comment));
/// ```
#[derive(Debug, Clone)]
pub struct CLikeTokenizer<'a> {
    cursor: Cursor<'a>,
    dialect: CDialect,
    state: LexState,
}

impl<'a> CLikeTokenizer<'a> {
    /// Lex `range` of `text`. Token offsets are relative to the whole text.
    #[must_use]
    pub fn new(text: &'a str, range: Range<usize>, dialect: CDialect) -> Self {
        Self {
            cursor: Cursor::new(text, range),
            dialect,
            state: LexState::default(),
        }
    }

    /// The dialect this tokenizer was created for.
    #[must_use]
    pub const fn dialect(&self) -> CDialect {
        self.dialect
    }

    // ===== Token shapes =====

    /// Consume the body of a `/* */` comment whose opener is already behind
    /// the cursor (or lies in an earlier range).
    fn consume_block_comment(&mut self, start: usize) -> Token {
        loop {
            if self.cursor.starts_with("*/") {
                let _ = self.cursor.consume();
                let _ = self.cursor.consume();
                self.state.in_multi_line_comment = false;
                return self.cursor.token_from(start, TokenKind::Comment);
            }
            if self.cursor.consume().is_none() {
                self.state.in_multi_line_comment = true;
                return self.cursor.token_from(start, TokenKind::MultiLineComment);
            }
        }
    }

    /// Consume the body of a quoted literal up to the closing `quote`.
    ///
    /// An unescaped line end also ends the literal, leaving the line end for
    /// the whitespace skip. A backslash escapes the next character, including
    /// a line end, which is how a literal continues onto the next line.
    fn consume_literal(&mut self, start: usize, quote: char) -> Token {
        loop {
            match self.cursor.peek() {
                None => {
                    self.state.in_multi_line_constant = true;
                    return self.cursor.token_from(start, TokenKind::MultiLineConstant);
                }
                Some('\\') => {
                    let _ = self.cursor.consume();
                    if self.cursor.consume() == Some('\r') && self.cursor.peek() == Some('\n') {
                        let _ = self.cursor.consume();
                    }
                }
                Some(c) if c == quote => {
                    let _ = self.cursor.consume();
                    self.state.in_multi_line_constant = false;
                    return self.cursor.token_from(start, TokenKind::Constant);
                }
                Some('\n' | '\r') => {
                    self.state.in_multi_line_constant = false;
                    return self.cursor.token_from(start, TokenKind::Constant);
                }
                Some(_) => {
                    let _ = self.cursor.consume();
                }
            }
        }
    }

    /// Consume an identifier and classify it against the keyword set.
    fn consume_identifier(&mut self, start: usize) -> Token {
        self.cursor.consume_while(is_identifier_char);
        let word = self.cursor.slice(start);
        let kind = if is_lowercase_word(word) && self.dialect.is_keyword(word) {
            TokenKind::Keyword
        } else {
            TokenKind::Token
        };
        self.cursor.token_from(start, kind)
    }

    /// Consume a numeric literal: digits, radix and exponent letters,
    /// suffixes and decimal points.
    fn consume_number(&mut self, start: usize) -> Token {
        self.cursor
            .consume_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
        self.cursor.token_from(start, TokenKind::Token)
    }
}

impl LanguageTokenizer for CLikeTokenizer<'_> {
    fn next_token(&mut self) -> Token {
        let start = self.cursor.position();
        if self.cursor.at_end() {
            return self.cursor.end_of_input();
        }

        // STEP 1: Resume a construct left open by the previous range.
        if self.state.in_multi_line_comment {
            return self.consume_block_comment(start);
        }
        if self.state.in_multi_line_constant {
            return self.consume_literal(start, '"');
        }

        self.cursor.consume_while(char::is_whitespace);
        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return self.cursor.end_of_input();
        };

        // STEP 2: Dispatch on the first character.
        match c {
            '/' if self.cursor.peek_at(1) == Some('/') && self.dialect.has_line_comments() => {
                self.cursor.consume_while(|c| !is_line_end(c));
                self.cursor.token_from(start, TokenKind::Comment)
            }
            '/' if self.cursor.peek_at(1) == Some('*') => {
                let _ = self.cursor.consume();
                let _ = self.cursor.consume();
                self.consume_block_comment(start)
            }
            '"' | '\'' => {
                let _ = self.cursor.consume();
                self.consume_literal(start, c)
            }
            c if is_identifier_start(c) => self.consume_identifier(start),
            c if c.is_ascii_digit() => self.consume_number(start),
            _ => {
                let _ = self.cursor.consume();
                self.cursor.token_from(start, TokenKind::Token)
            }
        }
    }

    fn state(&self) -> LexState {
        self.state
    }

    fn set_state(&mut self, state: LexState) {
        self.state = state;
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

const fn is_line_end(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Keywords are only matched when spelled entirely in lower-case letters.
fn is_lowercase_word(word: &str) -> bool {
    word.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        assert_eq!("cpp".parse::<CDialect>().ok(), Some(CDialect::Cpp));
        assert_eq!(CDialect::Java.to_string(), "java");
    }

    #[test]
    fn test_keyword_sets_differ() {
        assert!(CDialect::Java.is_keyword("synchronized"));
        assert!(!CDialect::C.is_keyword("class"));
        assert!(CDialect::Cpp.is_keyword("class"));
        assert!(CDialect::Cpp.is_keyword("typedef"));
    }

    #[test]
    fn test_lowercase_word() {
        assert!(is_lowercase_word("while"));
        assert!(!is_lowercase_word("While"));
        assert!(!is_lowercase_word("wchar_t"));
    }
}
