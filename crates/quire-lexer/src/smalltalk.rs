//! Tokenizer for Smalltalk source.

use core::ops::Range;

use crate::cursor::Cursor;
use crate::token::{LexState, Token, TokenKind};
use crate::tokenizer::LanguageTokenizer;

const PSEUDO_VARIABLES: &[&str] = &["self", "super", "true", "false", "nil"];

/// Lexes one range of Smalltalk source.
///
/// Comments (`"..."`) and strings (`'...'`) may span lines, so a range that
/// ends inside one leaves the matching [`LexState`] flag set.
#[derive(Debug, Clone)]
pub struct SmalltalkTokenizer<'a> {
    cursor: Cursor<'a>,
    state: LexState,
}

impl<'a> SmalltalkTokenizer<'a> {
    /// Lex `range` of `text`. Token offsets are relative to the whole text.
    #[must_use]
    pub fn new(text: &'a str, range: Range<usize>) -> Self {
        Self {
            cursor: Cursor::new(text, range),
            state: LexState::default(),
        }
    }

    // ===== Token shapes =====

    fn consume_comment(&mut self, start: usize) -> Token {
        self.cursor.consume_while(|c| c != '"');
        if self.cursor.consume().is_some() {
            self.state.in_multi_line_comment = false;
            self.cursor.token_from(start, TokenKind::Comment)
        } else {
            self.state.in_multi_line_comment = true;
            self.cursor.token_from(start, TokenKind::MultiLineComment)
        }
    }

    /// Consume a string body up to its closing quote. A doubled quote stands
    /// for one quote character.
    fn consume_string(&mut self, start: usize) -> Token {
        loop {
            match self.cursor.consume() {
                None => {
                    self.state.in_multi_line_constant = true;
                    return self.cursor.token_from(start, TokenKind::MultiLineConstant);
                }
                Some('\'') if self.cursor.peek() == Some('\'') => {
                    let _ = self.cursor.consume();
                }
                Some('\'') => {
                    self.state.in_multi_line_constant = false;
                    return self.cursor.token_from(start, TokenKind::Constant);
                }
                Some(_) => {}
            }
        }
    }

    /// Consume a literal introduced by `#`: `#symbol`, `#at:put:`, `#+` or
    /// `#'any text'`. A lone `#` (as in `#(...)`) is punctuation.
    fn consume_symbol(&mut self, start: usize) -> Token {
        let _ = self.cursor.consume();
        match self.cursor.peek() {
            Some('\'') => {
                let _ = self.cursor.consume();
                self.consume_string(start)
            }
            Some(c) if c.is_alphabetic() => {
                self.cursor
                    .consume_while(|c| c.is_alphanumeric() || c == ':' || c == '_');
                self.cursor.token_from(start, TokenKind::Constant)
            }
            Some(c) if is_binary_selector_char(c) => {
                self.cursor.consume_while(is_binary_selector_char);
                self.cursor.token_from(start, TokenKind::Constant)
            }
            _ => self.cursor.token_from(start, TokenKind::Token),
        }
    }

    fn consume_identifier(&mut self, start: usize) -> Token {
        self.cursor.consume_while(char::is_alphanumeric);
        let kind = if PSEUDO_VARIABLES.contains(&self.cursor.slice(start)) {
            TokenKind::Keyword
        } else {
            TokenKind::Token
        };
        self.cursor.token_from(start, kind)
    }

    /// Consume a number such as `42`, `16r1F`, `2e10` or `3.14`. A period is
    /// only part of the number when a digit follows; otherwise it ends the
    /// statement.
    fn consume_number(&mut self, start: usize) -> Token {
        self.cursor.consume_while(|c| c.is_ascii_alphanumeric());
        while self.cursor.peek() == Some('.')
            && self.cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            let _ = self.cursor.consume();
            self.cursor.consume_while(|c| c.is_ascii_alphanumeric());
        }
        self.cursor.token_from(start, TokenKind::Token)
    }

    fn consume_single(&mut self, start: usize, kind: TokenKind) -> Token {
        let _ = self.cursor.consume();
        self.cursor.token_from(start, kind)
    }
}

impl LanguageTokenizer for SmalltalkTokenizer<'_> {
    fn next_token(&mut self) -> Token {
        let start = self.cursor.position();
        if self.cursor.at_end() {
            return self.cursor.end_of_input();
        }

        // STEP 1: Resume a comment or string left open by the previous range.
        if self.state.in_multi_line_comment {
            return self.consume_comment(start);
        }
        if self.state.in_multi_line_constant {
            return self.consume_string(start);
        }

        self.cursor.consume_while(char::is_whitespace);
        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return self.cursor.end_of_input();
        };

        // STEP 2: Dispatch on the first character.
        match c {
            '"' => {
                let _ = self.cursor.consume();
                self.consume_comment(start)
            }
            '\'' => {
                let _ = self.cursor.consume();
                self.consume_string(start)
            }
            '#' => self.consume_symbol(start),
            '$' if self.cursor.peek_at(1).is_some() => {
                let _ = self.cursor.consume();
                self.consume_single(start, TokenKind::Constant)
            }
            '^' | '_' => self.consume_single(start, TokenKind::Keyword),
            ':' if self.cursor.peek_at(1) == Some('=') => {
                let _ = self.cursor.consume();
                self.consume_single(start, TokenKind::Keyword)
            }
            c if c.is_alphabetic() => self.consume_identifier(start),
            c if c.is_ascii_digit() => self.consume_number(start),
            _ => self.consume_single(start, TokenKind::Token),
        }
    }

    fn state(&self) -> LexState {
        self.state
    }

    fn set_state(&mut self, state: LexState) {
        self.state = state;
    }
}

const fn is_binary_selector_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '\\' | '<' | '>' | '=' | '~' | '@' | '%' | '|' | '&' | '?' | ','
    )
}
