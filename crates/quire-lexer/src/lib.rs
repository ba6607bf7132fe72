//! Resumable tokenizers for syntax coloring.
//!
//! Each tokenizer lexes one byte range of a larger text and reports tokens
//! with offsets into the whole text. The only state that crosses range
//! boundaries is a [`LexState`], which says whether the range ended inside a
//! comment or a string. An editor re-lexes the lines an edit touched, then
//! keeps going while the state at a line end differs from the stored one.
//!
//! ```
//! use quire_lexer::{CDialect, CLikeTokenizer, LanguageTokenizer, TokenKind};
//!
//! let source = "/* first\nsecond */ x";
//! let line_end = source.find('\n').unwrap();
//!
//! let mut first = CLikeTokenizer::new(source, 0..line_end, CDialect::C);
//! assert_eq!(first.next_token().kind, TokenKind::MultiLineComment);
//! assert!(first.state().in_multi_line_comment);
//!
//! let mut second = CLikeTokenizer::new(source, line_end + 1..source.len(), CDialect::C);
//! second.set_state(first.state());
//! assert_eq!(second.next_token().kind, TokenKind::Comment);
//! assert!(!second.state().in_multi_line_comment);
//! ```

mod cursor;

/// Java, C and C++.
pub mod c_like;
/// Picking a tokenizer by name.
pub mod language;
/// Smalltalk.
pub mod smalltalk;
/// Tokens and the cross-range state.
pub mod token;
/// The tokenizer trait.
pub mod tokenizer;

pub use c_like::{CDialect, CLikeTokenizer};
pub use language::{Language, tokenize};
pub use smalltalk::SmalltalkTokenizer;
pub use token::{LexState, Token, TokenKind};
pub use tokenizer::LanguageTokenizer;
