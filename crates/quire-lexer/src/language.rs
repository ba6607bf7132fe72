use core::ops::Range;

use strum_macros::{Display, EnumString};

use crate::c_like::{CDialect, CLikeTokenizer};
use crate::smalltalk::SmalltalkTokenizer;
use crate::token::Token;
use crate::tokenizer::LanguageTokenizer;

/// Every language with a built-in tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// Java.
    Java,
    /// ANSI C.
    C,
    /// C++.
    Cpp,
    /// Smalltalk-80.
    Smalltalk,
}

impl Language {
    /// A tokenizer for `range` of `text`, starting in the default state.
    #[must_use]
    pub fn tokenizer<'a>(
        self,
        text: &'a str,
        range: Range<usize>,
    ) -> Box<dyn LanguageTokenizer + 'a> {
        match self {
            Self::Java => Box::new(CLikeTokenizer::new(text, range, CDialect::Java)),
            Self::C => Box::new(CLikeTokenizer::new(text, range, CDialect::C)),
            Self::Cpp => Box::new(CLikeTokenizer::new(text, range, CDialect::Cpp)),
            Self::Smalltalk => Box::new(SmalltalkTokenizer::new(text, range)),
        }
    }
}

/// Lex the whole of `text`.
#[must_use]
pub fn tokenize(language: Language, text: &str) -> Vec<Token> {
    language.tokenizer(text, 0..text.len()).tokenize_all()
}
