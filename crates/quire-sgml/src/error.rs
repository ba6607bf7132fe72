//! Parse failures and recoverable parse issues.
//!
//! There are two severities. A [`ParseIssue`] is recorded and parsing
//! continues with a well-defined fallback (skip the tag, keep the text
//! literally). A [`ParseError`] ends the whole `parse()` call; events already
//! delivered stay delivered.

use core::fmt;
use std::io;

use strum_macros::Display;
use thiserror::Error;

/// A failure that aborts parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The character source failed (including invalid UTF-8 input).
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// A listener asked the parser to stop.
    #[error("parse aborted by listener: {reason}")]
    Aborted {
        /// The reason given by the listener.
        reason: String,
    },

    /// The parser's cancellation token was triggered.
    #[error("parse cancelled")]
    Cancelled,
}

/// What kind of recoverable problem a [`ParseIssue`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IssueKind {
    /// A start or end tag names an element the DTD does not define.
    UndefinedElement,
    /// An attribute is not declared on its element (strict dialect only).
    UndefinedAttribute,
    /// An entity reference names an entity the DTD does not define.
    UndefinedEntity,
    /// Unexpected characters inside a start tag.
    MalformedAttribute,
    /// An end tag for an element that is not open.
    UnexpectedEndTag,
    /// A start tag that no open element accepts; it is opened in place.
    UnexpectedElement,
    /// Non-whitespace text inside an element that only holds children.
    UnexpectedText,
    /// A `<?...>` processing instruction, which is not supported.
    ProcessingInstruction,
    /// An entity reference that would recurse or nest too deeply.
    EntityDepthExceeded,
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// The category of the problem.
    pub kind: IssueKind,
    /// A human-readable description.
    pub message: String,
    /// 1-based line of the caller's input where the problem was noticed.
    pub line: usize,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
