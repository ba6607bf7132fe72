//! The HTML 3.2 dialect.
//!
//! [`HtmlParser`] is an [`SgmlParser`] over [`html_dtd`] with the lenient
//! [`ParserConfig::html`] settings:
//! - any attribute is accepted without an issue
//! - `&nbsp;` is delivered as its own flagged space event
//! - an end tag for an unknown element yields a synthetic end tag event

mod dtd;
mod entities;

use std::io::BufRead;

pub use dtd::{build_html_dtd, html_dtd};

use crate::config::{CancellationToken, ParserConfig};
use crate::error::{ParseError, ParseIssue};
use crate::input::CharSource;
use crate::listener::SgmlListener;
use crate::parser::SgmlParser;

/// A parser for HTML 3.2 documents.
///
/// # Example
///
/// ```
/// use quire_sgml::{EventCollector, HtmlParser};
///
/// let mut collector = EventCollector::new();
/// {
///     let mut parser = HtmlParser::new();
///     parser.add_listener(&mut collector);
///     parser.parse_str("<P>one<P>two").unwrap();
/// }
/// let rendered: Vec<String> = collector.events().iter().map(ToString::to_string).collect();
/// assert_eq!(
///     rendered,
///     ["<P>", "\"one\"", "</P>", "<P>", "\"two\"", "</P>", "EOF"]
/// );
/// ```
pub struct HtmlParser<'l> {
    inner: SgmlParser<'l>,
}

impl Default for HtmlParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'l> HtmlParser<'l> {
    /// Create a parser over the shared HTML 3.2 DTD.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SgmlParser::with_config(html_dtd(), ParserConfig::html()),
        }
    }

    /// Stop parsing with [`ParseError::Cancelled`] once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            inner: self.inner.with_cancellation(token),
        }
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn add_listener(&mut self, listener: &'l mut dyn SgmlListener) {
        self.inner.add_listener(listener);
    }

    /// Parse a whole document from `source`.
    ///
    /// # Errors
    ///
    /// See [`SgmlParser::parse`].
    pub fn parse(&mut self, source: &mut dyn CharSource) -> Result<(), ParseError> {
        self.inner.parse(source)
    }

    /// Parse a document held in memory.
    ///
    /// # Errors
    ///
    /// See [`SgmlParser::parse`].
    pub fn parse_str(&mut self, text: &str) -> Result<(), ParseError> {
        self.inner.parse_str(text)
    }

    /// Parse UTF-8 text from a buffered reader.
    ///
    /// # Errors
    ///
    /// See [`SgmlParser::parse_reader`].
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<(), ParseError> {
        self.inner.parse_reader(reader)
    }

    /// Recoverable problems found so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        self.inner.issues()
    }

    /// Take the recorded issues, leaving none behind.
    pub fn take_issues(&mut self) -> Vec<ParseIssue> {
        self.inner.take_issues()
    }

    /// The underlying SGML parser.
    #[must_use]
    pub const fn inner(&self) -> &SgmlParser<'l> {
        &self.inner
    }
}
