use std::collections::HashSet;
use std::io::BufRead;
use std::sync::Arc;

use quire_common::warning::{clear_warnings, warn_once};
use quire_dtd::{ContentType, Dtd, Element};

use crate::config::{CancellationToken, ParserConfig};
use crate::error::{IssueKind, ParseError, ParseIssue};
use crate::event::SgmlEvent;
use crate::input::{CharSource, InputStack, ReadSource, StrSource};
use crate::listener::{Flow, SgmlListener};

/// A push parser that validates markup against a [`Dtd`] while it reads.
///
/// Register listeners with [`add_listener`](Self::add_listener), then call
/// one of the `parse` methods. Events are delivered synchronously, in
/// document order, to every listener in registration order. Missing end
/// tags are inferred from the DTD's content models, so every start tag is
/// matched by an end tag event.
///
/// Recoverable problems never stop the parse; they are collected and can
/// be read with [`issues`](Self::issues) afterwards.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use quire_dtd::{ContentType, Dtd, Element};
/// use quire_sgml::{EventCollector, SgmlParser};
///
/// let mut dtd = Dtd::new("note");
/// let _ = dtd.add_element(Element::new("NOTE", ContentType::Pcdata));
///
/// let mut collector = EventCollector::new();
/// {
///     let mut parser = SgmlParser::new(Arc::new(dtd));
///     parser.add_listener(&mut collector);
///     parser.parse_str("<note>hello").unwrap();
/// }
/// let rendered: Vec<String> = collector.events().iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["<NOTE>", "\"hello\"", "</NOTE>", "EOF"]);
/// ```
pub struct SgmlParser<'l> {
    dtd: Arc<Dtd>,
    config: ParserConfig,
    listeners: Vec<&'l mut dyn SgmlListener>,
    issues: Vec<ParseIssue>,
    cancellation: Option<CancellationToken>,
}

impl<'l> SgmlParser<'l> {
    /// Create a strict parser for `dtd`.
    #[must_use]
    pub fn new(dtd: Arc<Dtd>) -> Self {
        Self::with_config(dtd, ParserConfig::strict())
    }

    /// Create a parser for `dtd` with the given dialect settings.
    #[must_use]
    pub fn with_config(dtd: Arc<Dtd>, config: ParserConfig) -> Self {
        Self {
            dtd,
            config,
            listeners: Vec::new(),
            issues: Vec::new(),
            cancellation: None,
        }
    }

    /// Stop parsing with [`ParseError::Cancelled`] once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn add_listener(&mut self, listener: &'l mut dyn SgmlListener) {
        self.listeners.push(listener);
    }

    /// The DTD this parser validates against.
    #[must_use]
    pub const fn dtd(&self) -> &Arc<Dtd> {
        &self.dtd
    }

    /// The dialect settings.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Recoverable problems found so far, across all parses.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Take the recorded issues, leaving none behind.
    pub fn take_issues(&mut self) -> Vec<ParseIssue> {
        std::mem::take(&mut self.issues)
    }

    /// Parse a whole document from `source`.
    ///
    /// # Errors
    ///
    /// Fails when the source fails, when a listener aborts, or when the
    /// cancellation token fires. Events delivered before the failure stay
    /// delivered; `ParsingFinished` is only sent on success.
    ///
    /// Each parse starts with a fresh set of logged warnings, so a problem
    /// seen in an earlier document is logged again when it recurs.
    pub fn parse(&mut self, source: &mut dyn CharSource) -> Result<(), ParseError> {
        clear_warnings();
        let mut run = ParseRun {
            dtd: Arc::clone(&self.dtd),
            config: &self.config,
            listeners: &mut self.listeners,
            issues: &mut self.issues,
            cancellation: self.cancellation.as_ref(),
            input: InputStack::new(source, self.config.max_entity_depth),
            open_elements: Vec::new(),
            content_type: ContentType::ModelPcdata,
            inclusions: HashSet::new(),
            exclusions: HashSet::new(),
            text: String::new(),
        };
        run.run()
    }

    /// Parse a document held in memory.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_str(&mut self, text: &str) -> Result<(), ParseError> {
        self.parse(&mut StrSource::new(text))
    }

    /// Parse UTF-8 text from a buffered reader.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse); invalid UTF-8 is reported as an
    /// [`std::io::ErrorKind::InvalidData`] I/O error.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<(), ParseError> {
        self.parse(&mut ReadSource::new(reader))
    }
}

/// State of one `parse()` call. Dropped when the call returns.
pub(super) struct ParseRun<'p, 'l, 's> {
    pub(super) dtd: Arc<Dtd>,
    pub(super) config: &'p ParserConfig,
    listeners: &'p mut Vec<&'l mut dyn SgmlListener>,
    issues: &'p mut Vec<ParseIssue>,
    cancellation: Option<&'p CancellationToken>,
    pub(super) input: InputStack<'s>,
    /// Innermost element last.
    pub(super) open_elements: Vec<Arc<Element>>,
    /// Content type of the current element, `MODEL_PCDATA` at document level.
    pub(super) content_type: ContentType,
    /// Union of the inclusions of every open element.
    pub(super) inclusions: HashSet<String>,
    /// Union of the exclusions of every open element.
    pub(super) exclusions: HashSet<String>,
    /// Text accumulated since the last flush point.
    pub(super) text: String,
}

impl ParseRun<'_, '_, '_> {
    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.input.read()? {
            match c {
                '&' => self.reference_open()?,
                '<' => self.tag_open()?,
                '\r' => {
                    self.skip_line_feed()?;
                    self.text.push('\n');
                }
                c => self.text.push(c),
            }
        }
        self.finish()
    }

    /// Close everything still open, flush document-level text, and announce
    /// the end of the document.
    fn finish(&mut self) -> Result<(), ParseError> {
        while !self.open_elements.is_empty() {
            self.close_current()?;
        }
        self.flush_text(true)?;
        self.emit(SgmlEvent::ParsingFinished)
    }

    /// After a CR, consume the LF of a CR LF pair.
    pub(super) fn skip_line_feed(&mut self) -> Result<(), ParseError> {
        if self.input.peek()? == Some('\n') {
            let _ = self.input.read()?;
        }
        Ok(())
    }

    /// Deliver `event` to every listener, stopping at the first abort.
    pub(super) fn emit(&mut self, event: SgmlEvent) -> Result<(), ParseError> {
        for listener in self.listeners.iter_mut() {
            if let Flow::Abort(reason) = listener.handle_event(&event) {
                return Err(ParseError::Aborted { reason });
            }
        }
        Ok(())
    }

    /// Record a recoverable problem and log it once.
    pub(super) fn report(&mut self, kind: IssueKind, message: String) {
        let issue = ParseIssue {
            kind,
            message,
            line: self.input.line(),
        };
        let _ = warn_once("SGML", &issue.message);
        self.issues.push(issue);
    }

    pub(super) fn check_cancelled(&self) -> Result<(), ParseError> {
        if self.cancellation.is_some_and(CancellationToken::is_cancelled) {
            return Err(ParseError::Cancelled);
        }
        Ok(())
    }
}
