//! A streaming SGML parser that validates against a DTD while it reads.
//!
//! The parser pulls characters from a [`CharSource`] and pushes
//! [`SgmlEvent`]s to registered [`SgmlListener`]s. It never builds a tree.
//! Omitted end tags are inferred from the DTD's content models, so listeners
//! always see a properly nested stream of start and end tags.
//!
//! # Modules
//!
//! - [`input`]: character sources and the entity-expansion input stack
//! - [`parser`]: the state machine ([`SgmlParser`])
//! - [`html`]: the HTML 3.2 DTD and [`HtmlParser`]
//! - [`writer`]: [`MarkupWriter`], which serializes events back to markup
//!
//! # Example
//!
//! ```
//! use quire_sgml::{EventCollector, HtmlParser, SgmlEvent};
//!
//! let mut collector = EventCollector::new();
//! {
//!     let mut parser = HtmlParser::new();
//!     parser.add_listener(&mut collector);
//!     parser.parse_str("<ul><li>one<li>two</ul>").unwrap();
//! }
//! let items = collector
//!     .events()
//!     .iter()
//!     .filter(|event| matches!(event, SgmlEvent::StartTag { element, .. } if element.name() == "LI"))
//!     .count();
//! assert_eq!(items, 2);
//! ```

/// Parser dialect settings and cancellation.
pub mod config;
/// Fatal errors and recoverable issues.
pub mod error;
/// Parse events.
pub mod event;
/// The HTML 3.2 dialect.
pub mod html;
/// Character input.
pub mod input;
/// The listener contract.
pub mod listener;
/// The SGML state machine.
pub mod parser;
/// Markup serialization.
pub mod writer;

pub use config::{
    AttributePolicy, CancellationToken, DEFAULT_MAX_ENTITY_DEPTH, ParserConfig,
    UnknownEndTagPolicy,
};
pub use error::{IssueKind, ParseError, ParseIssue};
pub use event::{AttributeMap, EventKind, SgmlEvent};
pub use html::{HtmlParser, build_html_dtd, html_dtd};
pub use input::{CharSource, ReadSource, StrSource};
pub use listener::{EventCollector, Flow, SgmlListener};
pub use parser::SgmlParser;
pub use writer::MarkupWriter;
