//! Serializing an event stream back to markup.

use quire_dtd::ContentType;

use crate::event::SgmlEvent;
use crate::listener::{Flow, SgmlListener};

/// A listener that writes the events it receives as normalized markup.
///
/// Every element gets explicit start and end tags (except `EMPTY` elements,
/// which have no end tag), attributes are written sorted and double-quoted,
/// and text is escaped with numeric character references so the output
/// re-parses to the same events under any DTD that declares the same
/// elements.
#[derive(Debug, Clone, Default)]
pub struct MarkupWriter {
    output: String,
    raw_text: bool,
    pending_line_end: bool,
}

impl MarkupWriter {
    /// Create a writer with empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The markup written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the writer, returning its markup.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    fn escape_text(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '&' => self.output.push_str("&#38;"),
                '<' => self.output.push_str("&#60;"),
                '>' => self.output.push_str("&#62;"),
                // A raw carriage return would come back as a line feed.
                '\r' => self.output.push_str("&#13;"),
                c => self.output.push(c),
            }
        }
    }

    fn escape_attribute(&mut self, value: &str) {
        for c in value.chars() {
            match c {
                '&' => self.output.push_str("&#38;"),
                '"' => self.output.push_str("&#34;"),
                // Raw line ends and tabs in a value are read back as spaces.
                '\n' => self.output.push_str("&#10;"),
                '\r' => self.output.push_str("&#13;"),
                '\t' => self.output.push_str("&#9;"),
                c => self.output.push(c),
            }
        }
    }
}

impl SgmlListener for MarkupWriter {
    fn start_tag(&mut self, event: &SgmlEvent) -> Flow {
        let SgmlEvent::StartTag {
            element,
            attributes,
        } = event
        else {
            return Flow::Continue;
        };
        self.pending_line_end = false;
        self.output.push('<');
        self.output.push_str(element.name());

        let mut names: Vec<&String> = attributes.keys().collect();
        names.sort();
        for name in names {
            self.output.push(' ');
            self.output.push_str(name);
            self.output.push_str("=\"");
            self.escape_attribute(&attributes[name]);
            self.output.push('"');
        }
        self.output.push('>');
        self.raw_text = element.content_type() == ContentType::Cdata;
        Flow::Continue
    }

    fn end_tag(&mut self, event: &SgmlEvent) -> Flow {
        let SgmlEvent::EndTag { element } = event else {
            return Flow::Continue;
        };
        // The parser drops one line end before an end tag; keep a text
        // event's own trailing line end by writing a second one.
        if std::mem::take(&mut self.pending_line_end) {
            self.output.push('\n');
        }
        self.raw_text = false;
        if element.content_type() != ContentType::Empty {
            self.output.push_str("</");
            self.output.push_str(element.name());
            self.output.push('>');
        }
        Flow::Continue
    }

    fn character_data(&mut self, event: &SgmlEvent) -> Flow {
        let SgmlEvent::CharacterData { text, non_breaking } = event else {
            return Flow::Continue;
        };
        if *non_breaking {
            self.output.push_str("&nbsp;");
            self.pending_line_end = false;
        } else {
            if self.raw_text {
                self.output.push_str(text);
            } else {
                self.escape_text(text);
            }
            self.pending_line_end = text.ends_with('\n');
        }
        Flow::Continue
    }

    fn parsing_finished(&mut self, _event: &SgmlEvent) -> Flow {
        if std::mem::take(&mut self.pending_line_end) {
            self.output.push('\n');
        }
        Flow::Continue
    }
}
