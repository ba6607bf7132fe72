//! Tags, attributes, declarations and raw text.

use std::sync::Arc;

use quire_dtd::{ContentType, Element};

use super::core::ParseRun;
use super::{is_name_char, is_name_start};
use crate::config::{AttributePolicy, UnknownEndTagPolicy};
use crate::error::{IssueKind, ParseError};
use crate::event::{AttributeMap, SgmlEvent};

// =============================================================================
// Input Helpers
// =============================================================================

impl ParseRun<'_, '_, '_> {
    /// Read an SGML name starting at the next character, as written.
    pub(super) fn read_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        while let Some(c) = self.input.peek()? {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            let _ = self.input.read()?;
        }
        Ok(name)
    }

    fn skip_whitespace(&mut self) -> Result<(), ParseError> {
        while self.input.peek()?.is_some_and(char::is_whitespace) {
            let _ = self.input.read()?;
        }
        Ok(())
    }

    /// Discard everything up to and including the next `>`.
    fn skip_to_tag_close(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.input.read()? {
            if c == '>' {
                break;
            }
        }
        Ok(())
    }

    /// Discard the rest of a tag. A `<` also ends it and is left unread, so
    /// `</B<I>` still opens `I`.
    fn skip_tag_rest(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.input.read()? {
            match c {
                '>' => break,
                '<' => {
                    self.input.unread(c);
                    break;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tag Dispatch
// =============================================================================

impl ParseRun<'_, '_, '_> {
    /// Handle the character after a `<` in content.
    pub(super) fn tag_open(&mut self) -> Result<(), ParseError> {
        match self.input.peek()? {
            Some('/') => {
                let _ = self.input.read()?;
                self.end_tag_open()
            }
            Some('!') => {
                let _ = self.input.read()?;
                self.markup_declaration()
            }
            Some('?') => {
                let _ = self.input.read()?;
                self.processing_instruction()
            }
            Some(c) if is_name_start(c) => self.start_tag_open(),
            _ => {
                self.text.push('<');
                Ok(())
            }
        }
    }

    /// `<!--...-->` comments and other declarations are discarded.
    fn markup_declaration(&mut self) -> Result<(), ParseError> {
        if self.input.peek()? == Some('-') {
            let _ = self.input.read()?;
            if self.input.peek()? == Some('-') {
                let _ = self.input.read()?;
                return self.skip_comment();
            }
        }
        self.skip_to_tag_close()
    }

    /// Discard a comment body up to `-->`.
    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let mut dashes = 0_usize;
        while let Some(c) = self.input.read()? {
            match c {
                '-' => dashes += 1,
                '>' if dashes >= 2 => break,
                _ => dashes = 0,
            }
        }
        Ok(())
    }

    fn processing_instruction(&mut self) -> Result<(), ParseError> {
        self.check_cancelled()?;
        self.report(
            IssueKind::ProcessingInstruction,
            "processing instructions are not supported".to_string(),
        );
        self.skip_to_tag_close()
    }
}

// =============================================================================
// Start Tags
// =============================================================================

impl ParseRun<'_, '_, '_> {
    fn start_tag_open(&mut self) -> Result<(), ParseError> {
        self.check_cancelled()?;
        let name = self.read_name()?.to_ascii_uppercase();

        // STEP 1: Undefined elements are dropped along with their attributes.
        let Some(element) = self.dtd.element(&name).cloned() else {
            self.report(
                IssueKind::UndefinedElement,
                format!("undefined element <{name}>"),
            );
            return self.skip_tag_rest();
        };

        // STEP 2: Close elements until something accepts the new one.
        self.close_until_acceptable(&element)?;

        // STEP 3: Attributes.
        let attributes = self.read_attributes(&element)?;

        // STEP 4: Open it.
        self.open_element(&element, attributes)?;

        // STEP 5: Content types that end on their own.
        match element.content_type() {
            ContentType::Empty => self.close_current(),
            ContentType::Cdata | ContentType::Rcdata => self.scan_raw_text(&element),
            _ => Ok(()),
        }
    }

    /// Read attributes up to the end of the start tag.
    ///
    /// A `<` ends the tag without being consumed, so the next tag is still
    /// seen.
    fn read_attributes(&mut self, element: &Element) -> Result<AttributeMap, ParseError> {
        let mut attributes = AttributeMap::new();
        loop {
            self.skip_whitespace()?;
            let Some(c) = self.input.read()? else {
                break;
            };
            match c {
                '>' => break,
                '<' => {
                    self.input.unread(c);
                    break;
                }
                // `<BR/>`
                '/' => {}
                c if is_name_start(c) => {
                    self.input.unread(c);
                    let name = self.read_name()?.to_ascii_uppercase();
                    self.skip_whitespace()?;
                    let value = if self.input.peek()? == Some('=') {
                        let _ = self.input.read()?;
                        self.skip_whitespace()?;
                        self.read_attribute_value()?
                    } else {
                        String::new()
                    };
                    if self.config.attribute_policy == AttributePolicy::Declared
                        && !element.has_attribute_named(&name)
                    {
                        self.report(
                            IssueKind::UndefinedAttribute,
                            format!("undefined attribute {name} on <{}>", element.name()),
                        );
                    }
                    let _ = attributes.insert(name, value);
                }
                c => self.report(
                    IssueKind::MalformedAttribute,
                    format!("unexpected character {c:?} in <{}> tag", element.name()),
                ),
            }
        }
        Ok(attributes)
    }

    /// A quoted or bare attribute value, with references substituted.
    fn read_attribute_value(&mut self) -> Result<String, ParseError> {
        let mut value = String::new();
        match self.input.peek()? {
            Some(quote @ ('"' | '\'')) => {
                let _ = self.input.read()?;
                while let Some(c) = self.input.read()? {
                    match c {
                        c if c == quote => break,
                        '&' => self.attribute_reference(&mut value)?,
                        '\r' => {
                            self.skip_line_feed()?;
                            value.push(' ');
                        }
                        '\n' | '\t' => value.push(' '),
                        c => value.push(c),
                    }
                }
            }
            _ => {
                while let Some(c) = self.input.peek()? {
                    if c.is_whitespace() || c == '>' || c == '<' {
                        break;
                    }
                    let _ = self.input.read()?;
                    if c == '&' {
                        self.attribute_reference(&mut value)?;
                    } else {
                        value.push(c);
                    }
                }
            }
        }
        Ok(value)
    }
}

// =============================================================================
// End Tags
// =============================================================================

impl ParseRun<'_, '_, '_> {
    fn end_tag_open(&mut self) -> Result<(), ParseError> {
        if !self.input.peek()?.is_some_and(is_name_start) {
            self.text.push_str("</");
            return Ok(());
        }
        self.check_cancelled()?;
        let name = self.read_name()?.to_ascii_uppercase();
        self.skip_tag_rest()?;

        match self.dtd.element(&name).cloned() {
            Some(element) => self.close_element(&element),
            None => match self.config.unknown_end_tag {
                UnknownEndTagPolicy::Drop => {
                    self.report(
                        IssueKind::UndefinedElement,
                        format!("undefined element </{name}>"),
                    );
                    Ok(())
                }
                UnknownEndTagPolicy::SynthesizePcdata => {
                    let element = Arc::new(Element::new(&name, ContentType::Pcdata));
                    self.flush_text_as(ContentType::Pcdata, true)?;
                    self.emit(SgmlEvent::EndTag { element })
                }
            },
        }
    }
}

// =============================================================================
// Raw Text (CDATA / RCDATA)
// =============================================================================

impl ParseRun<'_, '_, '_> {
    /// Read the content of a `CDATA` or `RCDATA` element up to its end tag,
    /// then close it.
    ///
    /// Only a `</NAME` for this element (not followed by a name character)
    /// ends the content; any other markup is text. `RCDATA` still honours
    /// references.
    fn scan_raw_text(&mut self, element: &Element) -> Result<(), ParseError> {
        let references = element.content_type() == ContentType::Rcdata;
        while let Some(c) = self.input.read()? {
            match c {
                '<' => {
                    if self.at_end_tag_for(element.name())? {
                        return self.close_current();
                    }
                }
                '&' if references => self.reference_open()?,
                '\r' => {
                    self.skip_line_feed()?;
                    self.text.push('\n');
                }
                c => self.text.push(c),
            }
        }
        Ok(())
    }

    /// After a `<` in raw text: consume `/NAME...>` and return `true`, or
    /// move whatever was looked at into the pending text and return `false`.
    fn at_end_tag_for(&mut self, name: &str) -> Result<bool, ParseError> {
        if self.input.peek()? != Some('/') {
            self.text.push('<');
            return Ok(false);
        }
        let _ = self.input.read()?;

        let mut seen = String::from("</");
        for expected in name.chars() {
            match self.input.read()? {
                Some(c) if c.eq_ignore_ascii_case(&expected) => seen.push(c),
                Some(c) => {
                    self.input.unread(c);
                    self.text.push_str(&seen);
                    return Ok(false);
                }
                None => {
                    self.text.push_str(&seen);
                    return Ok(false);
                }
            }
        }
        if self.input.peek()?.is_some_and(is_name_char) {
            self.text.push_str(&seen);
            return Ok(false);
        }
        self.skip_tag_rest()?;
        Ok(true)
    }
}
