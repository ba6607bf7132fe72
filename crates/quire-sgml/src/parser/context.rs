//! Open-element bookkeeping: acceptability, implicit closing, and the
//! text flush points.

use std::sync::Arc;

use quire_common::warning::LOG_TARGET;
use quire_dtd::{ContentType, Element};

use super::core::ParseRun;
use crate::error::{IssueKind, ParseError};
use crate::event::{AttributeMap, SgmlEvent};

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

// =============================================================================
// Text Flushing
// =============================================================================

impl ParseRun<'_, '_, '_> {
    /// Turn the pending text into one `CharacterData` event, as seen from the
    /// current element.
    ///
    /// Before an end tag exactly one trailing line end is dropped.
    pub(super) fn flush_text(&mut self, before_end_tag: bool) -> Result<(), ParseError> {
        self.flush_text_as(self.content_type, before_end_tag)
    }

    pub(super) fn flush_text_as(
        &mut self,
        content_type: ContentType,
        before_end_tag: bool,
    ) -> Result<(), ParseError> {
        self.check_cancelled()?;
        if self.text.is_empty() {
            return Ok(());
        }
        let mut text = std::mem::take(&mut self.text);
        if before_end_tag && text.ends_with('\n') {
            let _ = text.pop();
        }
        if text.is_empty() {
            return Ok(());
        }

        if self.open_elements.is_empty() {
            if is_blank(&text) {
                return Ok(());
            }
        } else if !content_type.permits_text() {
            if !is_blank(&text) {
                let name = self.current_name().unwrap_or_default().to_string();
                self.report(
                    IssueKind::UnexpectedText,
                    format!("text {:?} is not allowed in <{name}>", text.trim()),
                );
            }
            return Ok(());
        }

        self.emit(SgmlEvent::CharacterData {
            text,
            non_breaking: false,
        })
    }

    /// Flush, then deliver a single flagged space for `&nbsp;`.
    pub(super) fn emit_non_breaking_space(&mut self) -> Result<(), ParseError> {
        self.flush_text(false)?;
        if !self.content_type.permits_text() && !self.open_elements.is_empty() {
            return Ok(());
        }
        self.emit(SgmlEvent::CharacterData {
            text: " ".to_string(),
            non_breaking: true,
        })
    }
}

// =============================================================================
// Open Element Stack
// =============================================================================

impl ParseRun<'_, '_, '_> {
    fn current_name(&self) -> Option<&str> {
        self.open_elements.last().map(|element| element.name())
    }

    /// Flush the parent's text, open `element`, and announce it.
    pub(super) fn open_element(
        &mut self,
        element: &Arc<Element>,
        attributes: AttributeMap,
    ) -> Result<(), ParseError> {
        self.flush_text(false)?;
        self.open_elements.push(Arc::clone(element));
        self.content_type = element.content_type();
        self.inclusions.extend(element.inclusions().iter().cloned());
        self.exclusions.extend(element.exclusions().iter().cloned());
        self.emit(SgmlEvent::StartTag {
            element: Arc::clone(element),
            attributes,
        })
    }

    /// Flush, pop the current element, and announce its end.
    pub(super) fn close_current(&mut self) -> Result<(), ParseError> {
        let Some(element) = self.open_elements.last().cloned() else {
            return Ok(());
        };
        self.flush_text(true)?;
        let _ = self.open_elements.pop();
        self.refresh_context();
        self.emit(SgmlEvent::EndTag { element })
    }

    /// Close `element` and everything opened inside it, innermost first.
    ///
    /// An end tag for an element that is not open is reported and ignored.
    pub(super) fn close_element(&mut self, element: &Element) -> Result<(), ParseError> {
        let Some(position) = self
            .open_elements
            .iter()
            .rposition(|open| open.name() == element.name())
        else {
            self.report(
                IssueKind::UnexpectedEndTag,
                format!("end tag </{}> does not match an open element", element.name()),
            );
            return Ok(());
        };
        while self.open_elements.len() > position {
            self.close_current()?;
        }
        Ok(())
    }

    /// Recompute the cached context after a pop.
    fn refresh_context(&mut self) {
        self.content_type = self
            .open_elements
            .last()
            .map_or(ContentType::ModelPcdata, |element| element.content_type());
        self.inclusions.clear();
        self.exclusions.clear();
        for element in &self.open_elements {
            self.inclusions.extend(element.inclusions().iter().cloned());
            self.exclusions.extend(element.exclusions().iter().cloned());
        }
    }
}

// =============================================================================
// Acceptability
// =============================================================================

impl ParseRun<'_, '_, '_> {
    /// Whether the current context admits `element`.
    fn is_acceptable(&self, element: &Element) -> bool {
        let name = element.name();
        if self.exclusions.contains(name) {
            return false;
        }
        match self.open_elements.last() {
            None => self.document_level_accepts(element),
            Some(current) => current.can_accept(element) || self.inclusions.contains(name),
        }
    }

    /// Whether `element` would be admitted if only the outermost `depth`
    /// open elements remained open.
    fn accepts_at_depth(&self, depth: usize, element: &Element) -> bool {
        let ancestors = &self.open_elements[..depth];
        let name = element.name();
        if ancestors.iter().any(|open| open.excludes(name)) {
            return false;
        }
        match ancestors.last() {
            None => self.document_level_accepts(element),
            Some(parent) => {
                parent.can_accept(element) || ancestors.iter().any(|open| open.includes(name))
            }
        }
    }

    /// The document level admits the root element, and anything at all
    /// while the root element is not open.
    fn document_level_accepts(&self, element: &Element) -> bool {
        let root = self.dtd.root_name();
        element.name() == root
            || self
                .open_elements
                .first()
                .is_none_or(|outermost| outermost.name() != root)
    }

    /// Make `element` acceptable by closing elements, innermost first, until
    /// an ancestor (or the document level) admits it.
    ///
    /// If nothing admits it, the problem is reported and nothing is closed;
    /// the element will be opened inside the current one.
    pub(super) fn close_until_acceptable(&mut self, element: &Element) -> Result<(), ParseError> {
        if self.is_acceptable(element) {
            return Ok(());
        }
        let acceptor = (0..self.open_elements.len())
            .rev()
            .find(|&depth| self.accepts_at_depth(depth, element));

        let Some(depth) = acceptor else {
            let context = self.current_name().unwrap_or_default().to_string();
            self.report(
                IssueKind::UnexpectedElement,
                format!("<{}> is not allowed in <{context}>", element.name()),
            );
            return Ok(());
        };
        while self.open_elements.len() > depth {
            if let Some(current) = self.current_name() {
                log::debug!(
                    target: LOG_TARGET,
                    "implicitly closing <{current}> before <{}>",
                    element.name()
                );
            }
            self.close_current()?;
        }
        Ok(())
    }
}
