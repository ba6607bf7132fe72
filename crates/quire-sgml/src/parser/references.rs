//! Character references (`&#38;`, `&#x26;`) and entity references (`&amp;`).

use std::sync::Arc;

use quire_common::warning::LOG_TARGET;

use super::core::ParseRun;
use super::is_name_start;
use crate::error::{IssueKind, ParseError};

/// Decode a numeric character reference. Values below 256 are Latin-1.
fn decode_code_point(code: u32) -> Option<char> {
    u8::try_from(code).map_or_else(|_| char::from_u32(code), |byte| Some(char::from(byte)))
}

/// Replace the decimal character references in entity replacement text.
///
/// Used where replacement text is inserted literally (attribute values), so
/// that `&#38;` still means `&` there.
fn decode_character_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let decoded = after[..digits]
            .parse::<u32>()
            .ok()
            .and_then(decode_code_point);
        match decoded {
            Some(c) => {
                out.push(c);
                rest = after[digits..].strip_prefix(';').unwrap_or(&after[digits..]);
            }
            None => {
                out.push_str("&#");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

impl ParseRun<'_, '_, '_> {
    /// Handle the character after a `&` in content.
    ///
    /// Entity frames exhausted while the reference is read stay open until
    /// it has been handled, so `&e` at the very end of `e`'s own text is
    /// still seen as recursive.
    pub(super) fn reference_open(&mut self) -> Result<(), ParseError> {
        self.input.hold_exhausted(true);
        let result = self.reference_body();
        self.input.hold_exhausted(false);
        result
    }

    fn reference_body(&mut self) -> Result<(), ParseError> {
        match self.input.peek()? {
            Some('#') => {
                let _ = self.input.read()?;
                if let Some(c) = self.read_character_reference()? {
                    self.text.push(c);
                }
                Ok(())
            }
            Some(c) if is_name_start(c) => self.entity_reference(),
            _ => {
                self.text.push('&');
                Ok(())
            }
        }
    }

    /// Read the digits after `&#` and an optional `;`.
    ///
    /// A malformed or unrepresentable reference yields `None`; it is only
    /// logged, never reported as an issue.
    fn read_character_reference(&mut self) -> Result<Option<char>, ParseError> {
        let hex = matches!(self.input.peek()?, Some('x' | 'X'));
        if hex {
            let _ = self.input.read()?;
        }
        let mut digits = String::new();
        while let Some(c) = self.input.peek()? {
            let is_digit = if hex {
                c.is_ascii_hexdigit()
            } else {
                c.is_ascii_digit()
            };
            if !is_digit {
                break;
            }
            digits.push(c);
            let _ = self.input.read()?;
        }
        if self.input.peek()? == Some(';') {
            let _ = self.input.read()?;
        }

        let radix = if hex { 16 } else { 10 };
        let decoded = u32::from_str_radix(&digits, radix)
            .ok()
            .and_then(decode_code_point);
        if decoded.is_none() {
            log::debug!(target: LOG_TARGET, "dropping character reference &#{digits};");
        }
        Ok(decoded)
    }

    /// Read the name after `&` and expand the entity in place.
    fn entity_reference(&mut self) -> Result<(), ParseError> {
        let name = self.read_name()?;
        if self.input.peek()? == Some(';') {
            let _ = self.input.read()?;
        }

        if self.config.non_breaking_space_entity.as_deref() == Some(name.as_str()) {
            return self.emit_non_breaking_space();
        }

        let dtd = Arc::clone(&self.dtd);
        let Some(entity) = dtd.entity(&name) else {
            self.report(
                IssueKind::UndefinedEntity,
                format!("undefined entity &{name};"),
            );
            self.text.push('&');
            self.text.push_str(&name);
            return Ok(());
        };

        match self.input.push_entity(&name, entity.replacement_text()) {
            Ok(()) => {
                log::debug!(target: LOG_TARGET, "expanding entity &{name};");
            }
            Err(refused) => {
                self.report(
                    IssueKind::EntityDepthExceeded,
                    format!("entity &{name}; not expanded: {refused}"),
                );
                self.text.push('&');
                self.text.push_str(&name);
            }
        }
        Ok(())
    }

    /// Substitute a reference inside an attribute value. Unknown entities
    /// stay literal without an issue, since bare `&` is common in URLs.
    pub(super) fn attribute_reference(&mut self, value: &mut String) -> Result<(), ParseError> {
        match self.input.peek()? {
            Some('#') => {
                let _ = self.input.read()?;
                if let Some(c) = self.read_character_reference()? {
                    value.push(c);
                }
            }
            Some(c) if is_name_start(c) => {
                let name = self.read_name()?;
                let terminated = self.input.peek()? == Some(';');
                if terminated {
                    let _ = self.input.read()?;
                }
                if self.config.non_breaking_space_entity.as_deref() == Some(name.as_str()) {
                    value.push(' ');
                } else if let Some(entity) = self.dtd.entity(&name) {
                    value.push_str(&decode_character_references(entity.replacement_text()));
                } else {
                    value.push('&');
                    value.push_str(&name);
                    if terminated {
                        value.push(';');
                    }
                }
            }
            _ => value.push('&'),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_code_points() {
        assert_eq!(decode_code_point(38), Some('&'));
        assert_eq!(decode_code_point(233), Some('é'));
        assert_eq!(decode_code_point(0x20AC), Some('€'));
        assert_eq!(decode_code_point(0xD800), None);
    }

    #[test]
    fn test_decode_replacement_text() {
        assert_eq!(decode_character_references("&#38;"), "&");
        assert_eq!(decode_character_references("a&#60;b&#62;c"), "a<b>c");
        assert_eq!(decode_character_references("&#;x"), "&#;x");
        assert_eq!(decode_character_references("plain"), "plain");
    }
}
