//! Events delivered to listeners.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use quire_dtd::Element;
use strum_macros::Display;

/// Attribute values of one start tag, keyed by upper-case attribute name.
pub type AttributeMap = HashMap<String, String>;

/// One step of the parse.
///
/// Every `StartTag` is eventually matched by an `EndTag` for the same
/// element, and `ParsingFinished` is always the last event of a successful
/// parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SgmlEvent {
    /// An element was opened.
    StartTag {
        /// The element's declaration.
        element: Arc<Element>,
        /// The attributes given on the tag.
        attributes: AttributeMap,
    },
    /// An element was closed, explicitly or implicitly.
    EndTag {
        /// The element's declaration.
        element: Arc<Element>,
    },
    /// A run of text between two flush points.
    CharacterData {
        /// The text, with line ends normalized to `\n`.
        text: String,
        /// Set when the text is a single space standing for `&nbsp;`.
        non_breaking: bool,
    },
    /// The document ended; nothing follows.
    ParsingFinished,
}

/// The shape of an [`SgmlEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EventKind {
    /// [`SgmlEvent::StartTag`]
    StartTag,
    /// [`SgmlEvent::EndTag`]
    EndTag,
    /// [`SgmlEvent::CharacterData`]
    CharacterData,
    /// [`SgmlEvent::ParsingFinished`]
    ParsingFinished,
}

impl SgmlEvent {
    /// The event's kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::StartTag { .. } => EventKind::StartTag,
            Self::EndTag { .. } => EventKind::EndTag,
            Self::CharacterData { .. } => EventKind::CharacterData,
            Self::ParsingFinished => EventKind::ParsingFinished,
        }
    }

    /// The element of a start or end tag.
    #[must_use]
    pub fn element(&self) -> Option<&Arc<Element>> {
        match self {
            Self::StartTag { element, .. } | Self::EndTag { element } => Some(element),
            _ => None,
        }
    }

    /// The text of a character-data event.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::CharacterData { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The attributes of a start tag.
    #[must_use]
    pub const fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Self::StartTag { attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}

/// Compact one-line form, used by the CLI and by tests:
/// `<A HREF="x">`, `</A>`, `"text"`, `&nbsp;`, `EOF`.
impl fmt::Display for SgmlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                element,
                attributes,
            } => {
                write!(f, "<{}", element.name())?;
                let mut names: Vec<&String> = attributes.keys().collect();
                names.sort();
                for name in names {
                    write!(f, " {name}={:?}", attributes[name])?;
                }
                write!(f, ">")
            }
            Self::EndTag { element } => write!(f, "</{}>", element.name()),
            Self::CharacterData {
                non_breaking: true, ..
            } => write!(f, "&nbsp;"),
            Self::CharacterData { text, .. } => write!(f, "{text:?}"),
            Self::ParsingFinished => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_dtd::ContentType;

    #[test]
    fn test_display_sorts_attributes() {
        let element = Arc::new(Element::new("img", ContentType::Empty));
        let attributes = AttributeMap::from([
            ("SRC".to_string(), "a.gif".to_string()),
            ("ALT".to_string(), "logo".to_string()),
        ]);
        let event = SgmlEvent::StartTag {
            element,
            attributes,
        };
        assert_eq!(event.to_string(), r#"<IMG ALT="logo" SRC="a.gif">"#);
        assert_eq!(event.kind(), EventKind::StartTag);
    }

    #[test]
    fn test_display_text_events() {
        let text = SgmlEvent::CharacterData {
            text: "a\nb".to_string(),
            non_breaking: false,
        };
        assert_eq!(text.to_string(), r#""a\nb""#);
        assert_eq!(text.text(), Some("a\nb"));

        let nbsp = SgmlEvent::CharacterData {
            text: " ".to_string(),
            non_breaking: true,
        };
        assert_eq!(nbsp.to_string(), "&nbsp;");
        assert_eq!(SgmlEvent::ParsingFinished.to_string(), "EOF");
    }
}
