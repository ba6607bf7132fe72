use strum_macros::{Display, EnumString};

/// The rule governing what an element may contain.
///
/// Displays and parses in the upper-case SGML spelling (`PCDATA`,
/// `MODEL_PCDATA`, ...); parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ContentType {
    /// Parsed character data only, no child elements.
    Pcdata,
    /// Raw text; markup and references are not recognized (`<SCRIPT>`).
    Cdata,
    /// Text in which only character and entity references are recognized.
    Rcdata,
    /// No content at all; the element closes as soon as it opens.
    Empty,
    /// Child elements only, drawn from the content model.
    Model,
    /// Child elements from the content model interleaved with text.
    ModelPcdata,
}

impl ContentType {
    /// Whether character data inside an element of this type is delivered.
    ///
    /// `MODEL` and `EMPTY` elements are purely structural: stray text between
    /// their children is swallowed.
    #[must_use]
    pub const fn permits_text(self) -> bool {
        !matches!(self, Self::Model | Self::Empty)
    }

    /// Whether child elements are governed by an explicit content model.
    #[must_use]
    pub const fn has_model(self) -> bool {
        matches!(self, Self::Model | Self::ModelPcdata)
    }

    /// Whether content is scanned as raw text up to the matching end tag.
    #[must_use]
    pub const fn is_raw_text(self) -> bool {
        matches!(self, Self::Cdata | Self::Rcdata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_uses_sgml_spelling() {
        assert_eq!(ContentType::Pcdata.to_string(), "PCDATA");
        assert_eq!(ContentType::ModelPcdata.to_string(), "MODEL_PCDATA");
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(ContentType::from_str("rcdata"), Ok(ContentType::Rcdata));
        assert_eq!(ContentType::from_str("Model_Pcdata"), Ok(ContentType::ModelPcdata));
        assert!(ContentType::from_str("ANY").is_err());
    }

    #[test]
    fn test_text_permission() {
        assert!(ContentType::Pcdata.permits_text());
        assert!(ContentType::ModelPcdata.permits_text());
        assert!(!ContentType::Model.permits_text());
        assert!(!ContentType::Empty.permits_text());
    }
}
