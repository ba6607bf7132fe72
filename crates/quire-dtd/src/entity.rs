/// A named text-substitution macro, referenced in documents as `&name;`.
///
/// Names are case-sensitive (`&Eacute;` and `&eacute;` are different
/// entities). The replacement text is scanned again by the parser, so it may
/// itself contain character references or markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    replacement: String,
}

impl Entity {
    /// Create an entity.
    #[must_use]
    pub fn new(name: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replacement: replacement.into(),
        }
    }

    /// An entity whose replacement is the numeric character reference for
    /// `code_point`, e.g. `&#233;`.
    #[must_use]
    pub fn character(name: impl Into<String>, code_point: u32) -> Self {
        Self::new(name, format!("&#{code_point};"))
    }

    /// The exact entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text substituted for a reference to this entity.
    #[must_use]
    pub fn replacement_text(&self) -> &str {
        &self.replacement
    }
}
