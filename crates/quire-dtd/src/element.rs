use std::collections::BTreeSet;

use crate::content_type::ContentType;
use crate::error::ReferenceRole;

/// Content-model token that marks interleaved character data.
pub const PCDATA_TOKEN: &str = "#PCDATA";

/// The declaration of one tag: legal attributes, content model, and the
/// inclusion/exclusion exceptions that apply to everything nested inside it.
///
/// Every name is stored upper case; all queries are ASCII case-insensitive.
/// An element is built once with the `with_*` methods and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    /// `None` means the element declares no attributes at all.
    attributes: Option<BTreeSet<String>>,
    content_type: ContentType,
    content_model: BTreeSet<String>,
    inclusions: BTreeSet<String>,
    exclusions: BTreeSet<String>,
}

fn normalize_names<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_uppercase())
        .filter(|name| !name.is_empty())
        .collect()
}

impl Element {
    /// Create an element with no attributes, an empty content model and no
    /// exceptions.
    #[must_use]
    pub fn new(name: &str, content_type: ContentType) -> Self {
        Self {
            name: name.trim().to_ascii_uppercase(),
            attributes: None,
            content_type,
            content_model: BTreeSet::new(),
            inclusions: BTreeSet::new(),
            exclusions: BTreeSet::new(),
        }
    }

    /// Declare the legal attribute names.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.attributes = Some(normalize_names(names));
        self
    }

    /// Declare the child tag names this element accepts.
    ///
    /// A `MODEL` element whose content model lists `#PCDATA` is promoted to
    /// `MODEL_PCDATA`; the `#PCDATA` token itself is not kept in the set.
    #[must_use]
    pub fn with_content_model<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = normalize_names(names);
        if model.remove(PCDATA_TOKEN) && self.content_type == ContentType::Model {
            self.content_type = ContentType::ModelPcdata;
        }
        self.content_model = model;
        self
    }

    /// Declare tags that are acceptable anywhere inside this element.
    #[must_use]
    pub fn with_inclusions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inclusions = normalize_names(names);
        self
    }

    /// Declare tags that are forbidden anywhere inside this element, even
    /// where a content model or an inclusion would otherwise admit them.
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = normalize_names(names);
        self
    }

    /// The upper-case tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The content model kind.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// The declared attribute names, or `None` if none were declared.
    #[must_use]
    pub const fn attributes(&self) -> Option<&BTreeSet<String>> {
        self.attributes.as_ref()
    }

    /// Child tag names admitted by the content model.
    #[must_use]
    pub const fn content_model(&self) -> &BTreeSet<String> {
        &self.content_model
    }

    /// Inclusion exceptions.
    #[must_use]
    pub const fn inclusions(&self) -> &BTreeSet<String> {
        &self.inclusions
    }

    /// Exclusion exceptions.
    #[must_use]
    pub const fn exclusions(&self) -> &BTreeSet<String> {
        &self.exclusions
    }

    /// Whether `child` may appear directly inside this element according to
    /// the content model alone.
    ///
    /// Leaf content types (`PCDATA`, `CDATA`, `RCDATA`, `EMPTY`) accept no
    /// children here; whether a tag is still admitted through an inclusion
    /// is for the parser to decide.
    #[must_use]
    pub fn can_accept(&self, child: &Self) -> bool {
        self.accepts_name(&child.name)
    }

    /// [`can_accept`](Self::can_accept) by tag name.
    #[must_use]
    pub fn accepts_name(&self, name: &str) -> bool {
        self.content_type.has_model() && contains_ignore_case(&self.content_model, name)
    }

    /// Whether `name` is a declared attribute of this element.
    #[must_use]
    pub fn has_attribute_named(&self, name: &str) -> bool {
        self.attributes
            .as_ref()
            .is_some_and(|names| contains_ignore_case(names, name))
    }

    /// Whether `name` is one of this element's inclusions.
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        contains_ignore_case(&self.inclusions, name)
    }

    /// Whether `name` is one of this element's exclusions.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        contains_ignore_case(&self.exclusions, name)
    }

    /// Every tag name this element refers to, paired with where it is
    /// referenced from.
    pub fn references(&self) -> impl Iterator<Item = (ReferenceRole, &str)> {
        let model = self
            .content_model
            .iter()
            .map(|name| (ReferenceRole::ContentModel, name.as_str()));
        let inclusions = self
            .inclusions
            .iter()
            .map(|name| (ReferenceRole::Inclusion, name.as_str()));
        let exclusions = self
            .exclusions
            .iter()
            .map(|name| (ReferenceRole::Exclusion, name.as_str()));
        model.chain(inclusions).chain(exclusions)
    }
}

fn contains_ignore_case(set: &BTreeSet<String>, name: &str) -> bool {
    if name.bytes().any(|b| b.is_ascii_lowercase()) {
        set.contains(&name.to_ascii_uppercase())
    } else {
        set.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_upper_cased() {
        let element = Element::new("p", ContentType::Pcdata).with_attributes(["align"]);
        assert_eq!(element.name(), "P");
        assert!(element.has_attribute_named("ALIGN"));
        assert!(element.has_attribute_named("Align"));
        assert!(!element.has_attribute_named("class"));
    }

    #[test]
    fn test_model_promoted_when_pcdata_listed() {
        let element =
            Element::new("li", ContentType::Model).with_content_model(["#pcdata", "ul", "ol"]);
        assert_eq!(element.content_type(), ContentType::ModelPcdata);
        assert!(!element.content_model().contains(PCDATA_TOKEN));
        assert_eq!(element.content_model().len(), 2);
    }

    #[test]
    fn test_leaf_types_accept_no_children() {
        let child = Element::new("b", ContentType::ModelPcdata);
        let leaf = Element::new("title", ContentType::Pcdata).with_content_model(["B"]);
        assert!(!leaf.can_accept(&child));

        let parent = Element::new("p", ContentType::ModelPcdata).with_content_model(["b"]);
        assert!(parent.can_accept(&child));
    }

    #[test]
    fn test_undeclared_attributes() {
        let element = Element::new("br", ContentType::Empty);
        assert!(element.attributes().is_none());
        assert!(!element.has_attribute_named("CLEAR"));
    }

    #[test]
    fn test_references_cover_every_role() {
        let element = Element::new("form", ContentType::Model)
            .with_content_model(["p"])
            .with_inclusions(["a"])
            .with_exclusions(["form"]);
        let refs: Vec<_> = element.references().collect();
        assert_eq!(
            refs,
            vec![
                (ReferenceRole::ContentModel, "P"),
                (ReferenceRole::Inclusion, "A"),
                (ReferenceRole::Exclusion, "FORM"),
            ]
        );
    }
}
