//! Parser dialect settings and cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use strum_macros::Display;

/// Default cap on nested entity expansions.
pub const DEFAULT_MAX_ENTITY_DEPTH: usize = 100;

/// How attributes missing from an element's declaration are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum AttributePolicy {
    /// Report `UndefinedAttribute`, then record the value anyway.
    #[default]
    Declared,
    /// Record every attribute silently.
    Any,
}

/// What happens to an end tag whose name the DTD does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum UnknownEndTagPolicy {
    /// Report `UndefinedElement` and skip the tag.
    #[default]
    Drop,
    /// Flush pending text and deliver an `EndTag` for a throwaway `PCDATA`
    /// element with that name. The open-element stack is not touched.
    SynthesizePcdata,
}

/// Dialect knobs for [`SgmlParser`](crate::SgmlParser).
///
/// The default is the strict SGML behavior; [`ParserConfig::html`] selects
/// the lenient HTML dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Treatment of undeclared attributes.
    pub attribute_policy: AttributePolicy,
    /// Entity name that produces a flagged non-breaking space event instead
    /// of its replacement text.
    pub non_breaking_space_entity: Option<String>,
    /// Treatment of undefined end tags.
    pub unknown_end_tag: UnknownEndTagPolicy,
    /// Maximum number of entity expansions nested inside each other.
    pub max_entity_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ParserConfig {
    /// Strict SGML: warn on undeclared attributes, drop unknown end tags.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            attribute_policy: AttributePolicy::Declared,
            non_breaking_space_entity: None,
            unknown_end_tag: UnknownEndTagPolicy::Drop,
            max_entity_depth: DEFAULT_MAX_ENTITY_DEPTH,
        }
    }

    /// The HTML dialect: any attribute, `&nbsp;` as a flagged space, unknown
    /// end tags synthesized.
    #[must_use]
    pub fn html() -> Self {
        Self {
            attribute_policy: AttributePolicy::Any,
            non_breaking_space_entity: Some("nbsp".to_string()),
            unknown_end_tag: UnknownEndTagPolicy::SynthesizePcdata,
            max_entity_depth: DEFAULT_MAX_ENTITY_DEPTH,
        }
    }

    /// Set the attribute policy.
    #[must_use]
    pub const fn with_attribute_policy(mut self, policy: AttributePolicy) -> Self {
        self.attribute_policy = policy;
        self
    }

    /// Set (or clear) the non-breaking space entity name.
    #[must_use]
    pub fn with_non_breaking_space_entity(mut self, name: Option<&str>) -> Self {
        self.non_breaking_space_entity = name.map(str::to_string);
        self
    }

    /// Set the unknown end tag policy.
    #[must_use]
    pub const fn with_unknown_end_tag(mut self, policy: UnknownEndTagPolicy) -> Self {
        self.unknown_end_tag = policy;
        self
    }

    /// Set the entity nesting cap.
    #[must_use]
    pub const fn with_max_entity_depth(mut self, depth: usize) -> Self {
        self.max_entity_depth = depth;
        self
    }
}

/// A shared flag that stops a running parse at its next tag or flush point.
///
/// Clones share the flag, so one clone can be handed to the parser and
/// another kept by whoever decides to cancel.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_preset() {
        let config = ParserConfig::html();
        assert_eq!(config.attribute_policy, AttributePolicy::Any);
        assert_eq!(config.non_breaking_space_entity.as_deref(), Some("nbsp"));
        assert_eq!(config.unknown_end_tag, UnknownEndTagPolicy::SynthesizePcdata);
        assert_eq!(ParserConfig::default(), ParserConfig::strict());
    }

    #[test]
    fn test_cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
