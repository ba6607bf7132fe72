use strum_macros::Display;
use thiserror::Error;

/// Where inside an element declaration a tag name is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReferenceRole {
    /// The element's content model.
    #[strum(serialize = "content model")]
    ContentModel,
    /// The element's inclusion exceptions.
    #[strum(serialize = "inclusions")]
    Inclusion,
    /// The element's exclusion exceptions.
    #[strum(serialize = "exclusions")]
    Exclusion,
}

/// A structural problem found by [`Dtd::validate`](crate::Dtd::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DtdError {
    /// The document element named at construction was never registered.
    #[error("root element <{0}> is not defined")]
    UndefinedRoot(String),

    /// An element declaration names a tag that is not registered.
    #[error("element <{element}> references undefined element <{referenced}> in its {role}")]
    UndefinedReference {
        /// The declaring element.
        element: String,
        /// The dangling tag name.
        referenced: String,
        /// Which part of the declaration holds the reference.
        role: ReferenceRole,
    },
}
