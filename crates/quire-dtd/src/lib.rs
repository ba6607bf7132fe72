//! Document type definitions for the quire SGML parser.
//!
//! A [`Dtd`] is a declarative table of which tags exist, which attributes and
//! children each one allows, and which named entities may be referenced.
//!
//! # Design
//!
//! Everything here is plain data plus queries. Elements are stored behind
//! [`Arc`](std::sync::Arc) so that parser events can hand them to listeners
//! without copying, and a finished `Dtd` can be shared read-only between any
//! number of parsers.

/// Content model kinds.
pub mod content_type;
/// Per-tag declarations.
pub mod element;
/// Named text-substitution entities.
pub mod entity;
/// The element/entity registry and its validation.
pub mod dtd;
/// DTD validation errors.
pub mod error;

pub use content_type::ContentType;
pub use dtd::Dtd;
pub use element::Element;
pub use entity::Entity;
pub use error::{DtdError, ReferenceRole};
