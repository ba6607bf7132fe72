//! The DTD-driven SGML push parser.
//!
//! - `core`: the public [`SgmlParser`] and the per-parse run state
//! - `context`: the open-element stack, acceptability and text flushing
//! - `markup`: start tags, end tags, attributes, declarations, raw text
//! - `references`: character and entity references

mod context;
mod core;
mod markup;
mod references;

pub use self::core::SgmlParser;

/// Whether `c` may start an SGML name.
pub(crate) const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Whether `c` may continue an SGML name.
pub(crate) const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}
