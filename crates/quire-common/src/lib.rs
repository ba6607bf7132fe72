//! Common utilities for the quire parser crates.
//!
//! This crate provides shared infrastructure used by all components:
//! - **Warning System** - deduplicated diagnostics routed through the `log` facade

pub mod warning;
