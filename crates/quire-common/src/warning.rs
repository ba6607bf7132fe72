//! Deduplicated parser warnings.
//!
//! Recoverable problems found while parsing (an undefined tag, an unknown
//! entity) tend to repeat many times in one document. Each distinct message is
//! forwarded to the [`log`] facade once, until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Log target shared by every quire component.
pub const LOG_TARGET: &str = "quire";

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning for `component` once per unique message.
///
/// Returns `true` if the message was logged, `false` if it had already been
/// seen since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use quire_common::warning::{clear_warnings, warn_once};
///
/// clear_warnings();
/// assert!(warn_once("SGML", "undefined element <BLINK>"));
/// assert!(!warn_once("SGML", "undefined element <BLINK>"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        log::warn!(target: LOG_TARGET, "[{component}] {message}");
    }
    first_time
}

/// Forget every recorded warning (call before parsing a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_components_are_separate_keys() {
        assert!(warn_once("test-a", "shared message for component keys"));
        assert!(warn_once("test-b", "shared message for component keys"));
        assert!(!warn_once("test-a", "shared message for component keys"));
    }
}
