//! Deduplicated diagnostics with colored terminal output.
//!
//! Unsupported style values and failed resource fetches are reported through
//! [`warn_once`], so a snapshot with a thousand identical problems prints one
//! line instead of a thousand.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Warnings already printed, keyed by `"[component] message"`.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Print a warning to stderr unless the same `component`/`message` pair has
/// already been printed since the last [`clear_warnings`].
///
/// # Example
/// ```ignore
/// warn_once("style", "unsupported z-index value 'banana'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if first_time {
        eprintln!("{}", format!("[Strata {component}] warning: {message}").yellow());
    }
}

/// Whether `warn_once(component, message)` has fired since the last reset.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Forget every recorded warning (call before converting a new document).
pub fn clear_warnings() {
    if let Some(set) = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_mut()
    {
        set.clear();
    }
}
