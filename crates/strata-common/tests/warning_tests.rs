//! Tests for deduplicated warnings.

use strata_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_warn_once_records_and_clears() {
    let message = "test-only warning: unsupported mask-border value";
    assert!(!has_warned("test", message));

    warn_once("test", message);
    warn_once("test", message);
    assert!(has_warned("test", message));
    assert!(!has_warned("other", message));

    clear_warnings();
    assert!(!has_warned("test", message));
}
