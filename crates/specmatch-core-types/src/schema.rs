//! Canonical schema constants for structured logging and events
//!
//! These constants keep the field names emitted by the logging macros and
//! the test capture layer in one place.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Snapshot sizes
pub const FIELD_LEAF_COUNT: &str = "leaf_count";
pub const FIELD_SELECTED_A: &str = "selected_a";
pub const FIELD_SELECTED_B: &str = "selected_b";
pub const FIELD_PATTERN_COUNT: &str = "pattern_count";

// Comparison outcome
pub const FIELD_EQUAL: &str = "equal";
pub const FIELD_MISMATCH_COUNT: &str = "mismatch_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_LEAF_COUNT.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_selection_fields_are_distinct() {
        assert_ne!(FIELD_SELECTED_A, FIELD_SELECTED_B);
    }
}
