//! Assertion helpers for [`ValidationResult`]s.
//!
//! Each helper panics with the offending result and message on failure.

use formcheck_rules::ValidationResult;

fn find<'a>(results: &'a [ValidationResult], field_id: &str) -> &'a ValidationResult {
    results
        .iter()
        .find(|result| result.field_id == field_id)
        .unwrap_or_else(|| panic!("no result for field {field_id:?} in {results:?}"))
}

/// Asserts the result for `field_id` carries no message.
#[track_caller]
pub fn assert_valid(results: &[ValidationResult], field_id: &str) {
    let result = find(results, field_id);
    assert!(
        result.is_valid(),
        "expected {field_id:?} to be valid, got message {:?}",
        result.message
    );
}

/// Asserts the result for `field_id` carries a message.
#[track_caller]
pub fn assert_invalid(results: &[ValidationResult], field_id: &str) {
    let result = find(results, field_id);
    assert!(!result.is_valid(), "expected {field_id:?} to be invalid");
}

/// Asserts the result for `field_id` carries exactly `message`.
#[track_caller]
pub fn assert_message(results: &[ValidationResult], field_id: &str, message: &str) {
    let result = find(results, field_id);
    assert_eq!(result.message, message, "unexpected message for {field_id:?}");
}

/// Asserts every result is valid.
#[track_caller]
pub fn assert_all_valid(results: &[ValidationResult]) {
    let invalid: Vec<_> = results.iter().filter(|result| !result.is_valid()).collect();
    assert!(invalid.is_empty(), "expected all results valid, got {invalid:?}");
}
