//! Custom Test Assertions
//!
//! Assertion helpers for lease builder types that give more meaningful
//! failure messages than a bare `assert!`.

use core_kernel::Money;
use domain_lease::{LeaseDraft, LeaseError, LeaseTerms, ValidationResult};

/// Asserts that two Money values match in currency and amount
///
/// # Panics
///
/// Panics if the currencies differ or the amounts are not equal.
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that an error carries a field error for `field`
///
/// Works for both step rejections and finalize re-validation failures.
pub fn assert_has_field_error(err: &LeaseError, field: &str) {
    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert!(
        fields.contains(&field),
        "Expected a field error for `{}`, got {:?} from: {}",
        field,
        fields,
        err
    );
}

/// Asserts that a validation result has exactly these error fields, in order
pub fn assert_error_fields(result: &ValidationResult, expected: &[&str]) {
    let fields: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, expected, "Unexpected validation error fields");
}

/// Asserts that the derived end date agrees with start and duration
pub fn assert_terms_consistent(terms: &LeaseTerms) {
    assert!(
        terms.is_consistent(),
        "Terms out of sync: start={}, duration={}, end={}",
        terms.start_date(),
        terms.duration_months(),
        terms.end_date()
    );
}

/// Asserts that a draft has no data at all
pub fn assert_pristine(draft: &LeaseDraft) {
    assert!(draft.is_pristine(), "Expected an empty draft, got {:?}", draft);
}

/// Asserts that a serialized value does not carry `key` at the top level
///
/// Used for conditional fields that must be omitted rather than null.
pub fn assert_json_key_absent(value: &serde_json::Value, key: &str) {
    let object = value
        .as_object()
        .unwrap_or_else(|| panic!("Expected a JSON object, got {}", value));
    assert!(
        !object.contains_key(key),
        "Expected `{}` to be absent, got {}",
        key,
        object[key]
    );
}
