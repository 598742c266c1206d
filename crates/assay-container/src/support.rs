//! Helpers shared by the container validators.

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};
use assay_schema::SchemaRef;

/// Pre-check failure for a value that is not the expected container.
pub(crate) fn precheck_failure(value: &Value, expected: &str) -> ValidationResult {
    let issue = if value.is_absent() {
        ValidationIssue::required()
    } else {
        ValidationIssue::wrong_type(value, expected)
    };
    Some(Validation::Issue(issue))
}

/// True when aggregation should stop after `result`.
pub(crate) fn should_stop(options: &ValidationOptions, result: &ValidationResult) -> bool {
    options.early_exit && result.is_some()
}

/// A failure positioned at `index` of a sequence.
pub(crate) fn at_index(index: usize, failure: Validation) -> Validation {
    let mut items = vec![None; index];
    items.push(Some(failure));
    Validation::Sequence(items)
}

/// Positional results in canonical form.
pub(crate) fn sequence_result(items: Vec<ValidationResult>) -> ValidationResult {
    Validation::Sequence(items).simplified()
}

/// Wrap a key schema's failure as `invalid_key` on `key`.
pub(crate) fn invalid_key(key: &Value, failure: Validation) -> Validation {
    Validation::Issue(ValidationIssue::new(codes::INVALID_KEY, key.clone()).with_cause(failure))
}

/// Failure of one keyed entry. A rejected key hides its value.
pub(crate) fn entry_failure(
    key_schema: &SchemaRef,
    value_schema: &SchemaRef,
    key: &Value,
    item: &Value,
    options: &ValidationOptions,
) -> ValidationResult {
    if let Some(failure) = key_schema.validate(key, options) {
        return Some(invalid_key(key, failure));
    }
    value_schema.validate(item, options)
}

pub(crate) async fn entry_failure_async(
    key_schema: &SchemaRef,
    value_schema: &SchemaRef,
    key: &Value,
    item: &Value,
    options: &ValidationOptions,
) -> ValidationResult {
    if let Some(failure) = key_schema.validate_async(key, options).await {
        return Some(invalid_key(key, failure));
    }
    value_schema.validate_async(item, options).await
}
