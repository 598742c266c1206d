//! # Record Schemas
//!
//! A string-keyed object whose keys are all validated by a key schema and
//! whose values are all validated by a value schema. Failures are
//! object-shaped and keyed by the original key.
//!
//! A key the key schema rejects is reported as `invalid_key` carrying the
//! key failure as its cause; that entry's value is not validated.

use std::collections::BTreeMap;

use async_trait::async_trait;

use assay_core::{Validation, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::{entry_failure, entry_failure_async, precheck_failure, should_stop};

#[derive(Debug, Clone)]
pub struct RecordSchema {
    key: SchemaRef,
    value: SchemaRef,
}

fn finish(failures: BTreeMap<String, ValidationResult>) -> ValidationResult {
    Validation::Object(failures).simplified()
}

fn output_key(parsed: Value, original: &str) -> String {
    match parsed {
        Value::String(key) => key,
        Value::Absent => original.to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Schema for RecordSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Object(entries) = value else {
            return precheck_failure(value, "record");
        };
        let mut failures = BTreeMap::new();
        for (key, item) in entries {
            let key_value = Value::from(key.as_str());
            let result = entry_failure(&self.key, &self.value, &key_value, item, options);
            let stop = should_stop(options, &result);
            failures.insert(key.clone(), result);
            if stop {
                tracing::trace!(key = %key, "record validation stopped early");
                break;
            }
        }
        finish(failures)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Object(entries) = value else {
            return precheck_failure(value, "record");
        };
        let mut failures = BTreeMap::new();
        for (key, item) in entries {
            let key_value = Value::from(key.as_str());
            let result = entry_failure_async(&self.key, &self.value, &key_value, item, options).await;
            let stop = should_stop(options, &result);
            failures.insert(key.clone(), result);
            if stop {
                break;
            }
        }
        finish(failures)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Record {
            key: self.key.clone(),
            value: self.value.clone(),
        })
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Object(entries) = value else {
            return Ok(value.clone());
        };
        let mut output = BTreeMap::new();
        for (key, item) in entries {
            let positioned = |failure: Validation| Validation::object([(key.as_str(), failure)]);
            let parsed_key = self
                .key
                .materialize(&Value::from(key.as_str()), options)
                .map_err(positioned)?;
            let parsed = self.value.materialize(item, options).map_err(positioned)?;
            if !parsed.is_absent() {
                output.insert(output_key(parsed_key, key), parsed);
            }
        }
        Ok(Value::Object(output))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Object(entries) = value else {
            return Ok(value.clone());
        };
        let mut output = BTreeMap::new();
        for (key, item) in entries {
            let positioned = |failure: Validation| Validation::object([(key.as_str(), failure)]);
            let parsed_key = self
                .key
                .materialize_async(&Value::from(key.as_str()), options)
                .await
                .map_err(positioned)?;
            let parsed = self
                .value
                .materialize_async(item, options)
                .await
                .map_err(positioned)?;
            if !parsed.is_absent() {
                output.insert(output_key(parsed_key, key), parsed);
            }
        }
        Ok(Value::Object(output))
    }
}

pub fn record(key: SchemaRef, value: SchemaRef) -> SchemaRef {
    RecordSchema { key, value }.into_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::codes;
    use assay_schema::{literals, number, string};

    fn scores() -> SchemaRef {
        record(literals(["alice", "bob"]), number())
    }

    #[test]
    fn invalid_key_wraps_key_failure_and_skips_value() {
        let value = Value::object([("carol", Value::from("not a number"))]);
        let failure = scores().validate(&value, &ValidationOptions::default()).unwrap();
        let issue = failure.field("carol").unwrap().as_issue().unwrap();
        assert_eq!(issue.code, codes::INVALID_KEY);
        assert_eq!(issue.value, Value::from("carol"));
        let cause = issue.cause.as_deref().unwrap();
        assert_eq!(cause.as_issue().unwrap().code, codes::LITERAL);
    }

    #[test]
    fn value_failures_are_keyed() {
        let value = Value::object([("alice", Value::from(1)), ("bob", Value::from("x"))]);
        let failure = scores().validate(&value, &ValidationOptions::default()).unwrap();
        assert!(failure.field("alice").is_none());
        assert_eq!(failure.field("bob").unwrap().as_issue().unwrap().code, codes::WRONG_TYPE);
    }

    #[test]
    fn early_exit_stops_at_first_failing_entry() {
        let value = Value::object([("a", Value::from("x")), ("b", Value::from("y"))]);
        let options = ValidationOptions::default().with_early_exit(true);
        let failure = record(string(), number()).validate(&value, &options).unwrap();
        assert!(failure.field("a").is_some());
        assert!(failure.field("b").is_none());
    }

    #[test]
    fn parse_rebuilds_entries() {
        let coerce = ValidationOptions::default().with_coercion(true);
        let value = Value::object([("alice", Value::from("3"))]);
        assert_eq!(
            scores().parse(&value, &coerce),
            Ok(Value::object([("alice", Value::from(3))]))
        );
        assert_eq!(scores().meta().type_tag(), "record");
    }
}
