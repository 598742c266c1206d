//! # Array Schemas
//!
//! Every element is validated against one element schema in index order.
//! The failure is positional: `[None, Some(issue)]` means element 0 passed
//! and element 1 failed. Trailing passes are trimmed.

use async_trait::async_trait;

use assay_core::{ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::{at_index, precheck_failure, sequence_result, should_stop};

#[derive(Debug, Clone)]
pub struct ArraySchema {
    element: SchemaRef,
}

#[async_trait]
impl Schema for ArraySchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Array(items) = value else {
            return precheck_failure(value, "array");
        };
        let mut results = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let result = self.element.validate(item, options);
            let stop = should_stop(options, &result);
            results.push(result);
            if stop {
                tracing::trace!(index, "array validation stopped early");
                break;
            }
        }
        sequence_result(results)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Array(items) = value else {
            return precheck_failure(value, "array");
        };
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let result = self.element.validate_async(item, options).await;
            let stop = should_stop(options, &result);
            results.push(result);
            if stop {
                break;
            }
        }
        sequence_result(results)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Array(self.element.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Array(items) = value else {
            return Ok(value.clone());
        };
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let parsed = self
                .element
                .materialize(item, options)
                .map_err(|failure| at_index(index, failure))?;
            output.push(parsed);
        }
        Ok(Value::Array(output))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Array(items) = value else {
            return Ok(value.clone());
        };
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let parsed = self
                .element
                .materialize_async(item, options)
                .await
                .map_err(|failure| at_index(index, failure))?;
            output.push(parsed);
        }
        Ok(Value::Array(output))
    }
}

pub fn array(element: SchemaRef) -> SchemaRef {
    ArraySchema { element }.into_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::codes;
    use assay_schema::{number, string};

    fn strings(items: Vec<Value>) -> Value {
        Value::Array(items)
    }

    #[test]
    fn positional_failures_keep_leading_holes() {
        let schema = array(string());
        let failure = schema
            .validate(
                &strings(vec![Value::from("a"), Value::from(1), Value::from("c")]),
                &ValidationOptions::default(),
            )
            .unwrap();
        assert!(failure.index(0).is_none());
        assert_eq!(failure.index(1).unwrap().as_issue().unwrap().code, codes::WRONG_TYPE);
        match failure {
            assay_core::Validation::Sequence(items) => assert_eq!(items.len(), 2),
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn early_exit_stops_at_first_failing_index() {
        let schema = array(number());
        let value = strings(vec![Value::from("a"), Value::from("b")]);
        let all = schema.validate(&value, &ValidationOptions::default()).unwrap();
        assert!(all.index(1).is_some());
        let first = schema
            .validate(&value, &ValidationOptions::default().with_early_exit(true))
            .unwrap();
        assert!(first.index(0).is_some());
        assert!(first.index(1).is_none());
    }

    #[test]
    fn empty_array_passes_and_non_array_fails_precheck() {
        let schema = array(number());
        let opts = ValidationOptions::default();
        assert!(schema.validate(&Value::Array(vec![]), &opts).is_none());
        let failure = schema.validate(&Value::Set(vec![]), &opts).unwrap();
        assert_eq!(failure.as_issue().unwrap().code, codes::WRONG_TYPE);
    }

    #[test]
    fn parse_rebuilds_elements() {
        let schema = array(number());
        let coerce = ValidationOptions::default().with_coercion(true);
        assert_eq!(
            schema.parse(&strings(vec![Value::from("1"), Value::from(2)]), &coerce),
            Ok(strings(vec![Value::from(1), Value::from(2)]))
        );
    }
}
