//! # Tuple Schemas
//!
//! A fixed-arity array where position `i` is validated against schema
//! `i`. An arity mismatch is a single `length` issue carrying
//! `[expected, actual]`; no element is validated in that case.

use async_trait::async_trait;

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::{at_index, precheck_failure, sequence_result, should_stop};

#[derive(Debug, Clone)]
pub struct TupleSchema {
    elements: Vec<SchemaRef>,
}

impl TupleSchema {
    fn precheck<'v>(&self, value: &'v Value) -> Result<&'v [Value], ValidationResult> {
        let Value::Array(items) = value else {
            return Err(precheck_failure(value, "tuple"));
        };
        if items.len() != self.elements.len() {
            let issue = ValidationIssue::new(codes::LENGTH, value.clone())
                .with_args([Value::from(self.elements.len()), Value::from(items.len())]);
            return Err(Some(Validation::Issue(issue)));
        }
        Ok(items.as_slice())
    }
}

#[async_trait]
impl Schema for TupleSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let items = match self.precheck(value) {
            Ok(items) => items,
            Err(failure) => return failure,
        };
        let mut results = Vec::with_capacity(items.len());
        for (schema, item) in self.elements.iter().zip(items) {
            let result = schema.validate(item, options);
            let stop = should_stop(options, &result);
            results.push(result);
            if stop {
                break;
            }
        }
        sequence_result(results)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let items = match self.precheck(value) {
            Ok(items) => items,
            Err(failure) => return failure,
        };
        let mut results = Vec::with_capacity(items.len());
        for (schema, item) in self.elements.iter().zip(items) {
            let result = schema.validate_async(item, options).await;
            let stop = should_stop(options, &result);
            results.push(result);
            if stop {
                break;
            }
        }
        sequence_result(results)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Tuple(self.elements.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Array(items) = value else {
            return Ok(value.clone());
        };
        let mut output = Vec::with_capacity(items.len());
        for (index, (schema, item)) in self.elements.iter().zip(items).enumerate() {
            let parsed = schema
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
        for (index, (schema, item)) in self.elements.iter().zip(items).enumerate() {
            let parsed = schema
                .materialize_async(item, options)
                .await
                .map_err(|failure| at_index(index, failure))?;
            output.push(parsed);
        }
        Ok(Value::Array(output))
    }
}

pub fn tuple(elements: Vec<SchemaRef>) -> SchemaRef {
    TupleSchema { elements }.into_ref()
}
