//! # Set Schemas
//!
//! Elements are validated in iteration order and their failures collected
//! into a [`Validation::Set`]. Failures are values, so two elements failing
//! with an identical issue produce one entry.
//!
//! Under `with_coercion` an array is accepted as a set and deduplicated on
//! parse.

use std::collections::BTreeSet;

use async_trait::async_trait;

use assay_core::{Validation, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::precheck_failure;

#[derive(Debug, Clone)]
pub struct SetSchema {
    element: SchemaRef,
}

fn elements<'v>(value: &'v Value, options: &ValidationOptions) -> Option<&'v [Value]> {
    match value {
        Value::Set(items) => Some(items.as_slice()),
        Value::Array(items) if options.with_coercion => Some(items.as_slice()),
        _ => None,
    }
}

fn finish(failures: BTreeSet<Validation>) -> ValidationResult {
    if failures.is_empty() {
        None
    } else {
        Some(Validation::Set(failures))
    }
}

#[async_trait]
impl Schema for SetSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Some(items) = elements(value, options) else {
            return precheck_failure(value, "set");
        };
        let mut failures = BTreeSet::new();
        for item in items {
            if let Some(failure) = self.element.validate(item, options) {
                failures.insert(failure);
                if options.early_exit {
                    break;
                }
            }
        }
        finish(failures)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Some(items) = elements(value, options) else {
            return precheck_failure(value, "set");
        };
        let mut failures = BTreeSet::new();
        for item in items {
            if let Some(failure) = self.element.validate_async(item, options).await {
                failures.insert(failure);
                if options.early_exit {
                    break;
                }
            }
        }
        finish(failures)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Set(self.element.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Some(items) = elements(value, options) else {
            return Ok(value.clone());
        };
        let parsed = items
            .iter()
            .map(|item| {
                self.element
                    .materialize(item, options)
                    .map_err(|failure| Validation::set([failure]))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::set(parsed))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Some(items) = elements(value, options) else {
            return Ok(value.clone());
        };
        let mut parsed = Vec::with_capacity(items.len());
        for item in items {
            let output = self
                .element
                .materialize_async(item, options)
                .await
                .map_err(|failure| Validation::set([failure]))?;
            parsed.push(output);
        }
        Ok(Value::set(parsed))
    }
}

pub fn set(element: SchemaRef) -> SchemaRef {
    SetSchema { element }.into_ref()
}
