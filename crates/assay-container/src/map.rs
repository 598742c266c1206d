//! # Map Schemas
//!
//! Like a record, but over [`Value::Map`] whose keys may be any value.
//! Failures are [`Validation::Mapping`] keyed by the original key, and
//! entries are visited in insertion order.

use std::collections::BTreeMap;

use async_trait::async_trait;

use assay_core::{Validation, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::{entry_failure, entry_failure_async, precheck_failure, should_stop};

#[derive(Debug, Clone)]
pub struct MapSchema {
    key: SchemaRef,
    value: SchemaRef,
}

fn finish(failures: BTreeMap<Value, ValidationResult>) -> ValidationResult {
    Validation::Mapping(failures).simplified()
}

#[async_trait]
impl Schema for MapSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Map(entries) = value else {
            return precheck_failure(value, "map");
        };
        let mut failures = BTreeMap::new();
        for (key, item) in entries {
            let result = entry_failure(&self.key, &self.value, key, item, options);
            let stop = should_stop(options, &result);
            failures.insert(key.clone(), result);
            if stop {
                tracing::trace!(key = %key, "map validation stopped early");
                break;
            }
        }
        finish(failures)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Map(entries) = value else {
            return precheck_failure(value, "map");
        };
        let mut failures = BTreeMap::new();
        for (key, item) in entries {
            let result = entry_failure_async(&self.key, &self.value, key, item, options).await;
            let stop = should_stop(options, &result);
            failures.insert(key.clone(), result);
            if stop {
                break;
            }
        }
        finish(failures)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Map {
            key: self.key.clone(),
            value: self.value.clone(),
        })
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Map(entries) = value else {
            return Ok(value.clone());
        };
        let mut output = Vec::with_capacity(entries.len());
        for (key, item) in entries {
            let positioned = |failure: Validation| Validation::mapping([(key.clone(), failure)]);
            let parsed_key = self.key.materialize(key, options).map_err(positioned)?;
            let parsed = self.value.materialize(item, options).map_err(positioned)?;
            output.push((parsed_key, parsed));
        }
        Ok(Value::map(output))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Map(entries) = value else {
            return Ok(value.clone());
        };
        let mut output = Vec::with_capacity(entries.len());
        for (key, item) in entries {
            let positioned = |failure: Validation| Validation::mapping([(key.clone(), failure)]);
            let parsed_key = self
                .key
                .materialize_async(key, options)
                .await
                .map_err(positioned)?;
            let parsed = self
                .value
                .materialize_async(item, options)
                .await
                .map_err(positioned)?;
            output.push((parsed_key, parsed));
        }
        Ok(Value::map(output))
    }
}

pub fn map(key: SchemaRef, value: SchemaRef) -> SchemaRef {
    MapSchema { key, value }.into_ref()
}
