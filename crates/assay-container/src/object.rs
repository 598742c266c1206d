//! # Object Schemas
//!
//! Validates a string-keyed [`Value::Object`] field by field in
//! declaration order. A missing field is seen by its schema as
//! [`Value::Absent`], so only `optional(..)` fields may be omitted.
//!
//! ## Undeclared Keys
//!
//! | policy       | validate                          | parse                    |
//! |--------------|-----------------------------------|--------------------------|
//! | permissive   | ignored                           | kept unless `strip`      |
//! | strict       | `additionalProperty` per key      | kept unless `strip`      |
//! | schema       | validated by the catch-all schema | parsed by it and kept    |
//!
//! Strict parse only sees undeclared keys when validation was skipped.

use std::collections::BTreeMap;

use async_trait::async_trait;

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};
use assay_schema::{AdditionalProperties, Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::{precheck_failure, should_stop};

/// An object with declared fields and a policy for the rest.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    fields: Vec<(String, SchemaRef)>,
    additional: AdditionalProperties,
}

impl ObjectSchema {
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaRef)>) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, s)| (k.into(), s)).collect(),
            additional: AdditionalProperties::Permissive,
        }
    }

    /// Reject undeclared keys.
    pub fn strict(mut self) -> Self {
        self.additional = AdditionalProperties::Strict;
        self
    }

    /// Validate and parse undeclared keys with `schema`.
    pub fn additional(mut self, schema: SchemaRef) -> Self {
        self.additional = AdditionalProperties::Schema(schema);
        self
    }

    fn is_declared(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }

    fn extras<'a>(
        &'a self,
        fields: &'a BTreeMap<String, Value>,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        fields.iter().filter(move |(key, _)| !self.is_declared(key))
    }

    fn extra_failure(&self, extra: &Value, options: &ValidationOptions) -> ValidationResult {
        match &self.additional {
            AdditionalProperties::Permissive => None,
            AdditionalProperties::Strict => Some(Validation::Issue(ValidationIssue::new(
                codes::ADDITIONAL_PROPERTY,
                extra.clone(),
            ))),
            AdditionalProperties::Schema(schema) => schema.validate(extra, options),
        }
    }

    fn keeps_extras(&self, options: &ValidationOptions) -> bool {
        match self.additional {
            AdditionalProperties::Schema(_) => true,
            _ => !options.strip,
        }
    }
}

fn finish(failures: BTreeMap<String, ValidationResult>) -> ValidationResult {
    Validation::Object(failures).simplified()
}

fn positioned(key: &str, failure: Validation) -> Validation {
    Validation::object([(key, failure)])
}

#[async_trait]
impl Schema for ObjectSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Object(fields) = value else {
            return precheck_failure(value, "object");
        };
        let mut failures = BTreeMap::new();
        for (name, schema) in &self.fields {
            let result = schema.validate(value.field(name), options);
            let stop = should_stop(options, &result);
            failures.insert(name.clone(), result);
            if stop {
                tracing::trace!(field = %name, "object validation stopped early");
                return finish(failures);
            }
        }
        if matches!(self.additional, AdditionalProperties::Permissive) {
            return finish(failures);
        }
        for (key, extra) in self.extras(fields) {
            let result = self.extra_failure(extra, options);
            let stop = should_stop(options, &result);
            failures.insert(key.clone(), result);
            if stop {
                tracing::trace!(field = %key, "object validation stopped early");
                break;
            }
        }
        finish(failures)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let Value::Object(fields) = value else {
            return precheck_failure(value, "object");
        };
        let mut failures = BTreeMap::new();
        for (name, schema) in &self.fields {
            let result = schema.validate_async(value.field(name), options).await;
            let stop = should_stop(options, &result);
            failures.insert(name.clone(), result);
            if stop {
                return finish(failures);
            }
        }
        for (key, extra) in self.extras(fields) {
            let result = match &self.additional {
                AdditionalProperties::Permissive => break,
                AdditionalProperties::Schema(schema) => schema.validate_async(extra, options).await,
                AdditionalProperties::Strict => self.extra_failure(extra, options),
            };
            let stop = should_stop(options, &result);
            failures.insert(key.clone(), result);
            if stop {
                break;
            }
        }
        finish(failures)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Object {
            fields: self.fields.clone(),
            additional: self.additional.clone(),
        })
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Object(fields) = value else {
            return Ok(value.clone());
        };
        let mut output = BTreeMap::new();
        for (name, schema) in &self.fields {
            let parsed = schema
                .materialize(value.field(name), options)
                .map_err(|failure| positioned(name, failure))?;
            if !parsed.is_absent() {
                output.insert(name.clone(), parsed);
            }
        }
        if self.keeps_extras(options) {
            for (key, extra) in self.extras(fields) {
                let parsed = match &self.additional {
                    AdditionalProperties::Schema(schema) => schema
                        .materialize(extra, options)
                        .map_err(|failure| positioned(key, failure))?,
                    _ => extra.clone(),
                };
                output.insert(key.clone(), parsed);
            }
        }
        Ok(Value::Object(output))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let Value::Object(fields) = value else {
            return Ok(value.clone());
        };
        let mut output = BTreeMap::new();
        for (name, schema) in &self.fields {
            let parsed = schema
                .materialize_async(value.field(name), options)
                .await
                .map_err(|failure| positioned(name, failure))?;
            if !parsed.is_absent() {
                output.insert(name.clone(), parsed);
            }
        }
        if self.keeps_extras(options) {
            for (key, extra) in self.extras(fields) {
                let parsed = match &self.additional {
                    AdditionalProperties::Schema(schema) => schema
                        .materialize_async(extra, options)
                        .await
                        .map_err(|failure| positioned(key, failure))?,
                    _ => extra.clone(),
                };
                output.insert(key.clone(), parsed);
            }
        }
        Ok(Value::Object(output))
    }
}

/// A permissive object.
pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaRef)>) -> SchemaRef {
    ObjectSchema::new(fields).into_ref()
}

/// An object that rejects undeclared keys.
pub fn strict_object<K: Into<String>>(
    fields: impl IntoIterator<Item = (K, SchemaRef)>,
) -> SchemaRef {
    ObjectSchema::new(fields).strict().into_ref()
}
