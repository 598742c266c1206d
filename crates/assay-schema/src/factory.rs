//! # Schema Factory
//!
//! Builds a [`Schema`] from plain functions. A synchronous validation
//! function is the minimum; asynchronous validation, metadata and
//! materialization are optional overrides.
//!
//! A schema built with [`async_schema_fn`] has no synchronous validation:
//! calling `validate` on it yields `async_validation_required` rather than
//! silently passing.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};

use crate::meta::{Meta, MetaKind};
use crate::schema::{ParseResult, Schema};

type ValidateFn = dyn Fn(&Value, &ValidationOptions) -> ValidationResult + Send + Sync;
type AsyncValidateFn = dyn for<'a> Fn(&'a Value, &'a ValidationOptions) -> BoxFuture<'a, ValidationResult>
    + Send
    + Sync;
type MetaFn = dyn Fn() -> Meta + Send + Sync;
type MaterializeFn = dyn Fn(&Value, &ValidationOptions) -> ParseResult + Send + Sync;

/// A schema assembled from functions.
#[derive(Clone)]
pub struct FnSchema {
    validate: Option<Arc<ValidateFn>>,
    validate_async: Option<Arc<AsyncValidateFn>>,
    meta: Option<Arc<MetaFn>>,
    materialize: Option<Arc<MaterializeFn>>,
}

/// Start a schema from a synchronous validation function.
pub fn schema_fn<F>(validate: F) -> FnSchema
where
    F: Fn(&Value, &ValidationOptions) -> ValidationResult + Send + Sync + 'static,
{
    FnSchema {
        validate: Some(Arc::new(validate)),
        validate_async: None,
        meta: None,
        materialize: None,
    }
}

/// Start an async-only schema.
pub fn async_schema_fn<F>(validate: F) -> FnSchema
where
    F: for<'a> Fn(&'a Value, &'a ValidationOptions) -> BoxFuture<'a, ValidationResult>
        + Send
        + Sync
        + 'static,
{
    FnSchema {
        validate: None,
        validate_async: Some(Arc::new(validate)),
        meta: None,
        materialize: None,
    }
}

impl FnSchema {
    /// Override asynchronous validation.
    pub fn with_async<F>(mut self, validate: F) -> Self
    where
        F: for<'a> Fn(&'a Value, &'a ValidationOptions) -> BoxFuture<'a, ValidationResult>
            + Send
            + Sync
            + 'static,
    {
        self.validate_async = Some(Arc::new(validate));
        self
    }

    /// Describe the schema for introspection.
    pub fn with_meta<F>(mut self, meta: F) -> Self
    where
        F: Fn() -> Meta + Send + Sync + 'static,
    {
        self.meta = Some(Arc::new(meta));
        self
    }

    /// Override how a validated value becomes the parsed output.
    pub fn with_parse<F>(mut self, materialize: F) -> Self
    where
        F: Fn(&Value, &ValidationOptions) -> ParseResult + Send + Sync + 'static,
    {
        self.materialize = Some(Arc::new(materialize));
        self
    }

    /// True when only the asynchronous path is defined.
    pub fn is_async_only(&self) -> bool {
        self.validate.is_none()
    }
}

impl fmt::Debug for FnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema")
            .field("async_only", &self.is_async_only())
            .field("has_async", &self.validate_async.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Schema for FnSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        match &self.validate {
            Some(validate) => validate(value, options),
            None => {
                tracing::debug!("synchronous validation requested on an async-only schema");
                Some(Validation::Issue(ValidationIssue::new(
                    codes::ASYNC_VALIDATION_REQUIRED,
                    value.clone(),
                )))
            }
        }
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        match &self.validate_async {
            Some(validate) => validate(value, options).await,
            None => self.validate(value, options),
        }
    }

    fn meta(&self) -> Meta {
        self.meta
            .as_ref()
            .map_or_else(|| Meta::new(MetaKind::Opaque), |meta| meta())
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        match &self.materialize {
            Some(materialize) => materialize(value, options),
            None => Ok(value.clone()),
        }
    }
}
