//! # Parse Pipeline
//!
//! Three rewriting stages around a base schema, distinguished by where the
//! rewrite sits relative to validation:
//!
//! | stage       | rewrite applies to                | validation sees  |
//! |-------------|-----------------------------------|------------------|
//! | [`coerce`]  | the input, before anything        | rewritten input  |
//! | [`narrow`]  | the validated input, before parse | original input   |
//! | [`transform`] | the parsed output               | original input   |
//!
//! All three keep the base schema's metadata.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use assay_core::{ValidationOptions, ValidationResult, Value};

use crate::meta::Meta;
use crate::schema::{ParseResult, Schema, SchemaExt, SchemaRef};

type Rewrite = dyn Fn(&Value) -> Value + Send + Sync;
type Projection = dyn Fn(Value) -> Value + Send + Sync;

/// Rewrites the input before the base schema sees it.
#[derive(Clone)]
pub struct CoerceSchema {
    base: SchemaRef,
    rewrite: Arc<Rewrite>,
}

impl fmt::Debug for CoerceSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoerceSchema").field("base", &self.base).finish_non_exhaustive()
    }
}

#[async_trait]
impl Schema for CoerceSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.base.validate(&(self.rewrite)(value), options)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let coerced = (self.rewrite)(value);
        self.base.validate_async(&coerced, options).await
    }

    fn meta(&self) -> Meta {
        self.base.meta()
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.base.materialize(&(self.rewrite)(value), options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let coerced = (self.rewrite)(value);
        self.base.materialize_async(&coerced, options).await
    }
}

/// Rewrites an already validated input before the base builds output.
#[derive(Clone)]
pub struct NarrowSchema {
    base: SchemaRef,
    rewrite: Arc<Rewrite>,
}

impl fmt::Debug for NarrowSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrowSchema").field("base", &self.base).finish_non_exhaustive()
    }
}

#[async_trait]
impl Schema for NarrowSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.base.validate(value, options)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.base.validate_async(value, options).await
    }

    fn meta(&self) -> Meta {
        self.base.meta()
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.base.materialize(&(self.rewrite)(value), options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let narrowed = (self.rewrite)(value);
        self.base.materialize_async(&narrowed, options).await
    }
}

/// Maps the base schema's parsed output to a new value.
#[derive(Clone)]
pub struct TransformSchema {
    base: SchemaRef,
    project: Arc<Projection>,
}

impl fmt::Debug for TransformSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformSchema").field("base", &self.base).finish_non_exhaustive()
    }
}

#[async_trait]
impl Schema for TransformSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.base.validate(value, options)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.base.validate_async(value, options).await
    }

    fn meta(&self) -> Meta {
        self.base.meta()
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.base.materialize(value, options).map(|out| (self.project)(out))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let out = self.base.materialize_async(value, options).await?;
        Ok((self.project)(out))
    }
}

/// Rewrite the input before validation and parsing.
pub fn coerce<F>(base: SchemaRef, rewrite: F) -> SchemaRef
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    CoerceSchema {
        base,
        rewrite: Arc::new(rewrite),
    }
    .into_ref()
}

/// Rewrite the validated input before the output is built.
pub fn narrow<F>(base: SchemaRef, rewrite: F) -> SchemaRef
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    NarrowSchema {
        base,
        rewrite: Arc::new(rewrite),
    }
    .into_ref()
}

/// Project the parsed output.
pub fn transform<F>(base: SchemaRef, project: F) -> SchemaRef
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    TransformSchema {
        base,
        project: Arc::new(project),
    }
    .into_ref()
}
