//! # Modifiers
//!
//! Wrappers that widen or re-scope an inner schema without changing what
//! it validates for ordinary values:
//!
//! - [`optional`] also accepts `Absent` and keeps it absent on parse, so an
//!   optional object field is omitted from the output.
//! - [`nullable`] also accepts `Null`.
//! - [`scoped`] runs the inner schema under narrowed options.

use async_trait::async_trait;

use assay_core::{OptionOverrides, ValidationOptions, ValidationResult, Value};

use crate::meta::{Meta, MetaKind};
use crate::schema::{ParseResult, Schema, SchemaExt, SchemaRef};

#[derive(Debug, Clone)]
pub struct OptionalSchema {
    inner: SchemaRef,
}

#[async_trait]
impl Schema for OptionalSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        if value.is_absent() {
            return None;
        }
        self.inner.validate(value, options)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        if value.is_absent() {
            return None;
        }
        self.inner.validate_async(value, options).await
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Optional(self.inner.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        if value.is_absent() {
            return Ok(Value::Absent);
        }
        self.inner.materialize(value, options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        if value.is_absent() {
            return Ok(Value::Absent);
        }
        self.inner.materialize_async(value, options).await
    }
}

#[derive(Debug, Clone)]
pub struct NullableSchema {
    inner: SchemaRef,
}

#[async_trait]
impl Schema for NullableSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        if value.is_null() {
            return None;
        }
        self.inner.validate(value, options)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        if value.is_null() {
            return None;
        }
        self.inner.validate_async(value, options).await
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Nullable(self.inner.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        if value.is_null() {
            return Ok(Value::Null);
        }
        self.inner.materialize(value, options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        if value.is_null() {
            return Ok(Value::Null);
        }
        self.inner.materialize_async(value, options).await
    }
}

/// Runs the inner schema with [`OptionOverrides`] applied to the caller's
/// options. Metadata is the inner schema's.
#[derive(Debug, Clone)]
pub struct ScopedSchema {
    inner: SchemaRef,
    overrides: OptionOverrides,
}

#[async_trait]
impl Schema for ScopedSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.inner.validate(value, &self.overrides.apply(options))
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let scoped = self.overrides.apply(options);
        self.inner.validate_async(value, &scoped).await
    }

    fn meta(&self) -> Meta {
        self.inner.meta()
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.inner.materialize(value, &self.overrides.apply(options))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let scoped = self.overrides.apply(options);
        self.inner.materialize_async(value, &scoped).await
    }

    fn parse(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.inner.parse(value, &self.overrides.apply(options))
    }

    async fn parse_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let scoped = self.overrides.apply(options);
        self.inner.parse_async(value, &scoped).await
    }
}

pub fn optional(inner: SchemaRef) -> SchemaRef {
    OptionalSchema { inner }.into_ref()
}

pub fn nullable(inner: SchemaRef) -> SchemaRef {
    NullableSchema { inner }.into_ref()
}

pub fn scoped(inner: SchemaRef, overrides: OptionOverrides) -> SchemaRef {
    ScopedSchema { inner, overrides }.into_ref()
}
