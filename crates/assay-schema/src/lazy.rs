//! # Lazy Schemas
//!
//! Self-referential schema graphs cannot be built eagerly. [`lazy`] defers
//! construction to a thunk that runs on the first call to any contract
//! method and is cached for the lifetime of the wrapper.
//!
//! The cache is a [`OnceCell`], so concurrent first uses initialise it
//! exactly once and every caller sees the same inner schema.

use std::fmt;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use assay_core::{ValidationOptions, ValidationResult, Value};

use crate::meta::Meta;
use crate::schema::{ParseResult, Schema, SchemaExt, SchemaRef};

type Thunk = dyn Fn() -> SchemaRef + Send + Sync;

/// A schema built on first use.
pub struct LazySchema {
    thunk: Box<Thunk>,
    resolved: OnceCell<SchemaRef>,
}

impl LazySchema {
    /// The inner schema, building it if this is the first use.
    pub fn resolve(&self) -> &SchemaRef {
        self.resolved.get_or_init(|| {
            tracing::trace!("resolving lazy schema");
            (self.thunk)()
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

// The inner schema may contain this wrapper, so Debug never descends.
impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[async_trait]
impl Schema for LazySchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.resolve().validate(value, options)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.resolve().validate_async(value, options).await
    }

    fn meta(&self) -> Meta {
        self.resolve().meta()
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.resolve().materialize(value, options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.resolve().materialize_async(value, options).await
    }
}

/// Defer building a schema until it is first used.
pub fn lazy<F>(thunk: F) -> SchemaRef
where
    F: Fn() -> SchemaRef + Send + Sync + 'static,
{
    LazySchema {
        thunk: Box::new(thunk),
        resolved: OnceCell::new(),
    }
    .into_ref()
}
