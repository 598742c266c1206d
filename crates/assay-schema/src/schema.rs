//! # The Schema Contract
//!
//! Every validator, leaf or composite, implements [`Schema`]. Only
//! [`Schema::validate`] and [`Schema::meta`] are required; everything else
//! has a default derived from them:
//!
//! - `accepts(v)` is `validate(v)` succeeding.
//! - `validate_async` delegates to `validate`.
//! - `parse` validates (unless `skip_validation`) and then calls
//!   `materialize`, which builds the output value and by default returns
//!   the input unchanged.
//!
//! Schemas are immutable after construction and `Send + Sync`, so one
//! [`SchemaRef`] can serve any number of concurrent callers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use assay_core::{AssayError, Validation, ValidationOptions, ValidationResult, Value};

use crate::meta::Meta;

/// Parsed output on success, the failure tree otherwise.
pub type ParseResult = Result<Value, Validation>;

/// Shared handle to a schema of any kind.
pub type SchemaRef = Arc<dyn Schema>;

/// A composable validator and parser.
#[async_trait]
pub trait Schema: fmt::Debug + Send + Sync {
    /// Validate without suspending.
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult;

    /// Validate, awaiting asynchronous children and refinements.
    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.validate(value, options)
    }

    /// Structured description of this schema.
    fn meta(&self) -> Meta;

    /// Build the output value for an input that already passed validation.
    fn materialize(&self, value: &Value, _options: &ValidationOptions) -> ParseResult {
        Ok(value.clone())
    }

    /// Asynchronous analogue of [`Schema::materialize`].
    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.materialize(value, options)
    }

    /// True when `value` passes synchronous validation.
    fn accepts(&self, value: &Value) -> bool {
        let options = ValidationOptions::default().with_early_exit(true);
        self.validate(value, &options).is_none()
    }

    /// True when `value` passes asynchronous validation.
    async fn accepts_async(&self, value: &Value) -> bool {
        let options = ValidationOptions::default().with_early_exit(true);
        self.validate_async(value, &options).await.is_none()
    }

    /// Validate, then build the output value.
    fn parse(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        if !options.skip_validation {
            if let Some(failure) = self.validate(value, options) {
                return Err(failure);
            }
        }
        self.materialize(value, options)
    }

    /// Asynchronous analogue of [`Schema::parse`].
    async fn parse_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        if !options.skip_validation {
            if let Some(failure) = self.validate_async(value, options).await {
                return Err(failure);
            }
        }
        self.materialize_async(value, options).await
    }
}

/// Conveniences available on every schema.
pub trait SchemaExt: Schema {
    /// Move this schema behind a shared handle.
    fn into_ref(self) -> SchemaRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }

    /// Parse and deserialize the output into a Rust type.
    ///
    /// # Errors
    ///
    /// Returns `AssayError::Invalid` when validation fails and
    /// `AssayError::Deserialize` when the parsed value does not fit `T`.
    fn parse_into<T: DeserializeOwned>(
        &self,
        value: &Value,
        options: &ValidationOptions,
    ) -> Result<T, AssayError> {
        let parsed = self.parse(value, options).map_err(AssayError::Invalid)?;
        Ok(serde_json::from_value(parsed.to_json()?)?)
    }
}

impl<S: Schema + ?Sized> SchemaExt for S {}
