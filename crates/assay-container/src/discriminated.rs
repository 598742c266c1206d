//! # Discriminated Unions
//!
//! A union of object schemas selected by one field. The first variant
//! whose declared discriminant schema accepts the input's discriminant
//! value takes over validation and parsing entirely. When no variant
//! matches, the result is a single `unknownDiscriminant` issue on the
//! discriminant value, carrying the field name.
//!
//! Variants are checked at construction: each must describe itself as an
//! object declaring the discriminant field.

use async_trait::async_trait;

use assay_core::{
    codes, AssayError, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value,
};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::support::precheck_failure;

#[derive(Debug, Clone)]
struct Variant {
    discriminant: SchemaRef,
    schema: SchemaRef,
}

#[derive(Debug, Clone)]
pub struct DiscriminatedSchema {
    field: String,
    variants: Vec<Variant>,
}

impl DiscriminatedSchema {
    /// # Errors
    ///
    /// Returns `AssayError::Composition` when a variant is not an object
    /// declaring `field`.
    pub fn new(field: impl Into<String>, variants: Vec<SchemaRef>) -> Result<Self, AssayError> {
        let field = field.into();
        let mut checked = Vec::with_capacity(variants.len());
        for (index, schema) in variants.into_iter().enumerate() {
            let meta = schema.meta();
            let Some(discriminant) = meta.object_field(&field).cloned() else {
                return Err(AssayError::Composition(format!(
                    "variant {index} ({}) does not declare discriminant field '{field}'",
                    meta.type_tag()
                )));
            };
            checked.push(Variant {
                discriminant,
                schema,
            });
        }
        Ok(Self {
            field,
            variants: checked,
        })
    }

    fn tag<'v>(&self, value: &'v Value) -> &'v Value {
        value.field(&self.field)
    }

    fn select(&self, tag: &Value, options: &ValidationOptions) -> Option<&SchemaRef> {
        let first_failure = options.with_early_exit(true);
        self.variants
            .iter()
            .find(|variant| variant.discriminant.validate(tag, &first_failure).is_none())
            .map(|variant| &variant.schema)
    }

    async fn select_async(&self, tag: &Value, options: &ValidationOptions) -> Option<&SchemaRef> {
        let first_failure = options.with_early_exit(true);
        for variant in &self.variants {
            if variant.discriminant.validate_async(tag, &first_failure).await.is_none() {
                return Some(&variant.schema);
            }
        }
        None
    }

    fn unknown(&self, tag: &Value) -> Validation {
        tracing::debug!(field = %self.field, discriminant = %tag, "no variant matches discriminant");
        Validation::Issue(
            ValidationIssue::new(codes::UNKNOWN_DISCRIMINANT, tag.clone())
                .with_args([Value::from(self.field.as_str())]),
        )
    }
}

#[async_trait]
impl Schema for DiscriminatedSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        if !matches!(value, Value::Object(_)) {
            return precheck_failure(value, "object");
        }
        let tag = self.tag(value);
        match self.select(tag, options) {
            Some(schema) => schema.validate(value, options),
            None => Some(self.unknown(tag)),
        }
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        if !matches!(value, Value::Object(_)) {
            return precheck_failure(value, "object");
        }
        let tag = self.tag(value);
        match self.select_async(tag, options).await {
            Some(schema) => schema.validate_async(value, options).await,
            None => Some(self.unknown(tag)),
        }
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Discriminated {
            field: self.field.clone(),
            variants: self.variants.iter().map(|v| v.schema.clone()).collect(),
        })
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let tag = self.tag(value);
        match self.select(tag, options) {
            Some(schema) => schema.materialize(value, options),
            None => Err(self.unknown(tag)),
        }
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let tag = self.tag(value);
        match self.select_async(tag, options).await {
            Some(schema) => schema.materialize_async(value, options).await,
            None => Err(self.unknown(tag)),
        }
    }
}

/// A union of object schemas selected by `field`.
///
/// # Errors
///
/// Returns `AssayError::Composition` when a variant is not an object
/// declaring `field`.
pub fn discriminated(
    field: impl Into<String>,
    variants: Vec<SchemaRef>,
) -> Result<SchemaRef, AssayError> {
    Ok(DiscriminatedSchema::new(field, variants)?.into_ref())
}
