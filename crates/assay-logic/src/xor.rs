//! # Exclusive Union
//!
//! `xor(a, b, ..)` validates the value against every operand and succeeds
//! only when exactly one accepts it. With no acceptor the last failure is
//! reported; with several, a single `xor` issue carrying the number of
//! acceptors, whichever they were.

use async_trait::async_trait;

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

use crate::or::no_alternatives;

#[derive(Debug, Clone)]
pub struct XorSchema {
    operands: Vec<SchemaRef>,
}

/// Running tally of an exclusive union.
struct Tally<'s> {
    accepted: Option<&'s SchemaRef>,
    successes: usize,
    last: Validation,
}

impl<'s> Tally<'s> {
    fn new(value: &Value) -> Self {
        Self {
            accepted: None,
            successes: 0,
            last: no_alternatives(value),
        }
    }

    fn record(&mut self, operand: &'s SchemaRef, result: ValidationResult) {
        match result {
            None => {
                self.successes += 1;
                self.accepted.get_or_insert(operand);
            }
            Some(failure) => self.last = failure,
        }
    }

    fn finish(self, value: &Value) -> Result<&'s SchemaRef, Validation> {
        match (self.successes, self.accepted) {
            (1, Some(operand)) => Ok(operand),
            (0, _) | (_, None) => Err(self.last),
            (count, Some(_)) => {
                tracing::debug!(successes = count, "exclusive union is ambiguous");
                Err(Validation::Issue(
                    ValidationIssue::new(codes::XOR, value.clone()).with_args([Value::from(count)]),
                ))
            }
        }
    }
}

impl XorSchema {
    fn select(&self, value: &Value, options: &ValidationOptions) -> Result<&SchemaRef, Validation> {
        let mut tally = Tally::new(value);
        for operand in &self.operands {
            tally.record(operand, operand.validate(value, options));
        }
        tally.finish(value)
    }

    async fn select_async(
        &self,
        value: &Value,
        options: &ValidationOptions,
    ) -> Result<&SchemaRef, Validation> {
        let mut tally = Tally::new(value);
        for operand in &self.operands {
            let result = operand.validate_async(value, options).await;
            tally.record(operand, result);
        }
        tally.finish(value)
    }
}

#[async_trait]
impl Schema for XorSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.select(value, options).err()
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.select_async(value, options).await.err()
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Xor(self.operands.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.select(value, options)?.materialize(value, options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let operand = self.select_async(value, options).await?;
        operand.materialize_async(value, options).await
    }

    fn parse(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.materialize(value, options)
    }

    async fn parse_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.materialize_async(value, options).await
    }
}

/// A value must satisfy exactly one operand. With no operands every value
/// is rejected with `invalid_value`.
pub fn xor(operands: Vec<SchemaRef>) -> SchemaRef {
    XorSchema { operands }.into_ref()
}
