//! # Union
//!
//! `or(a, b, ..)` tries operands in order and the first one that accepts
//! the value wins. When none does, the failure of the **last** operand is
//! reported, not the most specific one, so order operands by priority.
//!
//! Parse selects the winning operand in one validation pass and
//! materializes with it alone. With no viable branch parse returns the last
//! failure as `Err`, like every other schema.

use async_trait::async_trait;

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

#[derive(Debug, Clone)]
pub struct OrSchema {
    operands: Vec<SchemaRef>,
}

/// Failure of a union with no operands.
pub(crate) fn no_alternatives(value: &Value) -> Validation {
    Validation::Issue(
        ValidationIssue::new(codes::INVALID_VALUE, value.clone())
            .with_message("no alternatives to match"),
    )
}

impl OrSchema {
    fn select(&self, value: &Value, options: &ValidationOptions) -> Result<&SchemaRef, Validation> {
        let mut last = no_alternatives(value);
        for (index, operand) in self.operands.iter().enumerate() {
            match operand.validate(value, options) {
                None => {
                    tracing::debug!(branch = index, "union branch selected");
                    return Ok(operand);
                }
                Some(failure) => last = failure,
            }
        }
        tracing::debug!(branches = self.operands.len(), "no union branch accepts the value");
        Err(last)
    }

    async fn select_async(
        &self,
        value: &Value,
        options: &ValidationOptions,
    ) -> Result<&SchemaRef, Validation> {
        let mut last = no_alternatives(value);
        for (index, operand) in self.operands.iter().enumerate() {
            match operand.validate_async(value, options).await {
                None => {
                    tracing::debug!(branch = index, "union branch selected");
                    return Ok(operand);
                }
                Some(failure) => last = failure,
            }
        }
        Err(last)
    }
}

#[async_trait]
impl Schema for OrSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.select(value, options).err()
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        self.select_async(value, options).await.err()
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Or(self.operands.clone()))
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

/// A value must satisfy at least one operand. With no operands every value
/// is rejected with `invalid_value`.
pub fn or(operands: Vec<SchemaRef>) -> SchemaRef {
    OrSchema { operands }.into_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_schema::{boolean, number, string};

    fn opts() -> ValidationOptions {
        ValidationOptions::default()
    }

    #[test]
    fn reports_the_last_failure() {
        let failure = or(vec![string(), number()])
            .validate(&Value::Bool(true), &opts())
            .unwrap();
        let issue = failure.as_issue().unwrap();
        assert_eq!(issue.code, codes::WRONG_TYPE);
        assert_eq!(issue.args, vec![Value::from("number")]);
    }

    #[test]
    fn first_accepting_branch_parses() {
        let coerce = opts().with_coercion(true);
        let schema = or(vec![number(), string()]);
        // both accept "5" under coercion; the first one wins
        assert_eq!(schema.parse(&Value::from("5"), &coerce), Ok(Value::from(5)));
        let schema = or(vec![string(), number()]);
        assert_eq!(schema.parse(&Value::from("5"), &coerce), Ok(Value::from("5")));
    }

    #[test]
    fn parse_without_a_branch_returns_the_failure() {
        let parsed = or(vec![string(), boolean()]).parse(&Value::from(1), &opts());
        let failure = parsed.unwrap_err();
        assert_eq!(failure.as_issue().unwrap().args, vec![Value::from("boolean")]);
    }

    #[test]
    fn empty_union_rejects_everything() {
        let failure = or(vec![]).validate(&Value::Null, &opts()).unwrap();
        assert_eq!(failure.as_issue().unwrap().code, codes::INVALID_VALUE);
    }

    #[tokio::test]
    async fn async_selects_like_sync() {
        let schema = or(vec![string(), number()]);
        assert!(schema.validate_async(&Value::from(1), &opts()).await.is_none());
        assert_eq!(
            schema.parse_async(&Value::from("a"), &opts()).await,
            Ok(Value::from("a"))
        );
    }
}
