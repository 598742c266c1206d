//! # Negation
//!
//! `not(s)` accepts exactly the values `s` rejects; a value `s` accepts
//! gets a `not` issue. Negation produces no value: parse yields `Absent`,
//! so pair it with a positive schema through `and` to get an output.

use async_trait::async_trait;

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

#[derive(Debug, Clone)]
pub struct NotSchema {
    inner: SchemaRef,
}

impl NotSchema {
    fn verdict(&self, value: &Value, accepted: bool) -> ValidationResult {
        accepted.then(|| Validation::Issue(ValidationIssue::new(codes::NOT, value.clone())))
    }
}

#[async_trait]
impl Schema for NotSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let first_failure = options.with_early_exit(true);
        let accepted = self.inner.validate(value, &first_failure).is_none();
        self.verdict(value, accepted)
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let first_failure = options.with_early_exit(true);
        let accepted = self.inner.validate_async(value, &first_failure).await.is_none();
        self.verdict(value, accepted)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Not(self.inner.clone()))
    }

    fn materialize(&self, _value: &Value, _options: &ValidationOptions) -> ParseResult {
        Ok(Value::Absent)
    }
}

pub fn not(inner: SchemaRef) -> SchemaRef {
    NotSchema { inner }.into_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::and::and;
    use assay_schema::{literal, string};

    #[test]
    fn inverts_acceptance() {
        let schema = not(string());
        let opts = ValidationOptions::default();
        assert!(schema.validate(&Value::from(1), &opts).is_none());
        let failure = schema.validate(&Value::from("a"), &opts).unwrap();
        assert_eq!(failure.as_issue().unwrap().code, codes::NOT);
    }

    #[test]
    fn parse_through_intersection() {
        let schema = and(vec![string(), not(literal("root"))]);
        let opts = ValidationOptions::default();
        assert_eq!(schema.parse(&Value::from("alice"), &opts), Ok(Value::from("alice")));
        assert!(schema.parse(&Value::from("root"), &opts).is_err());
        assert_eq!(not(string()).parse(&Value::from(1), &opts), Ok(Value::Absent));
    }
}
