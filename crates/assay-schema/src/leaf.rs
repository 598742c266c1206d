//! # Leaf Validators
//!
//! Thin schemas for scalar values. Each one reports `required` for an
//! absent value and `wrong_type` (with the expected kind as argument) for a
//! value of the wrong kind.
//!
//! With `with_coercion` set, leaves also accept a textual representation
//! and `materialize` converts it:
//!
//! | schema    | also accepts                    |
//! |-----------|---------------------------------|
//! | `string`  | numbers, booleans               |
//! | `number`  | numeric strings                 |
//! | `boolean` | `"true"`, `"false"`             |
//! | `date`    | RFC 3339 strings                |

use chrono::{DateTime, Utc};

use assay_core::{codes, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value};

use crate::meta::{Meta, MetaKind};
use crate::schema::{ParseResult, Schema, SchemaExt, SchemaRef};

fn fail(issue: ValidationIssue) -> ValidationResult {
    Some(Validation::Issue(issue))
}

fn kind_check(value: &Value, expected: &str, matches: bool) -> ValidationResult {
    if matches {
        None
    } else if value.is_absent() {
        fail(ValidationIssue::required())
    } else {
        fail(ValidationIssue::wrong_type(value, expected))
    }
}

/// Read a number, parsing numeric strings when coercing.
pub(crate) fn numeric(value: &Value, coerce: bool) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) if coerce => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Read a date, parsing RFC 3339 strings when coercing.
pub(crate) fn instant(value: &Value, coerce: bool) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(d) => Some(*d),
        Value::String(s) if coerce => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        _ => None,
    }
}

fn truth(value: &Value, coerce: bool) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if coerce => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Accepts any present value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl Schema for AnySchema {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> ValidationResult {
        kind_check(value, "any", !value.is_absent())
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Any)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringSchema;

impl Schema for StringSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let ok = match value {
            Value::String(_) => true,
            Value::Number(_) | Value::Bool(_) => options.with_coercion,
            _ => false,
        };
        kind_check(value, "string", ok)
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::String)
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        Ok(match value {
            Value::Number(_) | Value::Bool(_) if options.with_coercion => {
                Value::String(value.to_string())
            }
            _ => value.clone(),
        })
    }
}

/// Numbers, optionally restricted to integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema {
    integer: bool,
}

impl Schema for NumberSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let expected = if self.integer { "integer" } else { "number" };
        match numeric(value, options.with_coercion) {
            Some(n) if self.integer && n.fract() != 0.0 => {
                fail(ValidationIssue::new(codes::INTEGER, value.clone()))
            }
            Some(_) => None,
            None => kind_check(value, expected, false),
        }
    }

    fn meta(&self) -> Meta {
        Meta::new(if self.integer {
            MetaKind::Integer
        } else {
            MetaKind::Number
        })
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        Ok(numeric(value, options.with_coercion).map_or_else(|| value.clone(), Value::Number))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanSchema;

impl Schema for BooleanSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        kind_check(value, "boolean", truth(value, options.with_coercion).is_some())
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Boolean)
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        Ok(truth(value, options.with_coercion).map_or_else(|| value.clone(), Value::Bool))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchema;

impl Schema for NullSchema {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> ValidationResult {
        kind_check(value, "null", value.is_null())
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Null)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateSchema;

impl Schema for DateSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        kind_check(value, "date", instant(value, options.with_coercion).is_some())
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::Date)
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        Ok(instant(value, options.with_coercion).map_or_else(|| value.clone(), Value::Date))
    }
}

/// Accepts exactly one of a fixed list of values.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    allowed: Vec<Value>,
}

impl Schema for LiteralSchema {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> ValidationResult {
        if self.allowed.contains(value) {
            None
        } else if value.is_absent() {
            fail(ValidationIssue::required())
        } else {
            fail(ValidationIssue::new(codes::LITERAL, value.clone()).with_args(self.allowed.clone()))
        }
    }

    fn meta(&self) -> Meta {
        match self.allowed.as_slice() {
            [single] => Meta::new(MetaKind::Literal(single.clone())),
            many => Meta::new(MetaKind::Literals(many.to_vec())),
        }
    }
}

/// Accepts every present value.
pub fn any() -> SchemaRef {
    AnySchema.into_ref()
}

/// Accepts strings.
pub fn string() -> SchemaRef {
    StringSchema.into_ref()
}

/// Accepts numbers.
pub fn number() -> SchemaRef {
    NumberSchema { integer: false }.into_ref()
}

/// Accepts numbers with no fractional part.
pub fn integer() -> SchemaRef {
    NumberSchema { integer: true }.into_ref()
}

/// Accepts `true` and `false`.
pub fn boolean() -> SchemaRef {
    BooleanSchema.into_ref()
}

/// Accepts only null.
pub fn null() -> SchemaRef {
    NullSchema.into_ref()
}

/// Accepts dates, and RFC 3339 strings under coercion.
pub fn date() -> SchemaRef {
    DateSchema.into_ref()
}

/// Accepts exactly `value`.
pub fn literal(value: impl Into<Value>) -> SchemaRef {
    LiteralSchema {
        allowed: vec![value.into()],
    }
    .into_ref()
}

/// Accepts any one of `values` (an enumeration).
pub fn literals<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> SchemaRef {
    LiteralSchema {
        allowed: values.into_iter().map(Into::into).collect(),
    }
    .into_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(result: ValidationResult) -> String {
        result
            .and_then(|v| v.as_issue().map(|i| i.code.clone()))
            .unwrap_or_default()
    }

    #[test]
    fn absent_is_required_and_wrong_kind_is_wrong_type() {
        let opts = ValidationOptions::default();
        assert_eq!(code(string().validate(&Value::Absent, &opts)), codes::REQUIRED);
        let failure = number().validate(&Value::from("x"), &opts).unwrap();
        let issue = failure.as_issue().unwrap();
        assert_eq!(issue.code, codes::WRONG_TYPE);
        assert_eq!(issue.args, vec![Value::from("number")]);
    }

    #[test]
    fn integer_rejects_fractions() {
        let opts = ValidationOptions::default();
        assert!(integer().validate(&Value::from(3), &opts).is_none());
        assert_eq!(code(integer().validate(&Value::from(3.5), &opts)), codes::INTEGER);
    }

    #[test]
    fn coercion_widens_and_converts() {
        let plain = ValidationOptions::default();
        let coerce = plain.with_coercion(true);
        assert!(number().validate(&Value::from("12.5"), &plain).is_some());
        assert_eq!(number().parse(&Value::from("12.5"), &coerce), Ok(Value::from(12.5)));
        assert_eq!(boolean().parse(&Value::from("true"), &coerce), Ok(Value::Bool(true)));
        assert_eq!(string().parse(&Value::from(7), &coerce), Ok(Value::from("7")));
        assert!(boolean().validate(&Value::from("yes"), &coerce).is_some());
    }

    #[test]
    fn date_coerces_rfc3339() {
        let coerce = ValidationOptions::default().with_coercion(true);
        let parsed = date().parse(&Value::from("2024-05-01T12:00:00Z"), &coerce).unwrap();
        match parsed {
            Value::Date(d) => assert_eq!(d.to_rfc3339(), "2024-05-01T12:00:00+00:00"),
            other => panic!("expected date, got {other:?}"),
        }
        assert!(date().validate(&Value::from("yesterday"), &coerce).is_some());
    }

    #[test]
    fn literals_report_allowed_values() {
        let opts = ValidationOptions::default();
        let schema = literals(["admin", "user"]);
        assert!(schema.accepts(&Value::from("admin")));
        let failure = schema.validate(&Value::from("root"), &opts).unwrap();
        let issue = failure.as_issue().unwrap();
        assert_eq!(issue.code, codes::LITERAL);
        assert_eq!(issue.args.len(), 2);
        assert_eq!(schema.meta().type_tag(), "literals");
        assert_eq!(literal(1).meta().type_tag(), "literal");
    }

    #[test]
    fn null_and_any() {
        let opts = ValidationOptions::default();
        assert!(null().validate(&Value::Null, &opts).is_none());
        assert_eq!(code(null().validate(&Value::from(0), &opts)), codes::WRONG_TYPE);
        assert!(any().validate(&Value::Null, &opts).is_none());
        assert_eq!(code(any().validate(&Value::Absent, &opts)), codes::REQUIRED);
    }
}
