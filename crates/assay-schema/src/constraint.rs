//! # Constraint Refinements
//!
//! Common refinements over leaf schemas. Each is a [`refine_with`] that
//! records a [`Constraint`] named after the issue code it reports, so
//! `minimum(number(), 0.0).meta().constraint("minimum")` is `Some(0)`.
//!
//! Constraints only see values the base already accepted. Under
//! `with_coercion` the numeric and date constraints read the same textual
//! forms the leaves accept.

use chrono::{DateTime, Utc};
use regex::Regex;

use assay_core::{codes, Value};

use crate::leaf::{instant, numeric};
use crate::meta::Constraint;
use crate::refine::refine_with;
use crate::schema::SchemaRef;

/// Tolerance for `multiple_of` on binary floating point.
const MULTIPLE_EPSILON: f64 = 1e-9;

/// Length of a string (in characters) or of any collection.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) | Value::Set(items) => Some(items.len()),
        Value::Object(fields) => Some(fields.len()),
        Value::Map(entries) => Some(entries.len()),
        _ => None,
    }
}

fn text_of(value: &Value, coerce: bool) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) if coerce => Some(value.to_string()),
        _ => None,
    }
}

/// Measured values (strings, collections) must hold at least `min` elements.
pub fn min_length(base: SchemaRef, min: usize) -> SchemaRef {
    let constraint = Constraint::new(codes::MIN_LENGTH, min);
    refine_with(base, vec![constraint], move |value, ctx| {
        Ok(length_of(value)
            .and_then(|len| ctx.check(len >= min, codes::MIN_LENGTH, &[Value::from(min)])))
    })
}

/// Measured values (strings, collections) must hold at most `max` elements.
pub fn max_length(base: SchemaRef, max: usize) -> SchemaRef {
    let constraint = Constraint::new(codes::MAX_LENGTH, max);
    refine_with(base, vec![constraint], move |value, ctx| {
        Ok(length_of(value)
            .and_then(|len| ctx.check(len <= max, codes::MAX_LENGTH, &[Value::from(max)])))
    })
}

/// Strings must contain a match of `regex`. Anchor the expression to
/// require a full match.
pub fn pattern(base: SchemaRef, regex: Regex) -> SchemaRef {
    let source = Value::from(regex.as_str());
    let constraint = Constraint::new(codes::PATTERN, source.clone());
    refine_with(base, vec![constraint], move |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(text_of(value, coerce).and_then(|text| {
            ctx.check(regex.is_match(&text), codes::PATTERN, &[source.clone()])
        }))
    })
}

/// Numbers strictly greater than zero.
pub fn positive(base: SchemaRef) -> SchemaRef {
    let constraint = Constraint::new(codes::POSITIVE, true);
    refine_with(base, vec![constraint], |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(numeric(value, coerce).and_then(|n| ctx.check(n > 0.0, codes::POSITIVE, &[])))
    })
}

/// Numbers at least `bound`.
pub fn minimum(base: SchemaRef, bound: f64) -> SchemaRef {
    let constraint = Constraint::new(codes::MINIMUM, bound);
    refine_with(base, vec![constraint], move |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(numeric(value, coerce)
            .and_then(|n| ctx.check(n >= bound, codes::MINIMUM, &[Value::from(bound)])))
    })
}

/// Numbers at most `bound`.
pub fn maximum(base: SchemaRef, bound: f64) -> SchemaRef {
    let constraint = Constraint::new(codes::MAXIMUM, bound);
    refine_with(base, vec![constraint], move |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(numeric(value, coerce)
            .and_then(|n| ctx.check(n <= bound, codes::MAXIMUM, &[Value::from(bound)])))
    })
}

/// Numbers that are an integral multiple of `divisor`. A zero divisor
/// accepts only zero.
pub fn multiple_of(base: SchemaRef, divisor: f64) -> SchemaRef {
    let constraint = Constraint::new(codes::MULTIPLE_OF, divisor);
    refine_with(base, vec![constraint], move |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(numeric(value, coerce).and_then(|n| {
            let ok = if divisor == 0.0 {
                n == 0.0
            } else {
                let quotient = n / divisor;
                (quotient - quotient.round()).abs() < MULTIPLE_EPSILON
            };
            ctx.check(ok, codes::MULTIPLE_OF, &[Value::from(divisor)])
        }))
    })
}

/// Dates strictly before `bound`.
pub fn before(base: SchemaRef, bound: DateTime<Utc>) -> SchemaRef {
    let constraint = Constraint::new(codes::BEFORE, bound);
    refine_with(base, vec![constraint], move |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(instant(value, coerce)
            .and_then(|d| ctx.check(d < bound, codes::BEFORE, &[Value::from(bound)])))
    })
}

/// Dates strictly after `bound`.
pub fn after(base: SchemaRef, bound: DateTime<Utc>) -> SchemaRef {
    let constraint = Constraint::new(codes::AFTER, bound);
    refine_with(base, vec![constraint], move |value, ctx| {
        let coerce = ctx.options().with_coercion;
        Ok(instant(value, coerce)
            .and_then(|d| ctx.check(d > bound, codes::AFTER, &[Value::from(bound)])))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{date, integer, number, string};
    use assay_core::{ValidationOptions, ValidationResult};
    use chrono::TimeZone;

    fn code_of(result: ValidationResult) -> Option<String> {
        result.and_then(|v| v.as_issue().map(|i| i.code.clone()))
    }

    #[test]
    fn length_counts_characters() {
        let schema = min_length(string(), 3);
        assert!(schema.accepts(&Value::from("héé")));
        let opts = ValidationOptions::default();
        let failure = schema.validate(&Value::from("hé"), &opts).unwrap();
        let issue = failure.as_issue().unwrap();
        assert_eq!(issue.code, codes::MIN_LENGTH);
        assert_eq!(issue.args, vec![Value::from(3)]);
        assert_eq!(issue.render(), "length must be at least 3");
    }

    #[test]
    fn stacked_constraints_keep_base_type_and_both_entries() {
        let schema = max_length(min_length(string(), 2), 4);
        let meta = schema.meta();
        assert_eq!(meta.type_tag(), "string");
        assert_eq!(meta.constraint(codes::MIN_LENGTH), Some(&Value::from(2)));
        assert_eq!(meta.constraint(codes::MAX_LENGTH), Some(&Value::from(4)));
        assert!(!schema.accepts(&Value::from("abcde")));
        assert!(!schema.accepts(&Value::from("a")));
        assert!(schema.accepts(&Value::from("abc")));
    }

    #[test]
    fn pattern_matches_and_records_source() {
        let schema = pattern(string(), Regex::new("^[a-z]+$").unwrap());
        assert!(schema.accepts(&Value::from("slug")));
        let opts = ValidationOptions::default();
        assert_eq!(
            code_of(schema.validate(&Value::from("Not A Slug"), &opts)).as_deref(),
            Some(codes::PATTERN)
        );
        assert_eq!(
            schema.meta().constraint(codes::PATTERN),
            Some(&Value::from("^[a-z]+$"))
        );
    }

    #[test]
    fn numeric_bounds() {
        let opts = ValidationOptions::default();
        let schema = maximum(minimum(number(), 1.0), 10.0);
        assert!(schema.accepts(&Value::from(1)));
        assert!(schema.accepts(&Value::from(10)));
        assert_eq!(code_of(schema.validate(&Value::from(0), &opts)).as_deref(), Some(codes::MINIMUM));
        assert_eq!(code_of(schema.validate(&Value::from(11), &opts)).as_deref(), Some(codes::MAXIMUM));
        assert!(!positive(number()).accepts(&Value::from(0)));
        assert!(positive(number()).accepts(&Value::from(0.5)));
    }

    #[test]
    fn multiple_of_tolerates_float_error() {
        let schema = multiple_of(number(), 0.1);
        assert!(schema.accepts(&Value::from(0.3)));
        assert!(!schema.accepts(&Value::from(0.35)));
        assert!(multiple_of(integer(), 0.0).accepts(&Value::from(0)));
        assert!(!multiple_of(integer(), 0.0).accepts(&Value::from(4)));
    }

    #[test]
    fn constraints_follow_coercion() {
        let schema = minimum(number(), 5.0);
        let coerce = ValidationOptions::default().with_coercion(true);
        assert_eq!(
            code_of(schema.validate(&Value::from("3"), &coerce)).as_deref(),
            Some(codes::MINIMUM)
        );
        assert!(schema.validate(&Value::from("7"), &coerce).is_none());
    }

    #[test]
    fn date_bounds_are_strict() {
        let bound = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        assert!(before(date(), bound).accepts(&Value::from(earlier)));
        assert!(!before(date(), bound).accepts(&Value::from(bound)));
        assert!(!after(date(), bound).accepts(&Value::from(bound)));
        assert!(after(date(), earlier).accepts(&Value::from(bound)));
    }

    #[test]
    fn base_failure_wins_over_constraint() {
        let opts = ValidationOptions::default();
        let schema = min_length(string(), 3);
        assert_eq!(code_of(schema.validate(&Value::from(5), &opts)).as_deref(), Some(codes::WRONG_TYPE));
    }
}
