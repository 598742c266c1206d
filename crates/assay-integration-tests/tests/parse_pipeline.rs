//! Parse pipeline across crates: coercion, stripping, projections and the
//! typed boundary into Rust structs.

use assay_container::{array, object, strict_object, ObjectSchema};
use assay_core::{codes, AssayError, OptionOverrides, ValidationOptions, Value};
use assay_logic::{and, or};
use assay_schema::{
    boolean, date, integer, number, optional, string, Schema, SchemaExt, SchemaRefExt,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Account {
    name: String,
    age: u32,
    active: bool,
    #[serde(default)]
    tags: Vec<String>,
}

fn account() -> assay_schema::SchemaRef {
    object([
        ("name", string().min_length(1)),
        ("age", integer().minimum(0.0)),
        ("active", boolean()),
        ("tags", optional(array(string()))),
    ])
}

// ---------------------------------------------------------------------------
// Typed boundary
// ---------------------------------------------------------------------------

#[test]
fn parse_into_struct() {
    let input = Value::object([
        ("name", Value::from("ada")),
        ("age", Value::from(36)),
        ("active", Value::Bool(true)),
        ("tags", Value::Array(vec![Value::from("admin")])),
    ]);
    let parsed: Account = account()
        .parse_into(&input, &ValidationOptions::default())
        .unwrap();
    assert_eq!(
        parsed,
        Account {
            name: "ada".into(),
            age: 36,
            active: true,
            tags: vec!["admin".into()],
        }
    );
}

#[test]
fn parse_into_reports_the_failure_tree() {
    let input = Value::object([("name", Value::from("")), ("active", Value::Bool(true))]);
    let err = account()
        .parse_into::<Account>(&input, &ValidationOptions::default())
        .unwrap_err();
    match err {
        AssayError::Invalid(failure) => {
            let name = failure.field("name").and_then(|f| f.as_issue()).unwrap();
            assert_eq!(name.code, codes::MIN_LENGTH);
            let age = failure.field("age").and_then(|f| f.as_issue()).unwrap();
            assert_eq!(age.code, codes::REQUIRED);
        }
        other => panic!("expected a validation failure, got {other}"),
    }
}

#[test]
fn coerced_input_parses_into_struct() {
    let input = Value::object([
        ("name", Value::from("grace")),
        ("age", Value::from("85")),
        ("active", Value::from("false")),
    ]);
    let opts = ValidationOptions::default().with_coercion(true);
    let parsed: Account = account().parse_into(&input, &opts).unwrap();
    assert_eq!(parsed.age, 85);
    assert!(!parsed.active);
    assert!(parsed.tags.is_empty());

    let err = account()
        .parse_into::<Account>(&input, &ValidationOptions::default())
        .unwrap_err();
    assert!(matches!(err, AssayError::Invalid(_)));
}

// ---------------------------------------------------------------------------
// Undeclared keys
// ---------------------------------------------------------------------------

#[test]
fn nested_objects_strip_by_default() {
    let schema = object([("owner", object([("id", integer())]))]);
    let input = Value::object([(
        "owner",
        Value::object([("id", Value::from(7)), ("note", Value::from("x"))]),
    )]);
    let stripped = schema.parse(&input, &ValidationOptions::default()).unwrap();
    assert_eq!(
        stripped,
        Value::object([("owner", Value::object([("id", Value::from(7))]))])
    );
    let kept = schema
        .parse(&input, &ValidationOptions::default().with_strip(false))
        .unwrap();
    assert_eq!(kept, input);
}

#[test]
fn strict_object_inside_array_reports_index_and_key() {
    let schema = array(strict_object([("id", integer())]));
    let input = Value::Array(vec![
        Value::object([("id", Value::from(1))]),
        Value::object([("id", Value::from(2)), ("rogue", Value::Bool(true))]),
    ]);
    let failure = schema.validate(&input, &ValidationOptions::default()).unwrap();
    let issue = failure
        .index(1)
        .and_then(|item| item.field("rogue"))
        .and_then(|f| f.as_issue())
        .unwrap();
    assert_eq!(issue.code, codes::ADDITIONAL_PROPERTY);
    assert!(failure.index(0).is_none());
}

#[test]
fn additional_schema_parses_extras() {
    let schema = ObjectSchema::new([("id", integer())])
        .additional(number().coerce(|v| match v {
            Value::String(s) => s.parse::<f64>().map(Value::from).unwrap_or_else(|_| v.clone()),
            other => other.clone(),
        }))
        .into_ref();
    let input = Value::object([("id", Value::from(1)), ("weight", Value::from("2.5"))]);
    let parsed = schema.parse(&input, &ValidationOptions::default()).unwrap();
    assert_eq!(parsed.field("weight"), &Value::from(2.5));
    let bad = Value::object([("id", Value::from(1)), ("weight", Value::from("heavy"))]);
    assert!(!schema.accepts(&bad));
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[test]
fn transform_runs_after_children_parse() {
    let schema = object([("tags", array(string()))]).transform(|out| {
        let count = out.field("tags").as_array().map_or(0, <[Value]>::len);
        Value::from(count)
    });
    let input = Value::object([(
        "tags",
        Value::Array(vec![Value::from("a"), Value::from("b")]),
    )]);
    assert_eq!(
        schema.parse(&input, &ValidationOptions::default()),
        Ok(Value::from(2))
    );
}

#[test]
fn narrow_normalizes_only_the_output() {
    let trimmed = string()
        .pattern(regex::Regex::new(r"^\s*[a-z]+\s*$").unwrap())
        .narrow(|v| match v.as_str() {
            Some(s) => Value::from(s.trim()),
            None => v.clone(),
        });
    let schema = object([("slug", trimmed)]);
    let input = Value::object([("slug", Value::from("  hello "))]);
    let opts = ValidationOptions::default();
    assert!(schema.validate(&input, &opts).is_none());
    assert_eq!(
        schema.parse(&input, &opts).unwrap().field("slug"),
        &Value::from("hello")
    );
}

#[test]
fn union_parses_through_the_matching_branch() {
    let epoch = number().transform(|n| Value::from(format!("epoch:{}", n.as_f64().unwrap_or(0.0))));
    let stamp = or(vec![date(), epoch]);
    let opts = ValidationOptions::default();
    assert_eq!(stamp.parse(&Value::from(5), &opts), Ok(Value::from("epoch:5")));
    let err = stamp.parse(&Value::from("tomorrow"), &opts).unwrap_err();
    assert_eq!(err.as_issue().unwrap().code, codes::WRONG_TYPE);
}

#[test]
fn intersection_merges_object_outputs() {
    let shout = string().transform(|v| match v {
        Value::String(s) => Value::from(s.to_uppercase()),
        other => other,
    });
    let schema = and(vec![object([("id", integer())]), object([("label", shout)])]);
    let input = Value::object([("id", Value::from(3)), ("label", Value::from("ok"))]);
    let parsed = schema.parse(&input, &ValidationOptions::default()).unwrap();
    assert_eq!(
        parsed,
        Value::object([("id", Value::from(3)), ("label", Value::from("OK"))])
    );
}

// ---------------------------------------------------------------------------
// Scoped options
// ---------------------------------------------------------------------------

#[test]
fn scoped_early_exit_limits_one_branch() {
    let schema = object([
        ("first", array(integer()).scoped(OptionOverrides::early_exit())),
        ("second", array(integer())),
    ]);
    let bad = Value::Array(vec![Value::Null, Value::Null]);
    let input = Value::object([("first", bad.clone()), ("second", bad)]);
    let failure = schema.validate(&input, &ValidationOptions::default()).unwrap();
    assert_eq!(failure.field("first").unwrap().issue_count(), 1);
    assert_eq!(failure.field("second").unwrap().issue_count(), 2);
}

#[test]
fn scoped_retention_overrides_caller_strip() {
    let retaining = OptionOverrides {
        strip: Some(false),
        ..OptionOverrides::default()
    };
    let schema = object([
        ("meta", object([("v", integer())]).scoped(retaining)),
        ("body", object([("v", integer())])),
    ]);
    let inner = Value::object([("v", Value::from(1)), ("x", Value::from(2))]);
    let input = Value::object([("meta", inner.clone()), ("body", inner.clone())]);
    let parsed = schema.parse(&input, &ValidationOptions::default()).unwrap();
    assert_eq!(parsed.field("meta"), &inner);
    assert_eq!(parsed.field("body").field("x"), &Value::Absent);
}
