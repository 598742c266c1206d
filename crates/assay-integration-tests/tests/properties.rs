//! Property tests over real validator output.
//!
//! The algebra's own properties are covered next to it in `assay-core`;
//! these check the properties that only hold because the validators
//! cooperate: early exit reports a prefix, results are canonical, and
//! every result survives the flat path round trip.

use assay_container::{array, map, object, record, set, tuple};
use assay_core::{from_path, simplify, to_path, Validation, ValidationOptions, Value};
use assay_logic::{and, or};
use assay_schema::{integer, number, string, Schema, SchemaRef};
use proptest::prelude::*;

/// Containers whose failures flatten in iteration order. Field names sort
/// in declaration order.
fn ordered_fields() -> Vec<(&'static str, SchemaRef)> {
    vec![
        ("a_id", integer()),
        ("b_tags", array(string())),
        ("c_pair", tuple(vec![string(), number()])),
        ("e_scores", record(string(), number())),
        ("g_either", or(vec![string(), number()])),
        (
            "h_both",
            and(vec![object([("x", number())]), object([("y", number())])]),
        ),
    ]
}

fn ordered_catalogue() -> SchemaRef {
    object(ordered_fields())
}

/// Every container kind, including the unordered ones.
fn catalogue() -> SchemaRef {
    let mut fields = ordered_fields();
    fields.push(("d_flags", set(integer())));
    fields.push(("f_index", map(integer(), string())));
    object(fields)
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Absent),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-20i64..20).prop_map(Value::from),
        (-20i64..20).prop_map(|n| Value::from(n as f64 + 0.5)),
        "[a-c]{0,2}".prop_map(Value::from),
    ]
}

fn small_array() -> impl Strategy<Value = Value> {
    prop::collection::vec(scalar(), 0..5).prop_map(Value::Array)
}

fn small_object() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-c]", scalar()), 0..4).prop_map(|fields| Value::object(fields))
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        scalar(),
        small_array(),
        small_object(),
        prop::collection::vec(scalar(), 0..4).prop_map(|items| Value::set(items)),
        prop::collection::vec((scalar(), scalar()), 0..4).prop_map(|entries| Value::map(entries)),
    ]
}

fn catalogue_input() -> impl Strategy<Value = Value> {
    let names = [
        "a_id", "b_tags", "c_pair", "d_flags", "e_scores", "f_index", "g_either", "h_both",
    ];
    prop::collection::vec(field_value(), names.len()).prop_map(move |values| {
        Value::object(names.iter().copied().zip(values))
    })
}

proptest! {
    /// With early exit the reported issues are a prefix of the full report.
    #[test]
    fn early_exit_reports_a_prefix(input in catalogue_input()) {
        let schema = ordered_catalogue();
        let full = to_path(&schema.validate(&input, &ValidationOptions::default()));
        let early = to_path(
            &schema.validate(&input, &ValidationOptions::default().with_early_exit(true)),
        );
        prop_assert!(early.issues.len() <= full.issues.len());
        prop_assert_eq!(&full.issues[..early.issues.len()], &early.issues[..]);
        prop_assert_eq!(early.is_empty(), full.is_empty());
    }

    /// Early exit on a set keeps one failure, which the full report has too.
    #[test]
    fn early_exit_on_sets_keeps_one_known_failure(
        items in prop::collection::vec(scalar(), 0..6),
    ) {
        let schema = set(integer());
        let value = Value::set(items);
        let full = schema.validate(&value, &ValidationOptions::default());
        let early = schema.validate(&value, &ValidationOptions::default().with_early_exit(true));
        match (full, early) {
            (None, None) => {}
            (Some(Validation::Set(all)), Some(Validation::Set(first))) => {
                prop_assert_eq!(first.len(), 1);
                prop_assert!(first.is_subset(&all));
            }
            (full, early) => prop_assert!(false, "mismatch: {:?} vs {:?}", full, early),
        }
    }

    /// Early exit on a map reports the first failing entry in insertion order.
    #[test]
    fn early_exit_on_maps_stops_at_first_failing_entry(
        entries in prop::collection::vec((scalar(), scalar()), 0..6),
    ) {
        let schema = map(integer(), string());
        let value = Value::map(entries);
        let full = schema.validate(&value, &ValidationOptions::default());
        let early = schema.validate(&value, &ValidationOptions::default().with_early_exit(true));
        let Value::Map(pairs) = &value else { unreachable!() };
        let first_failing = pairs
            .iter()
            .map(|(key, _)| key)
            .find(|key| full.as_ref().and_then(|f| f.entry(key)).is_some());
        match (first_failing, early) {
            (None, None) => {}
            (Some(key), Some(early)) => {
                prop_assert_eq!(early.entry(key), full.as_ref().and_then(|f| f.entry(key)));
                match early {
                    Validation::Mapping(reported) => prop_assert_eq!(reported.len(), 1),
                    other => prop_assert!(false, "expected mapping, got {:?}", other),
                }
            }
            (key, early) => prop_assert!(false, "mismatch: {:?} vs {:?}", key, early),
        }
    }

    /// Validators return canonical results.
    #[test]
    fn results_are_canonical(input in catalogue_input()) {
        let result = catalogue().validate(&input, &ValidationOptions::default());
        prop_assert_eq!(simplify(result.clone()), result);
    }

    /// Every validator result survives the flat path round trip.
    #[test]
    fn flat_paths_round_trip(input in catalogue_input()) {
        let result = catalogue().validate(&input, &ValidationOptions::default());
        let rebuilt = from_path(&to_path(&result));
        prop_assert_eq!(rebuilt, Ok(result));
    }

    /// Sync and async validation agree.
    #[test]
    fn async_agrees_with_sync(input in catalogue_input()) {
        let schema = catalogue();
        let options = ValidationOptions::default();
        let sync = schema.validate(&input, &options);
        let asynchronous = futures::executor::block_on(schema.validate_async(&input, &options));
        prop_assert_eq!(sync, asynchronous);
    }
}
