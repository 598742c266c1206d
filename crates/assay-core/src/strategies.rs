//! Proptest strategies for failure trees, shared by the algebra and path
//! flattening property tests.

use proptest::prelude::*;

use crate::codes;
use crate::issue::ValidationIssue;
use crate::validation::Validation;
use crate::value::Value;

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-50i64..50).prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
    ]
}

fn issue() -> impl Strategy<Value = Validation> {
    (
        prop::sample::select(vec![codes::REQUIRED, codes::WRONG_TYPE, codes::MIN_LENGTH, codes::NOT]),
        leaf_value(),
    )
        .prop_map(|(code, value)| Validation::Issue(ValidationIssue::new(code, value)))
}

/// Object keys include the characters the path grammar escapes.
fn object_key() -> impl Strategy<Value = String> {
    "[a-c.\\[\\\\]{0,3}"
}

/// Arbitrary, possibly non-canonical failure trees.
pub(crate) fn any_validation() -> impl Strategy<Value = Validation> {
    issue().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map(object_key(), prop::option::of(inner.clone()), 0..4)
                .prop_map(Validation::Object),
            prop::collection::vec(prop::option::of(inner.clone()), 0..4)
                .prop_map(Validation::Sequence),
            prop::collection::btree_set(inner.clone(), 0..4).prop_map(Validation::Set),
            prop::collection::btree_map(leaf_value(), prop::option::of(inner), 0..4)
                .prop_map(Validation::Mapping),
        ]
    })
}

/// Trees whose container kind is fixed by remaining depth, so any two trees
/// drawn with the same `depth` agree on the container kind at every path.
pub(crate) fn aligned_validation(depth: u32) -> BoxedStrategy<Validation> {
    let leaf = issue().boxed();
    if depth == 0 {
        return leaf;
    }
    let child = aligned_validation(depth - 1);
    let container = match depth % 4 {
        0 => prop::collection::btree_map("[a-c]", child, 0..3)
            .prop_map(|m| Validation::object(m))
            .boxed(),
        1 => prop::collection::vec(prop::option::of(child), 0..3)
            .prop_map(Validation::Sequence)
            .boxed(),
        2 => prop::collection::btree_set(child, 0..3)
            .prop_map(Validation::Set)
            .boxed(),
        _ => prop::collection::btree_map((0i64..3).prop_map(Value::from), child, 0..3)
            .prop_map(|m| Validation::mapping(m))
            .boxed(),
    };
    prop_oneof![1 => leaf, 3 => container].boxed()
}

/// True when at least one issue is reachable.
pub(crate) fn contains_issue(v: &Validation) -> bool {
    match v {
        Validation::Issue(_) => true,
        Validation::Object(fields) => fields.values().flatten().any(contains_issue),
        Validation::Sequence(items) => items.iter().flatten().any(contains_issue),
        Validation::Set(items) => items.iter().any(contains_issue),
        Validation::Mapping(entries) => entries.values().flatten().any(contains_issue),
    }
}
