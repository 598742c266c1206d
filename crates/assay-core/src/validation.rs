//! # Validation-Result Algebra
//!
//! A [`ValidationResult`] is `None` when validation succeeded, or a
//! [`Validation`] tree whose shape mirrors the validated input:
//!
//! ```text
//! leaf failure        ──▶ Issue(ValidationIssue)
//! object / record     ──▶ Object { field ─▶ result }
//! array / tuple       ──▶ Sequence [ result | hole, ... ]
//! set                 ──▶ Set { distinct failures }
//! map                 ──▶ Mapping { original key ─▶ result }
//! ```
//!
//! ## Merge
//!
//! [`merge`] combines two independent outcomes for the same input, in
//! order:
//!
//! 1. Success on either side is the identity.
//! 2. An issue dominates a container; two issues keep the left one.
//! 3. Sequences concatenate.
//! 4. Objects and mappings take the key-wise union, merging shared keys.
//! 5. Sets take the union.
//! 6. Containers of different kinds keep the left one.
//!
//! ## Canonical Form
//!
//! [`simplify`] drops absent children, trailing sequence holes and empty
//! containers. A canonical failure always reaches at least one issue.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::issue::ValidationIssue;
use crate::path;
use crate::value::Value;

/// Outcome of a validation: `None` is success.
pub type ValidationResult = Option<Validation>;

/// A failure tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Validation {
    /// A leaf failure, or a container rejected as a whole.
    Issue(ValidationIssue),
    /// Per-field failures of a string-keyed container.
    Object(BTreeMap<String, ValidationResult>),
    /// Positional failures; `None` entries are holes for passing elements.
    Sequence(Vec<ValidationResult>),
    /// Distinct element failures of a set. Equal failures collapse.
    Set(BTreeSet<Validation>),
    /// Per-entry failures of a map, keyed by the original key.
    Mapping(BTreeMap<Value, ValidationResult>),
}

/// True when `result` is a success.
pub fn is_success(result: &ValidationResult) -> bool {
    result.is_none()
}

/// True when `result` is a failure.
pub fn is_failure(result: &ValidationResult) -> bool {
    result.is_some()
}

/// Combine two independent outcomes for the same input value.
pub fn merge(left: ValidationResult, right: ValidationResult) -> ValidationResult {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => Some(merge_failures(left, right)),
    }
}

fn merge_failures(left: Validation, right: Validation) -> Validation {
    match (left, right) {
        (left @ Validation::Issue(_), _) => left,
        (_, right @ Validation::Issue(_)) => right,
        (Validation::Sequence(mut left), Validation::Sequence(right)) => {
            left.extend(right);
            Validation::Sequence(left)
        }
        (Validation::Object(left), Validation::Object(right)) => {
            Validation::Object(merge_keyed(left, right))
        }
        (Validation::Mapping(left), Validation::Mapping(right)) => {
            Validation::Mapping(merge_keyed(left, right))
        }
        (Validation::Set(mut left), Validation::Set(right)) => {
            left.extend(right);
            Validation::Set(left)
        }
        (left, _) => left,
    }
}

fn merge_keyed<K: Ord>(
    mut left: BTreeMap<K, ValidationResult>,
    right: BTreeMap<K, ValidationResult>,
) -> BTreeMap<K, ValidationResult> {
    for (key, right) in right {
        let merged = match left.remove(&key) {
            Some(left) => merge(left, right),
            None => right,
        };
        left.insert(key, merged);
    }
    left
}

/// Reduce `result` to canonical form.
pub fn simplify(result: ValidationResult) -> ValidationResult {
    result.and_then(Validation::simplified)
}

impl Validation {
    /// Build an object failure from field failures.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Validation)>) -> Self {
        Validation::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v)))
                .collect(),
        )
    }

    /// Build a sequence failure; `None` marks a passing position.
    pub fn sequence(items: impl IntoIterator<Item = ValidationResult>) -> Self {
        Validation::Sequence(items.into_iter().collect())
    }

    /// Build a set failure.
    pub fn set(items: impl IntoIterator<Item = Validation>) -> Self {
        Validation::Set(items.into_iter().collect())
    }

    /// Build a mapping failure keyed by original keys.
    pub fn mapping(entries: impl IntoIterator<Item = (Value, Validation)>) -> Self {
        Validation::Mapping(entries.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }

    /// The issue itself when this failure is a single leaf.
    pub fn as_issue(&self) -> Option<&ValidationIssue> {
        match self {
            Validation::Issue(issue) => Some(issue),
            _ => None,
        }
    }

    /// Failure recorded for an object field, if any.
    pub fn field(&self, name: &str) -> Option<&Validation> {
        match self {
            Validation::Object(fields) => fields.get(name).and_then(Option::as_ref),
            _ => None,
        }
    }

    /// Failure recorded at a sequence position, if any.
    pub fn index(&self, position: usize) -> Option<&Validation> {
        match self {
            Validation::Sequence(items) => items.get(position).and_then(Option::as_ref),
            _ => None,
        }
    }

    /// Failure recorded for a mapping key, if any.
    pub fn entry(&self, key: &Value) -> Option<&Validation> {
        match self {
            Validation::Mapping(entries) => entries.get(key).and_then(Option::as_ref),
            _ => None,
        }
    }

    /// Reduce to canonical form, `None` when no issue is reachable.
    pub fn simplified(self) -> ValidationResult {
        match self {
            Validation::Issue(_) => Some(self),
            Validation::Object(fields) => {
                let kept: BTreeMap<String, ValidationResult> = fields
                    .into_iter()
                    .filter_map(|(k, v)| simplify(v).map(|v| (k, Some(v))))
                    .collect();
                (!kept.is_empty()).then_some(Validation::Object(kept))
            }
            Validation::Sequence(items) => {
                let mut kept: Vec<ValidationResult> = items.into_iter().map(simplify).collect();
                while matches!(kept.last(), Some(None)) {
                    kept.pop();
                }
                (!kept.is_empty()).then_some(Validation::Sequence(kept))
            }
            Validation::Set(items) => {
                let kept: BTreeSet<Validation> =
                    items.into_iter().filter_map(Validation::simplified).collect();
                (!kept.is_empty()).then_some(Validation::Set(kept))
            }
            Validation::Mapping(entries) => {
                let kept: BTreeMap<Value, ValidationResult> = entries
                    .into_iter()
                    .filter_map(|(k, v)| simplify(v).map(|v| (k, Some(v))))
                    .collect();
                (!kept.is_empty()).then_some(Validation::Mapping(kept))
            }
        }
    }

    /// Number of reachable issues.
    pub fn issue_count(&self) -> usize {
        path::flatten(self).issues.len()
    }

    /// One-line rendering: `path: message` pairs joined by `; `.
    pub fn summary(&self) -> String {
        path::flatten(self)
            .issues
            .iter()
            .map(|(p, issue)| format!("{}: {}", display_path(p), issue.render()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn display_path(p: &str) -> &str {
    if p.is_empty() {
        "(root)"
    } else {
        p
    }
}

impl From<ValidationIssue> for Validation {
    fn from(issue: ValidationIssue) -> Self {
        Validation::Issue(issue)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flat = path::flatten(self);
        for (i, (p, issue)) in flat.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: [{}] {}", display_path(p), issue.code, issue.render())?;
        }
        Ok(())
    }
}

impl std::error::Error for Validation {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    fn issue(code: &str) -> Validation {
        Validation::Issue(ValidationIssue::new(code, Value::Null))
    }

    #[test]
    fn success_is_merge_identity() {
        let r = Some(issue(codes::REQUIRED));
        assert_eq!(merge(None, r.clone()), r);
        assert_eq!(merge(r.clone(), None), r);
        assert_eq!(merge(None, None), None);
    }

    #[test]
    fn issue_dominates_container() {
        let container = Validation::object([("a", issue(codes::REQUIRED))]);
        let leaf = issue(codes::NOT);
        assert_eq!(merge(Some(container.clone()), Some(leaf.clone())), Some(leaf.clone()));
        assert_eq!(merge(Some(leaf.clone()), Some(container)), Some(leaf));
    }

    #[test]
    fn two_issues_keep_left() {
        let merged = merge(Some(issue("left")), Some(issue("right")));
        assert_eq!(merged.unwrap().as_issue().unwrap().code, "left");
    }

    #[test]
    fn objects_merge_key_wise() {
        let left = Validation::object([
            ("a", issue("a")),
            ("shared", Validation::object([("x", issue("x"))])),
        ]);
        let right = Validation::object([
            ("b", issue("b")),
            ("shared", Validation::object([("y", issue("y"))])),
        ]);
        let merged = merge(Some(left), Some(right)).unwrap();
        assert!(merged.field("a").is_some());
        assert!(merged.field("b").is_some());
        let shared = merged.field("shared").unwrap();
        assert!(shared.field("x").is_some());
        assert!(shared.field("y").is_some());
    }

    #[test]
    fn sequences_concatenate() {
        let left = Validation::sequence([Some(issue("a"))]);
        let right = Validation::sequence([None, Some(issue("b"))]);
        let merged = merge(Some(left), Some(right)).unwrap();
        assert_eq!(
            merged,
            Validation::sequence([Some(issue("a")), None, Some(issue("b"))])
        );
    }

    #[test]
    fn sets_union() {
        let left = Validation::set([issue("a"), issue("b")]);
        let right = Validation::set([issue("b"), issue("c")]);
        match merge(Some(left), Some(right)).unwrap() {
            Validation::Set(items) => assert_eq!(items.len(), 3),
            other => panic!("expected set, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_containers_keep_left() {
        let left = Validation::object([("a", issue("a"))]);
        let right = Validation::sequence([Some(issue("b"))]);
        assert_eq!(merge(Some(left.clone()), Some(right)), Some(left));
    }

    #[test]
    fn simplify_collapses_successful_tree() {
        let tree = Validation::Object(BTreeMap::from([
            ("a".to_string(), None),
            ("b".to_string(), Some(Validation::Sequence(vec![None, None]))),
            ("c".to_string(), Some(Validation::Set(BTreeSet::new()))),
        ]));
        assert_eq!(simplify(Some(tree)), None);
    }

    #[test]
    fn simplify_keeps_reachable_issues_and_trims_holes() {
        let tree = Validation::Object(BTreeMap::from([
            ("ok".to_string(), None),
            (
                "items".to_string(),
                Some(Validation::Sequence(vec![None, Some(issue("x")), None])),
            ),
        ]));
        let simplified = simplify(Some(tree)).unwrap();
        assert_eq!(
            simplified,
            Validation::object([("items", Validation::sequence([None, Some(issue("x"))]))])
        );
    }

    #[test]
    fn display_lists_every_issue_with_path() {
        let tree = Validation::object([
            ("id", issue(codes::REQUIRED)),
            ("tags", Validation::sequence([None, Some(issue(codes::REQUIRED))])),
        ]);
        let rendered = tree.to_string();
        assert!(rendered.contains(".id: [required] value is required"));
        assert!(rendered.contains(".tags[1]: [required]"));
        assert_eq!(tree.issue_count(), 2);
    }

    #[test]
    fn root_issue_displays_as_root() {
        assert!(issue(codes::REQUIRED).to_string().contains("(root)"));
    }
}
