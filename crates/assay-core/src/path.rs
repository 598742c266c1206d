//! # Path Flattening
//!
//! Renders a failure tree as a flat list of `(path, issue)` pairs and
//! rebuilds the tree from that list.
//!
//! ## Path Grammar
//!
//! ```text
//! path    := segment*
//! segment := "." key        object field; `\`, `.` and `[` escaped by `\`
//!          | "[" digits "]" positional child
//! ```
//!
//! The root is the empty string. Sets and mappings both flatten to
//! positional segments, which would make them indistinguishable from
//! sequences, so each one leaves a [`ContainerHint`] at its own path. A
//! mapping hint lists the original keys; `[n]` under a mapping addresses the
//! n-th listed key.
//!
//! `from_path(to_path(r)) == r` holds for every canonical result (see
//! [`crate::simplify`]) whose positions stay within [`MAX_INDEX`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::PathError;
use crate::issue::ValidationIssue;
use crate::validation::{Validation, ValidationResult};
use crate::value::Value;

/// Marks a positional container that is not a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "keys", rename_all = "camelCase")]
pub enum ContainerHint {
    /// Children are set elements.
    Set,
    /// Children are map entries; `[n]` addresses the n-th key.
    Mapping(Vec<Value>),
}

/// Flat rendering of a failure tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatValidation {
    /// Every reachable issue with its path, in tree order.
    pub issues: Vec<(String, ValidationIssue)>,
    /// Every set or mapping container with its path.
    pub hints: Vec<(String, ContainerHint)>,
}

impl FlatValidation {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Flatten a result. Success flattens to an empty list.
pub fn to_path(result: &ValidationResult) -> FlatValidation {
    match result {
        Some(validation) => flatten(validation),
        None => FlatValidation::default(),
    }
}

pub(crate) fn flatten(validation: &Validation) -> FlatValidation {
    let mut flat = FlatValidation::default();
    walk(validation, "", &mut flat);
    flat
}

fn walk(validation: &Validation, path: &str, out: &mut FlatValidation) {
    match validation {
        Validation::Issue(issue) => out.issues.push((path.to_string(), issue.clone())),
        Validation::Object(fields) => {
            for (key, child) in fields {
                if let Some(child) = child {
                    walk(child, &format!("{path}.{}", escape_key(key)), out);
                }
            }
        }
        Validation::Sequence(items) => {
            for (i, child) in items.iter().enumerate() {
                if let Some(child) = child {
                    walk(child, &format!("{path}[{i}]"), out);
                }
            }
        }
        Validation::Set(items) => {
            out.hints.push((path.to_string(), ContainerHint::Set));
            for (i, child) in items.iter().enumerate() {
                walk(child, &format!("{path}[{i}]"), out);
            }
        }
        Validation::Mapping(entries) => {
            let present: Vec<(&Value, &Validation)> = entries
                .iter()
                .filter_map(|(k, v)| v.as_ref().map(|v| (k, v)))
                .collect();
            let keys = present.iter().map(|(k, _)| (*k).clone()).collect();
            out.hints.push((path.to_string(), ContainerHint::Mapping(keys)));
            for (i, (_, child)) in present.iter().enumerate() {
                walk(child, &format!("{path}[{i}]"), out);
            }
        }
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if matches!(c, '\\' | '.' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Largest positional segment [`from_path`] accepts. Rebuilding a sequence
/// allocates a hole for every position before its last failure.
pub const MAX_INDEX: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    let syntax = |reason: &str| PathError::Syntax {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    let mut segments = Vec::new();
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '.' => {
                let mut key = String::new();
                while let Some(&next) = chars.peek() {
                    match next {
                        '.' | '[' => break,
                        '\\' => {
                            chars.next();
                            let escaped = chars.next().ok_or_else(|| syntax("dangling escape"))?;
                            key.push(escaped);
                        }
                        _ => {
                            key.push(next);
                            chars.next();
                        }
                    }
                }
                segments.push(Segment::Key(key));
            }
            '[' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        Some(_) => return Err(syntax("index must be decimal digits")),
                        None => return Err(syntax("unterminated index")),
                    }
                }
                let index = digits.parse::<usize>().map_err(|_| syntax("empty or oversized index"))?;
                if index > MAX_INDEX {
                    return Err(syntax("index exceeds MAX_INDEX"));
                }
                segments.push(Segment::Index(index));
            }
            _ => return Err(syntax("segment must start with '.' or '['")),
        }
    }
    Ok(segments)
}

/// Intermediate tree built while unflattening.
enum Node {
    Leaf(ValidationIssue),
    Keyed(BTreeMap<String, Node>),
    Indexed(BTreeMap<usize, Node>),
}

fn place(
    slot: Option<Node>,
    segments: &[Segment],
    issue: ValidationIssue,
    full: &str,
) -> Result<Node, PathError> {
    let conflict = || PathError::Conflict { path: full.to_string() };
    match segments.split_first() {
        None => match slot {
            None => Ok(Node::Leaf(issue)),
            Some(_) => Err(conflict()),
        },
        Some((Segment::Key(key), rest)) => {
            let mut children = match slot {
                None => BTreeMap::new(),
                Some(Node::Keyed(children)) => children,
                Some(_) => return Err(conflict()),
            };
            let child = place(children.remove(key), rest, issue, full)?;
            children.insert(key.clone(), child);
            Ok(Node::Keyed(children))
        }
        Some((Segment::Index(index), rest)) => {
            let mut children = match slot {
                None => BTreeMap::new(),
                Some(Node::Indexed(children)) => children,
                Some(_) => return Err(conflict()),
            };
            let child = place(children.remove(index), rest, issue, full)?;
            children.insert(*index, child);
            Ok(Node::Indexed(children))
        }
    }
}

fn build(
    node: Node,
    path: &str,
    hints: &BTreeMap<&str, &ContainerHint>,
) -> Result<Validation, PathError> {
    match node {
        Node::Leaf(issue) => Ok(Validation::Issue(issue)),
        Node::Keyed(children) => {
            if hints.contains_key(path) {
                return Err(PathError::Hint {
                    path: path.to_string(),
                    reason: "object fields cannot carry a set or mapping hint".to_string(),
                });
            }
            let mut fields = BTreeMap::new();
            for (key, child) in children {
                let child_path = format!("{path}.{}", escape_key(&key));
                fields.insert(key, Some(build(child, &child_path, hints)?));
            }
            Ok(Validation::Object(fields))
        }
        Node::Indexed(children) => {
            let mut built = Vec::with_capacity(children.len());
            for (index, child) in children {
                let child_path = format!("{path}[{index}]");
                built.push((index, build(child, &child_path, hints)?));
            }
            match hints.get(path) {
                Some(ContainerHint::Set) => {
                    Ok(Validation::Set(built.into_iter().map(|(_, v)| v).collect()))
                }
                Some(ContainerHint::Mapping(keys)) => {
                    let distinct: BTreeSet<&Value> = keys.iter().collect();
                    if distinct.len() != keys.len() {
                        return Err(PathError::Hint {
                            path: path.to_string(),
                            reason: "mapping keys are not distinct".to_string(),
                        });
                    }
                    let mut entries = BTreeMap::new();
                    for (index, child) in built {
                        let key = keys.get(index).ok_or_else(|| PathError::Hint {
                            path: path.to_string(),
                            reason: format!("no mapping key for index {index}"),
                        })?;
                        entries.insert(key.clone(), Some(child));
                    }
                    Ok(Validation::Mapping(entries))
                }
                None => {
                    let len = built.last().map_or(0, |(index, _)| index + 1);
                    let mut items: Vec<ValidationResult> = vec![None; len];
                    for (index, child) in built {
                        items[index] = Some(child);
                    }
                    Ok(Validation::Sequence(items))
                }
            }
        }
    }
}

/// Rebuild a result from its flat rendering.
///
/// # Errors
///
/// Returns [`PathError`] for malformed paths, for an issue and a container
/// claiming the same path, and for hints that do not fit the tree.
pub fn from_path(flat: &FlatValidation) -> Result<ValidationResult, PathError> {
    let hints: BTreeMap<&str, &ContainerHint> =
        flat.hints.iter().map(|(p, h)| (p.as_str(), h)).collect();
    let mut root: Option<Node> = None;
    for (path, issue) in &flat.issues {
        let segments = parse_path(path)?;
        root = Some(place(root.take(), &segments, issue.clone(), path)?);
    }
    root.map(|node| build(node, "", &hints)).transpose()
}
