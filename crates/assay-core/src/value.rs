//! # Dynamic Value Model
//!
//! Every schema validates a [`Value`]. The model is a superset of JSON: it
//! adds an explicit [`Value::Absent`] marker (a missing object field), dates,
//! sets and maps with arbitrary keys.
//!
//! ## Ordering
//!
//! `Value` is totally ordered so that it can key a `BTreeMap` (mapping
//! failures) and so that failures containing values can populate a
//! `BTreeSet` (set failures). Numbers compare with `f64::total_cmp`, which
//! makes `NaN == NaN` and `-0.0 != 0.0`. Sets and maps compare as unordered
//! collections: two sets holding the same elements in a different insertion
//! order are equal.
//!
//! ## JSON Interop
//!
//! `From<serde_json::Value>` converts parsed JSON; `Serialize` renders the
//! JSON-compatible projection (sets become arrays, maps become arrays of
//! `[key, value]` pairs, dates become RFC 3339 strings and absent object
//! fields are omitted). Integral numbers serialize as integers so that typed
//! deserialization into `i64`/`u32` fields works.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// An untrusted input value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value at all, e.g. a field missing from an object.
    #[default]
    Absent,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Integers are represented exactly up to 2^53.
    Number(f64),
    /// A UTF-8 string.
    String(String),
    /// A UTC instant.
    Date(DateTime<Utc>),
    /// An ordered sequence.
    Array(Vec<Value>),
    /// A string-keyed record.
    Object(BTreeMap<String, Value>),
    /// An insertion-ordered collection of distinct values. Build with
    /// [`Value::set`] to keep elements distinct.
    Set(Vec<Value>),
    /// Insertion-ordered entries with distinct keys of any kind. Build with
    /// [`Value::map`] to keep keys distinct.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Build a set, dropping later duplicates and keeping first-seen order.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for item in items {
            if seen.insert(item.clone()) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Build a map. A repeated key keeps its first position and takes the
    /// last value.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut index: BTreeMap<Value, usize> = BTreeMap::new();
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match index.get(&key) {
                Some(&i) => out[i].1 = value,
                None => {
                    index.insert(key.clone(), out.len());
                    out.push((key, value));
                }
            }
        }
        Value::Map(out)
    }

    /// Build an object from `(key, value)` pairs.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Stable name of this value's kind, used in `wrong_type` issue args.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field on an object. Non-objects and missing fields yield
    /// [`Value::Absent`].
    pub fn field(&self, name: &str) -> &Value {
        static ABSENT: Value = Value::Absent;
        match self {
            Value::Object(map) => map.get(name).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }

    /// Project onto `serde_json::Value` through the `Serialize` impl.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Position of each kind in the cross-kind ordering.
    fn rank(&self) -> u8 {
        match self {
            Value::Absent => 0,
            Value::Null => 1,
            Value::Bool(_) => 2,
            Value::Number(_) => 3,
            Value::String(_) => 4,
            Value::Date(_) => 5,
            Value::Array(_) => 6,
            Value::Object(_) => 7,
            Value::Set(_) => 8,
            Value::Map(_) => 9,
        }
    }
}

fn sorted_items(items: &[Value]) -> Vec<&Value> {
    let mut refs: Vec<&Value> = items.iter().collect();
    refs.sort();
    refs
}

fn sorted_entries(entries: &[(Value, Value)]) -> Vec<(&Value, &Value)> {
    let mut refs: Vec<(&Value, &Value)> = entries.iter().map(|(k, v)| (k, v)).collect();
    refs.sort();
    refs
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Object(a), Value::Object(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => sorted_items(a).cmp(&sorted_items(b)),
            (Value::Map(a), Value::Map(b)) => sorted_entries(a).cmp(&sorted_entries(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absent() {
            return f.write_str("absent");
        }
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
            Value::Array(items) | Value::Set(items) => items.serialize(serializer),
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in fields {
                    if !value.is_absent() {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
            Value::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(&(&entry.0, &entry.1))?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
