//! # Schema Metadata
//!
//! [`Meta`] is the reflection surface consumed by exporters and by
//! combinators that need to look inside their operands (the discriminated
//! union reads object fields through it). It is a closed variant per schema
//! kind plus a list of named [`Constraint`]s that refinements append, so
//! `min_length(string(), 3).meta()` still reports `string` and carries
//! `minLength = 3`.
//!
//! Composite kinds hold [`SchemaRef`]s to their children. Metadata is
//! computed on demand and never cached by the schema.

use serde::Serialize;

use assay_core::Value;

use crate::schema::SchemaRef;

/// How an object treats keys it does not declare.
#[derive(Debug, Clone, Default)]
pub enum AdditionalProperties {
    /// Undeclared keys pass validation and are kept unless stripping.
    #[default]
    Permissive,
    /// Any undeclared key is an `additionalProperty` issue.
    Strict,
    /// Undeclared keys are validated and parsed by a catch-all schema.
    Schema(SchemaRef),
}

/// A named refinement recorded in metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    /// Usually the issue code the refinement reports.
    pub name: String,
    pub value: Value,
}

impl Constraint {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Kind-specific metadata.
#[derive(Debug, Clone)]
pub enum MetaKind {
    /// Built by the factory without a metadata function.
    Opaque,
    Any,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Date,
    Literal(Value),
    Literals(Vec<Value>),
    Object {
        fields: Vec<(String, SchemaRef)>,
        additional: AdditionalProperties,
    },
    Array(SchemaRef),
    Tuple(Vec<SchemaRef>),
    Set(SchemaRef),
    Record {
        key: SchemaRef,
        value: SchemaRef,
    },
    Map {
        key: SchemaRef,
        value: SchemaRef,
    },
    And(Vec<SchemaRef>),
    Or(Vec<SchemaRef>),
    Xor(Vec<SchemaRef>),
    Not(SchemaRef),
    Discriminated {
        field: String,
        variants: Vec<SchemaRef>,
    },
    Optional(SchemaRef),
    Nullable(SchemaRef),
}

impl MetaKind {
    /// Stable discriminant for external consumers.
    pub fn type_tag(&self) -> &'static str {
        match self {
            MetaKind::Opaque => "opaque",
            MetaKind::Any => "any",
            MetaKind::String => "string",
            MetaKind::Number => "number",
            MetaKind::Integer => "integer",
            MetaKind::Boolean => "boolean",
            MetaKind::Null => "null",
            MetaKind::Date => "date",
            MetaKind::Literal(_) => "literal",
            MetaKind::Literals(_) => "literals",
            MetaKind::Object { .. } => "object",
            MetaKind::Array(_) => "array",
            MetaKind::Tuple(_) => "tuple",
            MetaKind::Set(_) => "set",
            MetaKind::Record { .. } => "record",
            MetaKind::Map { .. } => "map",
            MetaKind::And(_) => "and",
            MetaKind::Or(_) => "or",
            MetaKind::Xor(_) => "xor",
            MetaKind::Not(_) => "not",
            MetaKind::Discriminated { .. } => "discriminated",
            MetaKind::Optional(_) => "optional",
            MetaKind::Nullable(_) => "nullable",
        }
    }
}

/// Structured description of a schema.
#[derive(Debug, Clone)]
pub struct Meta {
    pub kind: MetaKind,
    /// Refinements in the order they were applied, innermost first.
    pub constraints: Vec<Constraint>,
}

impl Meta {
    pub fn new(kind: MetaKind) -> Self {
        Self {
            kind,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }

    /// Value of the most recently applied constraint named `name`.
    pub fn constraint(&self, name: &str) -> Option<&Value> {
        self.constraints
            .iter()
            .rev()
            .find(|c| c.name == name)
            .map(|c| &c.value)
    }

    /// Declared schema of an object field. `None` for non-objects.
    pub fn object_field(&self, name: &str) -> Option<&SchemaRef> {
        match &self.kind {
            MetaKind::Object { fields, .. } => {
                fields.iter().find(|(n, _)| n == name).map(|(_, s)| s)
            }
            _ => None,
        }
    }

    /// Flat JSON record of this node: the type tag and its constraints.
    /// Children are not expanded, so recursive schemas are safe to describe.
    pub fn summary(&self) -> serde_json::Value {
        let constraints: serde_json::Map<String, serde_json::Value> = self
            .constraints
            .iter()
            .map(|c| {
                let value = c.value.to_json().unwrap_or(serde_json::Value::Null);
                (c.name.clone(), value)
            })
            .collect();
        serde_json::json!({
            "type": self.type_tag(),
            "constraints": constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_constraint_wins() {
        let meta = Meta::new(MetaKind::String)
            .with_constraint(Constraint::new("minLength", 2))
            .with_constraint(Constraint::new("minLength", 5));
        assert_eq!(meta.constraint("minLength"), Some(&Value::from(5)));
        assert_eq!(meta.constraint("pattern"), None);
    }

    #[test]
    fn summary_lists_tag_and_constraints() {
        let meta = Meta::new(MetaKind::Integer).with_constraint(Constraint::new("minimum", 0));
        assert_eq!(
            meta.summary(),
            serde_json::json!({"type": "integer", "constraints": {"minimum": 0}})
        );
    }
}
