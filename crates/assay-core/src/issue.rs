//! # Validation Issues
//!
//! A [`ValidationIssue`] is a leaf of a failure tree: one stable code, the
//! offending value, positional arguments and an optional message override.
//! Wrapping issues (`invalid_key`) carry the wrapped failure in `cause`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::codes;
use crate::path;
use crate::validation::Validation;
use crate::value::Value;

/// A single leaf failure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ValidationIssue {
    /// Stable machine-readable discriminant, see [`crate::codes`].
    pub code: String,
    /// Overrides the default rendering when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The offending value.
    pub value: Value,
    /// Code-specific arguments (expected kinds, bounds, ...).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    /// Wrapped failure, e.g. the key schema's failure for `invalid_key`.
    /// Serialized in its own flat form.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_cause")]
    pub cause: Option<Box<Validation>>,
}

fn serialize_cause<S: Serializer>(
    cause: &Option<Box<Validation>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match cause {
        Some(cause) => path::flatten(cause).serialize(serializer),
        None => serializer.serialize_none(),
    }
}

impl ValidationIssue {
    /// An issue with `code` about `value`, no message override and no args.
    pub fn new(code: impl Into<String>, value: Value) -> Self {
        Self {
            code: code.into(),
            message: None,
            value,
            args: Vec::new(),
            cause: None,
        }
    }

    /// `required` for an absent value.
    pub fn required() -> Self {
        Self::new(codes::REQUIRED, Value::Absent)
    }

    /// `wrong_type` with the expected kind as its single argument.
    pub fn wrong_type(value: &Value, expected: &str) -> Self {
        Self::new(codes::WRONG_TYPE, value.clone()).with_args([Value::from(expected)])
    }

    /// Override the default rendering.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replace the positional arguments.
    pub fn with_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Attach the failure this issue wraps.
    pub fn with_cause(mut self, cause: Validation) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The message to show a human: the override if set, otherwise a
    /// rendering derived from the code and arguments.
    pub fn render(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let first = self.args.first().map(ToString::to_string).unwrap_or_default();
        match self.code.as_str() {
            codes::REQUIRED => "value is required".to_string(),
            codes::WRONG_TYPE => format!("expected {}, got {}", join_args(&self.args), self.value.kind()),
            codes::POSITIVE => format!("{} is not positive", self.value),
            codes::INTEGER => format!("{} is not an integer", self.value),
            codes::MINIMUM => format!("{} is less than {first}", self.value),
            codes::MAXIMUM => format!("{} is greater than {first}", self.value),
            codes::MULTIPLE_OF => format!("{} is not a multiple of {first}", self.value),
            codes::MIN_LENGTH => format!("length must be at least {first}"),
            codes::MAX_LENGTH => format!("length must be at most {first}"),
            codes::PATTERN => format!("{} does not match pattern {first}", self.value),
            codes::BEFORE => format!("{} is not before {first}", self.value),
            codes::AFTER => format!("{} is not after {first}", self.value),
            codes::LITERAL => format!("expected one of {}", join_args(&self.args)),
            codes::ADDITIONAL_PROPERTY => "additional property is not allowed".to_string(),
            codes::INVALID_KEY => match &self.cause {
                Some(cause) => format!("invalid key {}: {}", self.value, cause.summary()),
                None => format!("invalid key {}", self.value),
            },
            codes::UNKNOWN_DISCRIMINANT => {
                format!("unknown discriminant {} for field {first}", self.value)
            }
            codes::XOR => format!("value matches {first} exclusive alternatives"),
            codes::NOT => "value matches a forbidden schema".to_string(),
            codes::LENGTH => {
                let actual = self.args.get(1).map(ToString::to_string).unwrap_or_default();
                format!("expected {first} elements, got {actual}")
            }
            codes::ASYNC_VALIDATION_REQUIRED => {
                "schema can only be validated asynchronously".to_string()
            }
            other => format!("{other}: {}", self.value),
        }
    }
}

fn join_args(args: &[Value]) -> String {
    args.iter()
        .map(|a| a.as_str().map_or_else(|| a.to_string(), str::to_string))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.render())
    }
}
