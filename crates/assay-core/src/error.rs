//! # Error Types — Structured Error Hierarchy
//!
//! Validation failures are data ([`crate::ValidationResult`]), not errors.
//! The types here cover everything else: malformed flat paths, malformed
//! option documents, schemas composed incorrectly, and the typed parse
//! boundary where a failure tree has to become a Rust `Err`.

use thiserror::Error;

use crate::validation::Validation;

/// Top-level error type for the assay crates.
#[derive(Error, Debug)]
pub enum AssayError {
    /// A flat path report could not be rebuilt into a tree.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Validation options could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Schemas were composed in a way the combinator cannot honour.
    #[error("invalid schema composition: {0}")]
    Composition(String),

    /// Input was rejected at a typed parse boundary.
    #[error("validation failed:\n{0}")]
    Invalid(Validation),

    /// A parsed value did not deserialize into the requested Rust type.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Error while rebuilding a tree from its flat rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string does not follow the path grammar.
    #[error("malformed path '{path}': {reason}")]
    Syntax {
        /// The offending path.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Two issues claim incompatible shapes at the same path.
    #[error("conflicting entries at path '{path}'")]
    Conflict {
        /// The path reached by the second issue.
        path: String,
    },

    /// A container hint does not fit the rebuilt tree.
    #[error("container hint at '{path}' does not fit: {reason}")]
    Hint {
        /// Path carrying the hint.
        path: String,
        /// Why the hint was rejected.
        reason: String,
    },
}

/// Error while loading [`crate::ValidationOptions`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),
}
