//! # assay-core — Foundational Types for the Validation Engine
//!
//! This crate is the leaf of the assay dependency graph. It defines the data
//! that every schema produces and consumes, and the algebra over that data.
//! It knows nothing about schemas themselves.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value model.** Untrusted input is a [`Value`], a closed sum
//!    type with a total order, so values can key failure maps and populate
//!    failure sets.
//!
//! 2. **Failures are data.** A [`ValidationResult`] is `None` on success or a
//!    [`Validation`] tree shaped like the validated input. Every container
//!    kind is a variant of one enum; adding a kind forces every `match` in
//!    the algebra to handle it.
//!
//! 3. **Canonical form.** [`simplify`] removes absent children, trailing
//!    sequence holes and empty containers. Every validator returns results
//!    in canonical form, which is what makes [`path::to_path`] /
//!    [`path::from_path`] a lossless round trip.
//!
//! 4. **Options are values.** [`ValidationOptions`] is `Copy` and passed by
//!    reference; nested scopes narrow it with [`OptionOverrides`] instead of
//!    mutating it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `assay-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod codes;
pub mod error;
pub mod issue;
pub mod options;
pub mod path;
pub mod validation;
pub mod value;

#[cfg(test)]
mod strategies;

// Re-export primary types for ergonomic imports.
pub use error::{AssayError, ConfigError, PathError};
pub use issue::ValidationIssue;
pub use options::{OptionOverrides, ValidationOptions};
pub use path::{from_path, to_path, ContainerHint, FlatValidation, MAX_INDEX};
pub use validation::{is_failure, is_success, merge, simplify, Validation, ValidationResult};
pub use value::Value;
