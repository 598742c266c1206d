//! # assay-schema — The Schema Contract
//!
//! Defines what a schema is and provides the building blocks every other
//! assay crate composes.
//!
//! ## The Contract (`schema`)
//!
//! [`Schema`] requires only `validate` and `meta`. `accepts`, the async
//! variants and `parse` all derive from them, and `materialize` is the hook
//! a schema overrides when its parsed output differs from its input.
//!
//! ## Building Schemas
//!
//! - [`factory`]: a schema from plain functions, including async-only
//!   schemas that refuse synchronous validation.
//! - [`leaf`]: `string`, `number`, `integer`, `boolean`, `null`, `date`,
//!   `any`, `literal`, `literals`.
//! - [`constraint`]: `min_length`, `pattern`, `minimum` and friends, each
//!   recorded in `meta()`.
//! - [`modifier`]: `optional`, `nullable`, `scoped`.
//! - [`lazy`]: memoized indirection for recursive schemas.
//! - [`refine`]: arbitrary post-validation checks, sync or async.
//! - [`pipeline`]: `coerce`, `narrow`, `transform`.
//!
//! [`SchemaRefExt`] exposes the wrappers as chained methods.
//!
//! ## Crate Policy
//!
//! - Depends only on `assay-core` internally.
//! - Schemas are immutable once built and shared as [`SchemaRef`].
//! - Validation failures are returned as data, never raised.

pub mod constraint;
pub mod ext;
pub mod factory;
pub mod lazy;
pub mod leaf;
pub mod meta;
pub mod modifier;
pub mod pipeline;
pub mod refine;
pub mod schema;

pub use constraint::{
    after, before, max_length, maximum, min_length, minimum, multiple_of, pattern, positive,
};
pub use ext::SchemaRefExt;
pub use factory::{async_schema_fn, schema_fn, FnSchema};
pub use lazy::{lazy, LazySchema};
pub use leaf::{any, boolean, date, integer, literal, literals, null, number, string};
pub use meta::{AdditionalProperties, Constraint, Meta, MetaKind};
pub use modifier::{nullable, optional, scoped};
pub use pipeline::{coerce, narrow, transform};
pub use refine::{refine, refine_async, refine_with, RefineContext, RefineOutcome};
pub use schema::{ParseResult, Schema, SchemaExt, SchemaRef};
