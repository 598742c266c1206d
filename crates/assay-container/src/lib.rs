//! # assay-container — Composite Container Validators
//!
//! Schemas for structured values: [`object`], [`array`], [`tuple`],
//! [`set`], [`record`], [`map`] and [`discriminated`] unions.
//!
//! ## Shared Behaviour
//!
//! - **Pre-check.** A value of the wrong kind is rejected with one
//!   `required` or `wrong_type` issue and no child is visited.
//! - **Order.** Children are visited strictly in order (declaration order
//!   for objects, index order for arrays and tuples, iteration order for
//!   sets, records and maps), in the async path too.
//! - **Early exit.** With `early_exit` set, aggregation stops at the first
//!   failing child, so the reported failures are always a prefix of the
//!   full report.
//! - **Parse.** `materialize` rebuilds a fresh container from the
//!   children's parsed values. It assumes the input already validated.
//!
//! ## Crate Policy
//!
//! - Depends on `assay-core` and `assay-schema` internally.
//! - Results are returned in canonical form.

pub mod array;
pub mod discriminated;
pub mod map;
pub mod object;
pub mod record;
pub mod set;
pub mod tuple;

mod support;

pub use array::{array, ArraySchema};
pub use discriminated::{discriminated, DiscriminatedSchema};
pub use map::{map, MapSchema};
pub use object::{object, strict_object, ObjectSchema};
pub use record::{record, RecordSchema};
pub use set::{set, SetSchema};
pub use tuple::{tuple, TupleSchema};
