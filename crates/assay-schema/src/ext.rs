//! Fluent composition on [`SchemaRef`].
//!
//! Every method consumes the handle and returns a new one wrapping it, so
//! chains read in application order:
//!
//! ```ignore
//! let slug = string().min_length(3).pattern(Regex::new("^[a-z-]+$")?).optional();
//! ```

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use regex::Regex;

use assay_core::{OptionOverrides, Value};

use crate::constraint;
use crate::modifier;
use crate::pipeline;
use crate::refine::{self, RefineContext, RefineOutcome};
use crate::schema::SchemaRef;

pub trait SchemaRefExt {
    fn optional(self) -> SchemaRef;
    fn nullable(self) -> SchemaRef;
    fn scoped(self, overrides: OptionOverrides) -> SchemaRef;

    fn refine<F>(self, check: F) -> SchemaRef
    where
        F: Fn(&Value, &mut RefineContext) -> RefineOutcome + Send + Sync + 'static;

    fn refine_async<F>(self, check: F) -> SchemaRef
    where
        F: for<'a> Fn(&'a Value, &'a mut RefineContext) -> BoxFuture<'a, RefineOutcome>
            + Send
            + Sync
            + 'static;

    fn coerce<F>(self, rewrite: F) -> SchemaRef
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static;

    fn narrow<F>(self, rewrite: F) -> SchemaRef
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static;

    fn transform<F>(self, project: F) -> SchemaRef
    where
        F: Fn(Value) -> Value + Send + Sync + 'static;

    fn min_length(self, min: usize) -> SchemaRef;
    fn max_length(self, max: usize) -> SchemaRef;
    fn pattern(self, regex: Regex) -> SchemaRef;
    fn positive(self) -> SchemaRef;
    fn minimum(self, bound: f64) -> SchemaRef;
    fn maximum(self, bound: f64) -> SchemaRef;
    fn multiple_of(self, divisor: f64) -> SchemaRef;
    fn before(self, bound: DateTime<Utc>) -> SchemaRef;
    fn after(self, bound: DateTime<Utc>) -> SchemaRef;
}

impl SchemaRefExt for SchemaRef {
    fn optional(self) -> SchemaRef {
        modifier::optional(self)
    }

    fn nullable(self) -> SchemaRef {
        modifier::nullable(self)
    }

    fn scoped(self, overrides: OptionOverrides) -> SchemaRef {
        modifier::scoped(self, overrides)
    }

    fn refine<F>(self, check: F) -> SchemaRef
    where
        F: Fn(&Value, &mut RefineContext) -> RefineOutcome + Send + Sync + 'static,
    {
        refine::refine(self, check)
    }

    fn refine_async<F>(self, check: F) -> SchemaRef
    where
        F: for<'a> Fn(&'a Value, &'a mut RefineContext) -> BoxFuture<'a, RefineOutcome>
            + Send
            + Sync
            + 'static,
    {
        refine::refine_async(self, check)
    }

    fn coerce<F>(self, rewrite: F) -> SchemaRef
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        pipeline::coerce(self, rewrite)
    }

    fn narrow<F>(self, rewrite: F) -> SchemaRef
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        pipeline::narrow(self, rewrite)
    }

    fn transform<F>(self, project: F) -> SchemaRef
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        pipeline::transform(self, project)
    }

    fn min_length(self, min: usize) -> SchemaRef {
        constraint::min_length(self, min)
    }

    fn max_length(self, max: usize) -> SchemaRef {
        constraint::max_length(self, max)
    }

    fn pattern(self, regex: Regex) -> SchemaRef {
        constraint::pattern(self, regex)
    }

    fn positive(self) -> SchemaRef {
        constraint::positive(self)
    }

    fn minimum(self, bound: f64) -> SchemaRef {
        constraint::minimum(self, bound)
    }

    fn maximum(self, bound: f64) -> SchemaRef {
        constraint::maximum(self, bound)
    }

    fn multiple_of(self, divisor: f64) -> SchemaRef {
        constraint::multiple_of(self, divisor)
    }

    fn before(self, bound: DateTime<Utc>) -> SchemaRef {
        constraint::before(self, bound)
    }

    fn after(self, bound: DateTime<Utc>) -> SchemaRef {
        constraint::after(self, bound)
    }
}
