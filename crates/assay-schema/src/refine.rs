//! # Refinement
//!
//! A refinement is a check that runs only after its base schema accepted
//! the value, so it can never hide a structural failure. The callback gets
//! the validated value and a [`RefineContext`] and may:
//!
//! - return a partial result shaped like the value (an issue on one field,
//!   siblings absent),
//! - record extra failures through [`RefineContext::add`],
//! - return `Err(issue)` to short-circuit with a single issue.
//!
//! Panics inside the callback are faults and propagate to the caller.
//!
//! The final result is `simplify(merge(returned, added))`. Metadata is the
//! base schema's, extended with any [`Constraint`]s given at construction.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use assay_core::{
    codes, merge, simplify, Validation, ValidationIssue, ValidationOptions, ValidationResult, Value,
};

use crate::meta::{Constraint, Meta};
use crate::schema::{ParseResult, Schema, SchemaExt, SchemaRef};

/// Outcome of a refinement callback.
pub type RefineOutcome = Result<ValidationResult, ValidationIssue>;

type SyncRefinement = dyn Fn(&Value, &mut RefineContext) -> RefineOutcome + Send + Sync;
type AsyncRefinement = dyn for<'a> Fn(&'a Value, &'a mut RefineContext) -> BoxFuture<'a, RefineOutcome>
    + Send
    + Sync;

/// What a refinement callback can see and do.
#[derive(Debug, Clone)]
pub struct RefineContext {
    value: Value,
    options: ValidationOptions,
    added: ValidationResult,
}

impl RefineContext {
    fn new(value: &Value, options: &ValidationOptions) -> Self {
        Self {
            value: value.clone(),
            options: *options,
            added: None,
        }
    }

    /// The options of the running validation.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// `invalid_value` carrying `message` unless `condition` holds.
    pub fn valid_if(
        &self,
        condition: bool,
        message: impl Into<String>,
        args: &[Value],
    ) -> ValidationResult {
        if condition {
            None
        } else {
            Some(Validation::Issue(
                ValidationIssue::new(codes::INVALID_VALUE, self.value.clone())
                    .with_message(message)
                    .with_args(args.iter().cloned()),
            ))
        }
    }

    /// An issue with a specific code unless `condition` holds. The message
    /// is left to the code's default rendering.
    pub fn check(
        &self,
        condition: bool,
        code: &str,
        args: &[Value],
    ) -> ValidationResult {
        if condition {
            None
        } else {
            Some(Validation::Issue(self.issue(code).with_args(args.iter().cloned())))
        }
    }

    /// An issue about the refined value, for `Err(..)` short-circuits.
    pub fn issue(&self, code: &str) -> ValidationIssue {
        ValidationIssue::new(code, self.value.clone())
    }

    /// Merge `partial` into the eventual result.
    pub fn add(&mut self, partial: ValidationResult) {
        let prior = self.added.take();
        self.added = merge(prior, partial);
    }

    fn finish(self, outcome: RefineOutcome) -> ValidationResult {
        let returned = outcome.unwrap_or_else(|issue| Some(Validation::Issue(issue)));
        let result = simplify(merge(returned, self.added));
        if let Some(failure) = &result {
            tracing::trace!(issues = failure.issue_count(), "refinement rejected value");
        }
        result
    }
}

#[derive(Clone)]
enum Check {
    Sync(Arc<SyncRefinement>),
    Async(Arc<AsyncRefinement>),
}

/// A base schema plus a post-validation check.
#[derive(Clone)]
pub struct RefineSchema {
    base: SchemaRef,
    check: Check,
    constraints: Vec<Constraint>,
}

impl fmt::Debug for RefineSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefineSchema")
            .field("base", &self.base)
            .field("async", &matches!(self.check, Check::Async(_)))
            .field("constraints", &self.constraints)
            .finish()
    }
}

#[async_trait]
impl Schema for RefineSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let base = self.base.validate(value, options);
        if base.is_some() {
            return base;
        }
        match &self.check {
            Check::Sync(check) => {
                let mut ctx = RefineContext::new(value, options);
                let outcome = check(value, &mut ctx);
                ctx.finish(outcome)
            }
            Check::Async(_) => Some(Validation::Issue(ValidationIssue::new(
                codes::ASYNC_VALIDATION_REQUIRED,
                value.clone(),
            ))),
        }
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let base = self.base.validate_async(value, options).await;
        if base.is_some() {
            return base;
        }
        let mut ctx = RefineContext::new(value, options);
        let outcome = match &self.check {
            Check::Sync(check) => check(value, &mut ctx),
            Check::Async(check) => check(value, &mut ctx).await,
        };
        ctx.finish(outcome)
    }

    fn meta(&self) -> Meta {
        let mut meta = self.base.meta();
        meta.constraints.extend(self.constraints.iter().cloned());
        meta
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.base.materialize(value, options)
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        self.base.materialize_async(value, options).await
    }
}

/// Refine `base` with a synchronous check.
pub fn refine<F>(base: SchemaRef, check: F) -> SchemaRef
where
    F: Fn(&Value, &mut RefineContext) -> RefineOutcome + Send + Sync + 'static,
{
    refine_with(base, Vec::new(), check)
}

/// Refine `base` and record `constraints` in its metadata.
pub fn refine_with<F>(base: SchemaRef, constraints: Vec<Constraint>, check: F) -> SchemaRef
where
    F: Fn(&Value, &mut RefineContext) -> RefineOutcome + Send + Sync + 'static,
{
    RefineSchema {
        base,
        check: Check::Sync(Arc::new(check)),
        constraints,
    }
    .into_ref()
}

/// Refine `base` with an asynchronous check. Synchronous validation of the
/// result reports `async_validation_required` once the base passes.
pub fn refine_async<F>(base: SchemaRef, check: F) -> SchemaRef
where
    F: for<'a> Fn(&'a Value, &'a mut RefineContext) -> BoxFuture<'a, RefineOutcome>
        + Send
        + Sync
        + 'static,
{
    RefineSchema {
        base,
        check: Check::Async(Arc::new(check)),
        constraints: Vec::new(),
    }
    .into_ref()
}
