//! # Intersection
//!
//! `and(a, b, ..)` validates the value against every operand in order and
//! merges the results, so a value must satisfy all of them. Because an
//! issue dominates a container in the merge, a whole-value rejection from
//! one operand replaces the other operands' per-field failures.
//!
//! Parse materializes the value with every operand independently and
//! shallow-merges the object outputs, later operands overwriting earlier
//! ones. Absent outputs (from `not`, say) contribute nothing, and a
//! non-object output replaces whatever was accumulated.

use async_trait::async_trait;

use assay_core::{merge, ValidationOptions, ValidationResult, Value};
use assay_schema::{Meta, MetaKind, ParseResult, Schema, SchemaExt, SchemaRef};

#[derive(Debug, Clone)]
pub struct AndSchema {
    operands: Vec<SchemaRef>,
}

/// Fold one operand's output into the accumulated output.
fn combine(accumulated: Option<Value>, output: Value) -> Option<Value> {
    match (accumulated, output) {
        (accumulated, Value::Absent) => accumulated,
        (Some(Value::Object(mut fields)), Value::Object(more)) => {
            fields.extend(more);
            Some(Value::Object(fields))
        }
        (_, output) => Some(output),
    }
}

impl AndSchema {
    fn finish(&self, value: &Value, accumulated: Option<Value>) -> Value {
        match accumulated {
            Some(output) => output,
            None if self.operands.is_empty() => value.clone(),
            None => Value::Absent,
        }
    }
}

#[async_trait]
impl Schema for AndSchema {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let mut result = None;
        for (index, operand) in self.operands.iter().enumerate() {
            result = merge(result, operand.validate(value, options));
            if options.early_exit && result.is_some() {
                tracing::trace!(operand = index, "intersection stopped early");
                break;
            }
        }
        result
    }

    async fn validate_async(&self, value: &Value, options: &ValidationOptions) -> ValidationResult {
        let mut result = None;
        for operand in &self.operands {
            result = merge(result, operand.validate_async(value, options).await);
            if options.early_exit && result.is_some() {
                break;
            }
        }
        result
    }

    fn meta(&self) -> Meta {
        Meta::new(MetaKind::And(self.operands.clone()))
    }

    fn materialize(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let mut accumulated = None;
        for operand in &self.operands {
            accumulated = combine(accumulated, operand.materialize(value, options)?);
        }
        Ok(self.finish(value, accumulated))
    }

    async fn materialize_async(&self, value: &Value, options: &ValidationOptions) -> ParseResult {
        let mut accumulated = None;
        for operand in &self.operands {
            let output = operand.materialize_async(value, options).await?;
            accumulated = combine(accumulated, output);
        }
        Ok(self.finish(value, accumulated))
    }
}

/// A value must satisfy every operand. With no operands every value passes.
pub fn and(operands: Vec<SchemaRef>) -> SchemaRef {
    AndSchema { operands }.into_ref()
}
