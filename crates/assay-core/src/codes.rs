//! Stable issue codes.
//!
//! Codes are the machine-readable discriminant of a
//! [`ValidationIssue`](crate::ValidationIssue). They are part of the public
//! contract: consumers match on them and path-flattened reports carry them
//! verbatim. Never rename an existing code.

/// Value absent where one is mandatory.
pub const REQUIRED: &str = "required";
/// Value present but of an unacceptable kind. Args: expected kind names.
pub const WRONG_TYPE: &str = "wrong_type";
/// Generic refinement failure. Args: caller supplied.
pub const INVALID_VALUE: &str = "invalid_value";
/// Number not strictly greater than zero.
pub const POSITIVE: &str = "positive";
/// Number not an integer.
pub const INTEGER: &str = "integer";
/// Number below the inclusive minimum. Args: `[minimum]`.
pub const MINIMUM: &str = "minimum";
/// Number above the inclusive maximum. Args: `[maximum]`.
pub const MAXIMUM: &str = "maximum";
/// Number not a multiple of the divisor. Args: `[divisor]`.
pub const MULTIPLE_OF: &str = "multipleOf";
/// String shorter than allowed. Args: `[min]`.
pub const MIN_LENGTH: &str = "minLength";
/// String longer than allowed. Args: `[max]`.
pub const MAX_LENGTH: &str = "maxLength";
/// String does not match the pattern. Args: `[pattern]`.
pub const PATTERN: &str = "pattern";
/// Date not strictly before the bound. Args: `[bound]`.
pub const BEFORE: &str = "before";
/// Date not strictly after the bound. Args: `[bound]`.
pub const AFTER: &str = "after";
/// Value matches none of the allowed literals. Args: the literals.
pub const LITERAL: &str = "literal";
/// Undeclared key on a strict object.
pub const ADDITIONAL_PROPERTY: &str = "additionalProperty";
/// Record/map key rejected by the key schema. Cause: the key failure.
pub const INVALID_KEY: &str = "invalid_key";
/// Discriminant selects no member of a discriminated union. Args: `[field]`.
pub const UNKNOWN_DISCRIMINANT: &str = "unknownDiscriminant";
/// More than one exclusive-union operand accepted. Args: `[count]`.
pub const XOR: &str = "xor";
/// Negated schema accepted the value.
pub const NOT: &str = "not";
/// Tuple arity mismatch. Args: `[expected, actual]`.
pub const LENGTH: &str = "length";
/// Synchronous validation requested on an async-only schema.
pub const ASYNC_VALIDATION_REQUIRED: &str = "async_validation_required";
