//! # assay-logic — Logical Combinators
//!
//! Boolean composition of schemas:
//!
//! | combinator | accepts when                 | failure when rejected          |
//! |------------|------------------------------|--------------------------------|
//! | [`and`]    | every operand accepts        | merge of all operand failures  |
//! | [`or`]     | some operand accepts         | the last operand's failure     |
//! | [`xor`]    | exactly one operand accepts  | last failure, or `xor` issue   |
//! | [`not`]    | the operand rejects          | `not` issue                    |
//!
//! Operands are evaluated in the order given, in the async path too.
//! Union and exclusive union pick the branch during parse in the same pass
//! that validates, so no operand is validated twice.

pub mod and;
pub mod not;
pub mod or;
pub mod xor;

pub use and::{and, AndSchema};
pub use not::{not, NotSchema};
pub use or::{or, OrSchema};
pub use xor::{xor, XorSchema};
