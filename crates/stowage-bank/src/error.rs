//! Error types for the stowage-bank crate.
//!
//! Request-level problems are not errors: they are [`RejectionReason`]
//! values and leave state untouched. [`BankError`] covers the things that
//! indicate a broken setup or a caller bug -- bad item metadata, a stack
//! built against the wrong kind of type, or one that would overflow its
//! maximum.
//!
//! [`RejectionReason`]: stowage_types::RejectionReason

use stowage_types::TypeCode;

/// Errors raised while building registries and stacks.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// Two catalog entries share a type code.
    #[error("duplicate item type code: {0}")]
    DuplicateTypeCode(TypeCode),

    /// A catalog entry has a negative unit weight.
    #[error("item type {0} has a negative unit weight")]
    NegativeUnitWeight(TypeCode),

    /// A catalog entry allows zero units per stack or zero durability.
    #[error("item type {0} has a zero stack or durability maximum")]
    ZeroMaximum(TypeCode),

    /// A quantity-based operation was used on an unstackable type, or a
    /// durability-based one on a stackable type.
    #[error("item type {type_code} is {actual}, expected {expected}")]
    WrongStacking {
        /// The offending type.
        type_code: TypeCode,
        /// What the operation needed ("stackable" or "unstackable").
        expected: &'static str,
        /// What the type actually is.
        actual: &'static str,
    },

    /// A stack would hold more than its type allows.
    #[error("quantity {quantity} of {type_code} exceeds the stack maximum of {max_quantity}")]
    StackOverflow {
        /// The offending type.
        type_code: TypeCode,
        /// The requested quantity.
        quantity: u32,
        /// The type's per-stack maximum.
        max_quantity: u32,
    },
}
