//! Value error types.

use thiserror::Error;

use crate::kind::ValueKind;

/// Errors raised by value conversions.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value graph refers back to one of its ancestors.
    #[error("Value contains a circular reference")]
    Cycle,

    /// `NaN` or an infinity where a finite number is required.
    #[error("Number is not finite")]
    NonFiniteNumber,

    /// The target format has no representation for this kind.
    #[error("Cannot represent {kind} value")]
    Unrepresentable { kind: ValueKind },
}

/// Result type for value operations.
pub type ValueResult<T> = Result<T, ValueError>;
