//! Value kinds.
//!
//! `ValueKind` is a lightweight, copyable classification of a [`Value`](crate::Value).

use core::fmt::{Display, Formatter};

/// Represents the kind of a `Value`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Array,
    Object,
    Function,
    Instance,
}

impl ValueKind {
    /// Kinds whose values carry pointer identity.
    pub const fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::Array | Self::Object | Self::Function | Self::Instance
        )
    }

    /// Kinds that can be written as a literal.
    pub const fn is_primitive(&self) -> bool {
        !self.is_composite()
    }

    /// Descriptive lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Function => "function",
            Self::Instance => "instance",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
