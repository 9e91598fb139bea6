//! Primitive validators
//!
//! Each accepts exactly one value kind and returns the value unchanged.

use runtypes_value::Value;

use crate::foundation::{Failcode, Failure, Reflect, Runtype, Validation};

/// Declares a kind-checking runtype: its constructor and its raw check.
macro_rules! primitive_runtype {
    ($(#[$meta:meta])* fn $ctor:ident() => $variant:ident, $check:ident, $name:literal, $is:ident;) => {
        $(#[$meta])*
        pub fn $ctor() -> Runtype {
            Runtype::new(Reflect::$variant)
        }

        pub(crate) fn $check(value: &Value) -> Validation {
            if value.$is() {
                Ok(value.clone())
            } else {
                Err(Failure::type_incorrect($name, value))
            }
        }
    };
}

primitive_runtype! {
    /// Accepts `true` and `false`.
    fn boolean() => Boolean, check_boolean, "boolean", is_bool;
}

primitive_runtype! {
    /// Accepts any number, `NaN` and infinities included.
    fn number() => Number, check_number, "number", is_number;
}

primitive_runtype! {
    /// Accepts any string.
    fn string() => String, check_string, "string", is_string;
}

primitive_runtype! {
    /// Accepts any bigint.
    fn bigint() => BigInt, check_bigint, "bigint", is_bigint;
}

primitive_runtype! {
    /// Accepts any callable value.
    fn function() => Function, check_function, "function", is_function;
}

/// Accepts every value.
pub fn unknown() -> Runtype {
    Runtype::new(Reflect::Unknown)
}

/// Rejects every value with `NOTHING_EXPECTED`.
pub fn never() -> Runtype {
    Runtype::new(Reflect::Never)
}

pub(crate) fn check_never(value: &Value) -> Validation {
    Err(Failure::new(
        Failcode::NothingExpected,
        format!("Expected nothing, but was {}", crate::foundation::failure::describe(value)),
    ))
}
