//! # runtypes-validator
//!
//! Runtime validators ("runtypes") for untrusted, dynamically shaped data.
//!
//! A [`Runtype`] checks a [`Value`](runtypes_value::Value) and reports a
//! structured [`Failure`](foundation::Failure) with a code, a message, a
//! path into the value and per-child details.
//!
//! ## Quick Start
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! let shape = union![
//!     object! { kind: literal("circle"), radius: number() },
//!     object! { kind: literal("square"), side: number() },
//! ];
//!
//! let value = Value::object([("kind", Value::from("square")), ("side", Value::from(2))]);
//! assert!(shape.guard(&value));
//!
//! let err = shape.check(&Value::object([("kind", Value::from("circle"))])).unwrap_err();
//! assert_eq!(err.code(), Failcode::PropertyMissing);
//! assert_eq!(err.key().as_deref(), Some(r#"<kind: "circle">.radius"#));
//! ```
//!
//! ## Protocol
//!
//! Every runtype offers [`validate`](Runtype::validate) (never fails loudly,
//! returns a `Result<Value, Failure>`), [`check`](Runtype::check) (returns a
//! [`ValidationError`](foundation::ValidationError)) and
//! [`guard`](Runtype::guard) (`bool`). Values may be cyclic; validation
//! terminates because each (value, runtype) pair is validated at most once
//! per path.
//!
//! ## Building Runtypes
//!
//! - **Primitives**: [`number`](validators::number), [`string`](validators::string),
//!   [`literal`](validators::literal), [`unknown`](validators::unknown), ...
//! - **Structure**: [`array`](combinators::array), [`tuple`](combinators::tuple),
//!   [`object`](combinators::object), [`record`](combinators::record)
//! - **Algebra**: [`union`](combinators::union), [`intersect`](combinators::intersect),
//!   [`optional`](combinators::optional)
//! - **Refinement**: [`Runtype::with_constraint`], [`Runtype::with_brand`],
//!   [`Runtype::with_parser`]
//! - **Recursion**: [`lazy`](combinators::lazy)
//! - **Strings**: [`template`](combinators::template)
//! - **Functions**: [`Contract`](contract::Contract)

pub mod combinators;
pub mod contract;
pub mod foundation;
mod macros;
pub mod prelude;
pub(crate) mod show;
pub mod validators;

pub use foundation::{Failcode, Failure, Runtype, ValidateOptions, ValidationError};
