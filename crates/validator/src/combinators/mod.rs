//! Runtypes built from other runtypes
//!
//! - **Structure**: [`array`], [`tuple`], [`object`], [`record`], [`dictionary`]
//! - **Algebra**: [`union`], [`intersect`], [`optional`]
//! - **Refinement**: [`constraint`], [`brand`], [`parser`]
//! - **Recursion**: [`lazy`]
//! - **Strings**: [`template`]
//!
//! Containers validate every child, aggregate failures under their path
//! segments and rebuild themselves only when a child transformed its value.
//!
//! # Examples
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! let rt = record(string(), array(number().or(string())));
//! let value = Value::object([
//!     ("a", Value::array([Value::from(1), Value::from("x")])),
//!     ("b", Value::array([Value::Null])),
//! ]);
//!
//! let failure = rt.validate(&value).unwrap_err();
//! assert_eq!(failure.key().as_deref(), Some("b[0]"));
//! ```

pub(crate) mod aggregate;
pub mod array;
pub mod brand;
pub mod constraint;
pub mod discriminant;
pub mod intersect;
pub mod lazy;
pub mod object;
pub mod optional;
pub mod parser;
pub mod record;
pub mod template;
pub mod tuple;
pub mod union;

pub use array::{ArrayOf, array};
pub use brand::{Brand, brand};
pub use constraint::{Constraint, ConstraintOptions, Verdict, constraint};
pub use discriminant::DiscriminantKey;
pub use intersect::{Intersect, intersect};
pub use lazy::{Lazy, lazy};
pub use object::{ObjectShape, object};
pub use optional::{Optional, optional};
pub use parser::{Parser, parser};
pub use record::{KeyKind, Record, dictionary, record};
pub use template::{Template, TemplatePart, template};
pub use tuple::{Tuple, TupleBuilder, tuple};
pub use union::{Union, union};
