//! # runtypes-value
//!
//! The dynamic value model validated by `runtypes-validator`.
//!
//! Values mirror what untrusted data looks like once it has been decoded by a
//! host application: primitives, arrays, objects, callables and opaque host
//! objects. Composite values (`Array`, `Object`, `Function`, `Instance`) are
//! shared handles with pointer identity, so a value graph may contain
//! back-references:
//!
//! ```
//! use runtypes_value::{Array, Value};
//!
//! let a = Array::new();
//! let b = Array::from_vec(vec![Value::from(a.clone())]);
//! a.push(Value::from(b.clone()));
//!
//! assert_eq!(Value::from(a).to_string(), "[[[Circular]]]");
//! ```
//!
//! Primitives never carry identity; see [`Value::identity`].

pub mod collections;
pub mod display;
pub mod error;
pub mod function;
pub mod instance;
pub mod kind;
pub mod number;
pub mod primitive;
pub mod value;

mod convert;

pub use collections::{Array, Object};
pub use error::{ValueError, ValueResult};
pub use function::Function;
pub use instance::Instance;
pub use kind::ValueKind;
pub use primitive::Primitive;
pub use value::{Identity, Value};

/// Common imports for working with values.
pub mod prelude {
    pub use crate::{
        Array, Function, Identity, Instance, Object, Primitive, Value, ValueError, ValueKind,
    };
}
