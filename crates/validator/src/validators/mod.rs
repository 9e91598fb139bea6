//! Built-in leaf validators
//!
//! - **Primitives**: [`boolean`], [`number`], [`string`], [`bigint`], [`function`]
//! - **Extremes**: [`unknown`] accepts everything, [`never`] nothing
//! - **Literals**: [`literal`], [`undefined`], [`null`]
//! - **Host objects**: [`instance_of`]
//!
//! # Examples
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! assert!(number().guard(&Value::from(1.5)));
//! assert!(literal(true).guard(&Value::from(true)));
//! assert!(!never().guard(&Value::Undefined));
//! ```

pub mod instance_of;
pub mod literal;
pub mod primitives;

pub use instance_of::{InstanceOf, instance_of};
pub use literal::{Literal, literal, null, undefined};
pub use primitives::{bigint, boolean, function, never, number, string, unknown};
