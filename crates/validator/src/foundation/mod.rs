//! Core validation types and the validator protocol
//!
//! - **Runtype**: [`Runtype`], its payload [`Reflect`] and kind [`Tag`]
//! - **Traits**: [`Check`], the raw check every validator kind implements
//! - **Failures**: [`Failure`], [`Failcode`], [`Path`], [`PathSegment`]
//! - **Errors**: [`ValidationError`], [`ConstructError`]
//! - **Recursion**: [`Visited`], [`inner_validate`]
//! - **Configuration**: [`ValidateOptions`]
//!
//! # Protocol
//!
//! Every runtype answers the same questions:
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! let rt = array(number());
//! let value = Value::array([Value::from(1), Value::from("2")]);
//!
//! assert!(!rt.guard(&value));                       // bool
//! let failure = rt.validate(&value).unwrap_err();   // never raises
//! assert_eq!(failure.key().as_deref(), Some("[1]"));
//! assert!(rt.check(&value).is_err());               // raises ValidationError
//! ```

pub mod config;
pub mod error;
pub mod failure;
pub mod runtype;
pub mod traits;
pub mod visited;

pub use config::{DEFAULT_MAX_DEPTH, ValidateOptions};
pub use error::{ConstructError, ValidationError};
pub use failure::{Details, Failcode, Failure, Path, PathSegment};
pub use runtype::{Reflect, Runtype, RuntypeId, Tag};
pub use traits::Check;
pub use visited::{Visited, inner_validate};

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Outcome of a validation: the validated value or the reason it was rejected.
pub type Validation<T = runtypes_value::Value> = Result<T, Failure>;
