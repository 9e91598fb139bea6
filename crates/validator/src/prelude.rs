//! Prelude module for convenient imports.
//!
//! Provides a single `use runtypes_validator::prelude::*;` import that brings
//! in the value model, every runtype constructor, the macros and the failure
//! types.
//!
//! # Examples
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! let point = object! { x: number(), y: number() };
//! let path = array(point);
//! assert!(path.guard(&Value::array([])));
//! ```

// ============================================================================
// VALUES
// ============================================================================

pub use runtypes_value::{Array, Function, Instance, Object, Primitive, Value, ValueKind};

// ============================================================================
// FOUNDATION: Runtype, failures, options
// ============================================================================

pub use crate::foundation::{
    ConstructError, Failcode, Failure, Path, PathSegment, Reflect, Runtype, RuntypeId, Tag,
    ValidateOptions, Validation, ValidationError,
};

// ============================================================================
// VALIDATORS: Leaf runtypes
// ============================================================================

pub use crate::validators::{
    bigint, boolean, function, instance_of, literal, never, null, number, string, undefined,
    unknown,
};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{
    ConstraintOptions, DiscriminantKey, KeyKind, TemplatePart, Tuple, Verdict, array, brand,
    constraint, dictionary, intersect, lazy, object, optional, parser, record, template, tuple,
    union,
};

// ============================================================================
// CONTRACTS
// ============================================================================

pub use crate::contract::{Contract, Enforced};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{intersect, object, template, union};
