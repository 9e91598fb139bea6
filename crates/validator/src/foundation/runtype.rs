//! The `Runtype` handle, its closed reflection enum and the uniform protocol.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use runtypes_value::Value;
use serde::de::DeserializeOwned;

use crate::combinators::{
    ArrayOf, Brand, Constraint, ConstraintOptions, Intersect, Lazy, ObjectShape, Optional, Parser,
    Record, Template, Tuple, Union, Verdict,
};
use crate::foundation::{
    Check, Failcode, Failure, ValidateOptions, Validation, ValidationError, Visited, inner_validate,
};
use crate::show;
use crate::validators::{InstanceOf, Literal, primitives};

// ============================================================================
// IDENTITY
// ============================================================================

/// Stable identity of a runtype, distinct for every constructed runtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntypeId(u64);

impl RuntypeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RuntypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// TAG
// ============================================================================

/// Closed set of validator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Unknown,
    Never,
    Boolean,
    Number,
    String,
    BigInt,
    Function,
    Literal,
    InstanceOf,
    Array,
    Tuple,
    Object,
    Record,
    Union,
    Intersect,
    Optional,
    Constraint,
    Brand,
    Lazy,
    Template,
    Parser,
}

impl Tag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::BigInt => "bigint",
            Self::Function => "function",
            Self::Literal => "literal",
            Self::InstanceOf => "instanceof",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Object => "object",
            Self::Record => "record",
            Self::Union => "union",
            Self::Intersect => "intersect",
            Self::Optional => "optional",
            Self::Constraint => "constraint",
            Self::Brand => "brand",
            Self::Lazy => "lazy",
            Self::Template => "template",
            Self::Parser => "parser",
        }
    }

    /// Kinds that descend into the elements or properties of a value.
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array | Self::Tuple | Self::Object | Self::Record)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// REFLECT
// ============================================================================

/// The payload of a runtype: one variant per validator kind.
///
/// Matching on `Reflect` is how discrimination, template compilation and
/// `show` inspect a runtype's structure.
pub enum Reflect {
    Unknown,
    Never,
    Boolean,
    Number,
    String,
    BigInt,
    Function,
    Literal(Literal),
    InstanceOf(InstanceOf),
    Array(ArrayOf),
    Tuple(Tuple),
    Object(ObjectShape),
    Record(Record),
    Union(Union),
    Intersect(Intersect),
    Optional(Optional),
    Constraint(Constraint),
    Brand(Brand),
    Lazy(Lazy),
    Template(Template),
    Parser(Parser),
}

impl Reflect {
    /// The kind of this payload. Unlike [`Runtype::tag`], a lazy payload
    /// reports [`Tag::Lazy`] without resolving.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Unknown => Tag::Unknown,
            Self::Never => Tag::Never,
            Self::Boolean => Tag::Boolean,
            Self::Number => Tag::Number,
            Self::String => Tag::String,
            Self::BigInt => Tag::BigInt,
            Self::Function => Tag::Function,
            Self::Literal(_) => Tag::Literal,
            Self::InstanceOf(_) => Tag::InstanceOf,
            Self::Array(_) => Tag::Array,
            Self::Tuple(_) => Tag::Tuple,
            Self::Object(_) => Tag::Object,
            Self::Record(_) => Tag::Record,
            Self::Union(_) => Tag::Union,
            Self::Intersect(_) => Tag::Intersect,
            Self::Optional(_) => Tag::Optional,
            Self::Constraint(_) => Tag::Constraint,
            Self::Brand(_) => Tag::Brand,
            Self::Lazy(_) => Tag::Lazy,
            Self::Template(_) => Tag::Template,
            Self::Parser(_) => Tag::Parser,
        }
    }
}

impl Check for Reflect {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        match self {
            Self::Unknown => Ok(value.clone()),
            Self::Never => primitives::check_never(value),
            Self::Boolean => primitives::check_boolean(value),
            Self::Number => primitives::check_number(value),
            Self::String => primitives::check_string(value),
            Self::BigInt => primitives::check_bigint(value),
            Self::Function => primitives::check_function(value),
            Self::Literal(r) => r.check(value, visited),
            Self::InstanceOf(r) => r.check(value, visited),
            Self::Array(r) => r.check(value, visited),
            Self::Tuple(r) => r.check(value, visited),
            Self::Object(r) => r.check(value, visited),
            Self::Record(r) => r.check(value, visited),
            Self::Union(r) => r.check(value, visited),
            Self::Intersect(r) => r.check(value, visited),
            Self::Optional(r) => r.check(value, visited),
            Self::Constraint(r) => r.check(value, visited),
            Self::Brand(r) => r.check(value, visited),
            Self::Lazy(r) => r.check(value, visited),
            Self::Template(r) => r.check(value, visited),
            Self::Parser(r) => r.check(value, visited),
        }
    }
}

// ============================================================================
// RUNTYPE
// ============================================================================

struct Node {
    id: RuntypeId,
    reflect: Reflect,
}

/// A runtime validator.
///
/// Cheap to clone; clones share the payload and the [`RuntypeId`].
///
/// # Examples
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let point = object!{ x: number(), y: number() };
///
/// assert!(point.guard(&Value::object([("x", Value::from(1)), ("y", Value::from(2))])));
///
/// let err = point.check(&Value::object([("x", Value::from(1))])).unwrap_err();
/// assert_eq!(err.code(), Failcode::PropertyMissing);
/// assert_eq!(err.key().as_deref(), Some("y"));
/// ```
#[derive(Clone)]
pub struct Runtype {
    node: Arc<Node>,
}

impl Runtype {
    pub(crate) fn new(reflect: Reflect) -> Self {
        Self::with_id(RuntypeId::next(), reflect)
    }

    pub(crate) fn with_id(id: RuntypeId, reflect: Reflect) -> Self {
        Self {
            node: Arc::new(Node { id, reflect }),
        }
    }

    pub fn id(&self) -> RuntypeId {
        self.node.id
    }

    pub fn reflect(&self) -> &Reflect {
        &self.node.reflect
    }

    /// The kind of this runtype. Lazy runtypes report the kind they resolve to.
    pub fn tag(&self) -> Tag {
        match self.reflect() {
            Reflect::Lazy(lazy) => lazy.resolve().tag(),
            other => other.tag(),
        }
    }

    /// Human-readable description used in failure messages.
    pub fn show(&self) -> String {
        show::runtype(self)
    }

    // ==================== Protocol ====================

    /// Validates `value` without raising.
    pub fn validate(&self, value: &Value) -> Validation {
        self.validate_with(value, &ValidateOptions::default())
    }

    pub fn validate_with(&self, value: &Value, options: &ValidateOptions) -> Validation {
        let mut visited = Visited::new(*options);
        inner_validate(self, value, &mut visited)
    }

    /// Validates `value`, returning a structured error on failure.
    pub fn check(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate(value).map_err(ValidationError::from)
    }

    pub fn check_with(&self, value: &Value, options: &ValidateOptions) -> Result<Value, ValidationError> {
        self.validate_with(value, options).map_err(ValidationError::from)
    }

    /// `true` iff `value` conforms.
    pub fn guard(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// Checks `value`, then deserializes the validated value into `T`.
    ///
    /// Conversion failures are reported as `PARSING_FAILED`.
    pub fn check_into<T: DeserializeOwned>(&self, value: &Value) -> Result<T, ValidationError> {
        let validated = self.check(value)?;
        let json = validated.to_json().map_err(|e| {
            Failure::new(
                Failcode::ParsingFailed,
                format!("Failed to convert validated value to JSON: {e}"),
            )
        })?;
        serde_json::from_value(json).map_err(|e| {
            ValidationError::from(Failure::new(
                Failcode::ParsingFailed,
                format!("Failed to deserialize {}: {e}", type_name::<T>()),
            ))
        })
    }

    // ==================== Combinators ====================

    /// `self | other`.
    pub fn or(self, other: Runtype) -> Runtype {
        crate::combinators::union([self, other])
    }

    /// `self & other`.
    pub fn and(self, other: Runtype) -> Runtype {
        crate::combinators::intersect([self, other])
    }

    /// Accepts `undefined`; as an object field, the key may be absent.
    pub fn optional(self) -> Runtype {
        crate::combinators::optional(self)
    }

    /// `self | null`.
    pub fn nullable(self) -> Runtype {
        crate::combinators::union([self, crate::validators::null()])
    }

    /// Refines `self` with a predicate.
    ///
    /// The predicate may return `bool`, a failure message, or
    /// `Result<(), String>`; see [`Verdict`].
    pub fn with_constraint<F, R>(self, predicate: F) -> Runtype
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        self.with_constraint_options(predicate, ConstraintOptions::default())
    }

    pub fn with_constraint_options<F, R>(self, predicate: F, options: ConstraintOptions) -> Runtype
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        crate::combinators::constraint(self, predicate, options)
    }

    /// Refines `self` with a boolean predicate.
    pub fn with_guard<F>(self, predicate: F) -> Runtype
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(predicate)
    }

    /// Names `self` nominally. Validation is unchanged.
    pub fn with_brand(self, brand: impl Into<String>) -> Runtype {
        crate::combinators::brand(brand, self)
    }

    /// Runs `parse` on the validated value. Errors become `PARSING_FAILED`.
    pub fn with_parser<F, T, E>(self, parse: F) -> Runtype
    where
        F: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
        T: Into<Value>,
        E: fmt::Display,
    {
        crate::combinators::parser(self, parse)
    }
}

impl fmt::Display for Runtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.show())
    }
}

impl fmt::Debug for Runtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtype")
            .field("id", &self.id())
            .field("tag", &self.reflect().tag())
            .field("show", &self.show())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
