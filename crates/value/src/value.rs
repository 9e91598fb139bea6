//! Unified value enum.
//!
//! This is the central type: anything a runtype can be asked to validate.

use std::any::Any;
use std::sync::Arc;

use crate::collections::{Array, Object};
use crate::function::Function;
use crate::instance::Instance;
use crate::kind::ValueKind;
use crate::primitive::Primitive;

// ============================================================================
// IDENTITY
// ============================================================================

/// Pointer identity of a composite value.
///
/// Two handles have the same identity iff they refer to the same node. An
/// identity is only meaningful while at least one handle to the node is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub(crate) fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// A dynamic value.
///
/// Cloning a composite variant clones the handle, not the contents: the clone
/// shares the node and its [`Identity`].
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Undefined,

    /// Explicit null.
    Null,

    /// Boolean.
    Bool(bool),

    /// IEEE-754 double.
    Number(f64),

    /// Arbitrary-size integer (bounded to `i128`).
    BigInt(i128),

    /// UTF-8 string.
    String(Arc<str>),

    /// Shared list.
    Array(Array),

    /// Shared insertion-ordered map.
    Object(Object),

    /// Shared callable.
    Function(Function),

    /// Shared opaque host object.
    Instance(Instance),
}

impl Value {
    // ==================== Constructors ====================

    /// Creates a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    /// Creates a number value.
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Creates a bigint value.
    pub const fn bigint(n: i128) -> Self {
        Self::BigInt(n)
    }

    /// Creates a new array node from the given items.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Creates a new object node from the given entries.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    /// Wraps a Rust closure as a function value.
    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self::Function(Function::new(f))
    }

    /// Wraps a host object as an instance value.
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        Self::Instance(Instance::new(value))
    }

    // ==================== Type queries ====================

    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Function(_) => ValueKind::Function,
            Self::Instance(_) => ValueKind::Instance,
        }
    }

    /// Lowercase type name used in diagnostics (`"number"`, `"array"`, ...).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub fn is_bigint(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    #[must_use]
    pub fn is_instance(&self) -> bool {
        matches!(self, Self::Instance(_))
    }

    /// True for values that carry an [`Identity`].
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.kind().is_composite()
    }

    // ==================== Accessors ====================

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bigint(&self) -> Option<i128> {
        match self {
            Self::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(i) => Some(i),
            _ => None,
        }
    }

    // ==================== Identity & equality ====================

    /// Pointer identity of composite values; `None` for primitives.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Array(a) => Some(a.identity()),
            Self::Object(o) => Some(o.identity()),
            Self::Function(f) => Some(f.identity()),
            Self::Instance(i) => Some(i.identity()),
            _ => None,
        }
    }

    /// Returns the primitive view of this value, if it is one.
    #[must_use]
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Undefined => Some(Primitive::Undefined),
            Self::Null => Some(Primitive::Null),
            Self::Bool(b) => Some(Primitive::Bool(*b)),
            Self::Number(n) => Some(Primitive::Number(*n)),
            Self::BigInt(n) => Some(Primitive::BigInt(*n)),
            Self::String(s) => Some(Primitive::String(Arc::clone(s))),
            _ => None,
        }
    }

    /// Identity for composites, `SameValueZero` for primitives.
    ///
    /// `NaN` equals `NaN` and `+0` equals `-0`.
    #[must_use]
    pub fn same_value(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.as_primitive() == other.as_primitive(),
            _ => false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
