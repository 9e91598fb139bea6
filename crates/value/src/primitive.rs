//! Hashable view of primitive values.
//!
//! `Primitive` is what a literal runtype holds and what discriminant maps are
//! keyed by. Equality is `SameValueZero`: `NaN` equals itself, `+0` equals `-0`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::kind::ValueKind;
use crate::number;
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum Primitive {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(Arc<str>),
}

impl Primitive {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
        }
    }

    /// String conversion as performed when a primitive is interpolated into
    /// text: strings unquoted, `10n` as `10`, `null` as `null`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number::format(*n),
            Self::BigInt(n) => n.to_string(),
            Self::String(s) => s.to_string(),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Primitive {}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Number(n) => {
                // Collapse the values SameValueZero treats as equal.
                let canonical = if n.is_nan() {
                    f64::NAN
                } else if *n == 0.0 {
                    0.0
                } else {
                    *n
                };
                canonical.to_bits().hash(state);
            }
            Self::BigInt(n) => n.hash(state),
            Self::String(s) => s.hash(state),
        }
    }
}

/// Literal notation: `"circle"`, `42`, `10n`, `true`, `null`, `undefined`.
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => {
                let quoted = serde_json::to_string(s.as_ref()).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Self::BigInt(n) => write!(f, "{n}n"),
            other => f.write_str(&other.to_text()),
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        match p {
            Primitive::Undefined => Self::Undefined,
            Primitive::Null => Self::Null,
            Primitive::Bool(b) => Self::Bool(b),
            Primitive::Number(n) => Self::Number(n),
            Primitive::BigInt(n) => Self::BigInt(n),
            Primitive::String(s) => Self::String(s),
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Primitive {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Primitive {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i128> for Primitive {
    fn from(n: i128) -> Self {
        Self::BigInt(n)
    }
}
