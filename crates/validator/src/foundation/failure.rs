//! Failure model for validation results.
//!
//! A [`Failure`] is the structured "why not" of a validation: one
//! [`Failcode`], a self-contained message, the path at which it happened, and
//! for aggregated container failures a `details` map of per-child failures.
//!
//! Messages use `Cow<'static, str>` so static messages do not allocate.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use runtypes_value::{Primitive, Value};
use smallvec::SmallVec;

use crate::foundation::Validation;

// ============================================================================
// FAILURE CODES
// ============================================================================

/// Closed taxonomy of failure reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failcode {
    /// Wrong primitive type or container kind.
    TypeIncorrect,
    /// Right type, wrong value (literal mismatch, unknown discriminant, template mismatch).
    ValueIncorrect,
    /// A record key failed its key runtype.
    KeyIncorrect,
    /// One or more children failed; see `details`.
    ContentIncorrect,
    /// A refinement predicate (or a tuple length) rejected the value.
    ConstraintFailed,
    /// A required property is absent.
    PropertyMissing,
    /// An undeclared property is present on an exact object.
    PropertyPresent,
    /// A value was present where none is expected (`never`).
    NothingExpected,
    /// A post-validation transform failed.
    ParsingFailed,
    /// A function argument is missing or incorrect.
    ArgumentIncorrect,
    /// A function returned an incorrect value.
    ReturnIncorrect,
    /// The configured recursion depth was exceeded.
    DepthExceeded,
}

impl Failcode {
    /// Stable SCREAMING_SNAKE identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeIncorrect => "TYPE_INCORRECT",
            Self::ValueIncorrect => "VALUE_INCORRECT",
            Self::KeyIncorrect => "KEY_INCORRECT",
            Self::ContentIncorrect => "CONTENT_INCORRECT",
            Self::ConstraintFailed => "CONSTRAINT_FAILED",
            Self::PropertyMissing => "PROPERTY_MISSING",
            Self::PropertyPresent => "PROPERTY_PRESENT",
            Self::NothingExpected => "NOTHING_EXPECTED",
            Self::ParsingFailed => "PARSING_FAILED",
            Self::ArgumentIncorrect => "ARGUMENT_INCORRECT",
            Self::ReturnIncorrect => "RETURN_INCORRECT",
            Self::DepthExceeded => "DEPTH_EXCEEDED",
        }
    }
}

impl fmt::Display for Failcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PATHS
// ============================================================================

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Array or tuple index, argument position.
    Index(usize),
    /// Object property or record key.
    Field(String),
    /// The union branch selected by a discriminant, e.g. `<kind: "circle">`.
    Discriminant { at: String, value: Primitive },
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Field(name.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

/// A dot/bracket path such as `items[0].name` or `<kind: "circle">.radius`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(SmallVec<[PathSegment; 4]>);

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.0.iter()
    }

    /// Prepends a segment (the parent's position of this child).
    pub fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Returns `self` followed by `other`.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut joined = self.clone();
        joined.0.extend(other.0.iter().cloned());
        joined
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name) if is_identifier(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Field(name) => write!(f, "[{}]", Primitive::from(name.as_str()))?,
                PathSegment::Discriminant { at, value } => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "<{at}: {value}>")?;
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// FAILURE
// ============================================================================

/// Per-child failures of an aggregated `CONTENT_INCORRECT` failure.
pub type Details = IndexMap<PathSegment, Failure>;

/// A structured validation failure.
///
/// # Examples
///
/// ```rust
/// use runtypes_validator::foundation::{Failcode, Failure, PathSegment};
///
/// let failure = Failure::new(Failcode::PropertyMissing, "Expected property \"radius\", but was missing")
///     .prefixed(PathSegment::from("radius"))
///     .prefixed(PathSegment::Index(0));
///
/// assert_eq!(failure.key().as_deref(), Some("[0].radius"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Why validation failed.
    pub code: Failcode,

    /// Human-readable sentence, complete on its own.
    pub message: Cow<'static, str>,

    /// Nested failures keyed by child position. Only set for `CONTENT_INCORRECT`.
    pub details: Option<Details>,

    /// Where, relative to the validated value, the failure happened.
    pub path: Path,
}

impl Failure {
    /// Creates a failure at the root of the validated value.
    pub fn new(code: Failcode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            path: Path::new(),
        }
    }

    /// `TYPE_INCORRECT`: the value is not of the `expected` kind.
    pub fn type_incorrect(expected: impl fmt::Display, actual: &Value) -> Self {
        Self::new(
            Failcode::TypeIncorrect,
            format!("Expected {expected}, but was {}", describe(actual)),
        )
    }

    /// `VALUE_INCORRECT`: right kind, wrong value.
    pub fn value_incorrect(expected: impl fmt::Display, actual: &Value) -> Self {
        Self::new(
            Failcode::ValueIncorrect,
            format!("Expected {expected}, but was {}", describe(actual)),
        )
    }

    /// Attaches per-child failures.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Replaces the path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Re-roots this failure one level up: `segment` becomes the first step.
    #[must_use = "builder methods must be chained or built"]
    pub fn prefixed(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }

    /// Rendered path, or `None` at the root.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        (!self.path.is_empty()).then(|| self.path.to_string())
    }

    /// Looks up a direct child failure in `details`.
    #[must_use]
    pub fn detail(&self, segment: &PathSegment) -> Option<&Failure> {
        self.details.as_ref().and_then(|d| d.get(segment))
    }

    /// Flattens the failure tree into `(key, leaf failure)` pairs, depth-first.
    #[must_use]
    pub fn paths(&self) -> Vec<(String, &Failure)> {
        let mut out = Vec::new();
        self.collect_leaves(&Path::new(), &mut out);
        out.into_iter().map(|(path, f)| (path.to_string(), f)).collect()
    }

    fn collect_leaves<'a>(&'a self, prefix: &Path, out: &mut Vec<(Path, &'a Failure)>) {
        let here = prefix.join(&self.path);
        match &self.details {
            Some(details) if !details.is_empty() => {
                for (segment, child) in details {
                    let mut child_prefix = here.clone();
                    child_prefix.push(segment.clone());
                    child.collect_leaves(&child_prefix, out);
                }
            }
            _ => out.push((here, self)),
        }
    }

    /// Total failures in the tree, this one included.
    #[must_use]
    pub fn total_count(&self) -> usize {
        1 + self
            .details
            .iter()
            .flat_map(|d| d.values())
            .map(Failure::total_count)
            .sum::<usize>()
    }

    /// Lifts this failure into a `Validation`.
    pub fn into_validation<T>(self) -> Validation<T> {
        Err(self)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "[{key}] {}: {}", self.code, self.message)?,
            None => write!(f, "{}: {}", self.code, self.message)?,
        }
        if let Some(details) = &self.details {
            for (segment, child) in details {
                let mut at = self.path.clone();
                at.push(segment.clone());
                write!(f, "\n  - {at}: {}", child.message)?;
            }
        }
        Ok(())
    }
}

/// Short description of a value for messages: literals for primitives, the
/// type name for everything else.
pub(crate) fn describe(value: &Value) -> String {
    match value.as_primitive() {
        Some(primitive) => primitive.to_string(),
        None => value.type_name().to_owned(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
