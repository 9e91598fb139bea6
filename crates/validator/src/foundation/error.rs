//! Error types surfaced by the throwing entry points and by runtype construction.

use crate::foundation::failure::{Details, Failcode, Failure};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Error returned by [`Runtype::check`](crate::Runtype::check) and friends.
///
/// Carries the [`Failure`] unmodified; every field of the failure is
/// reachable through it.
///
/// # Examples
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let err = number().check(&Value::from("5")).unwrap_err();
/// assert_eq!(err.code(), Failcode::TypeIncorrect);
/// assert_eq!(err.key(), None);
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{failure}")]
pub struct ValidationError {
    failure: Failure,
}

impl ValidationError {
    pub fn new(failure: Failure) -> Self {
        Self { failure }
    }

    pub fn code(&self) -> Failcode {
        self.failure.code
    }

    pub fn message(&self) -> &str {
        &self.failure.message
    }

    pub fn details(&self) -> Option<&Details> {
        self.failure.details.as_ref()
    }

    /// Rendered path of the failure, `None` at the root.
    pub fn key(&self) -> Option<String> {
        self.failure.key()
    }

    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    pub fn into_failure(self) -> Failure {
        self.failure
    }
}

impl From<Failure> for ValidationError {
    fn from(failure: Failure) -> Self {
        Self::new(failure)
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        error.failure
    }
}

// ============================================================================
// CONSTRUCTION ERROR
// ============================================================================

/// A runtype could not be built from the given parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConstructError {
    /// A tuple may have at most one rest component.
    #[error("Tuple already has a rest component")]
    DuplicateRest,

    /// Only arrays and tuples can be spread into a tuple.
    #[error("Cannot spread {found} into a tuple")]
    InvalidSpread { found: String },

    /// Shape operations (`exact`, `pick`, ...) apply to object runtypes only.
    #[error("Expected an object runtype, but was {found}")]
    NotAnObject { found: String },

    /// A field listed in `pick`/`omit` is not declared on the object.
    #[error("Object has no field `{name}`")]
    UnknownField { name: String },

    /// A template child has no string representation.
    #[error("{found} cannot appear in a template literal")]
    InvalidTemplatePart { found: String },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::failure::PathSegment;

    #[test]
    fn display_matches_failure() {
        let failure = Failure::new(Failcode::PropertyMissing, "Expected property \"x\", but was missing")
            .prefixed(PathSegment::from("x"));
        let err = ValidationError::from(failure.clone());
        assert_eq!(err.to_string(), failure.to_string());
        assert_eq!(err.key().as_deref(), Some("x"));
        assert_eq!(err.into_failure(), failure);
    }

    #[test]
    fn construct_error_messages() {
        assert_eq!(
            ConstructError::InvalidSpread { found: "number".into() }.to_string(),
            "Cannot spread number into a tuple"
        );
        assert_eq!(
            ConstructError::UnknownField { name: "id".into() }.to_string(),
            "Object has no field `id`"
        );
    }
}
