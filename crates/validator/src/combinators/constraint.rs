//! CONSTRAINT combinator - refine a runtype with a predicate

use std::fmt;
use std::sync::Arc;

use runtypes_value::Value;

use crate::foundation::{
    Check, Failcode, Failure, Reflect, Runtype, Validation, Visited, inner_validate,
};
use crate::show;

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of a constraint predicate.
///
/// Built from `bool`, from a failure message (`String`/`&str`), or from
/// `Result<(), String>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Rejected, optionally with a custom message.
    Fail(Option<String>),
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail(None) }
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        Self::Fail(Some(message))
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Self::Fail(Some(message.to_owned()))
    }
}

impl<E: fmt::Display> From<Result<(), E>> for Verdict {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(e) => Self::Fail(Some(e.to_string())),
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Naming and metadata for a constraint.
#[derive(Debug, Clone, Default)]
pub struct ConstraintOptions {
    /// Used in messages and `show` instead of `WithConstraint<…>`.
    pub name: Option<String>,
    /// Arbitrary data describing the constraint, available through reflection.
    pub args: Option<Value>,
}

impl ConstraintOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            args: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_args(mut self, args: impl Into<Value>) -> Self {
        self.args = Some(args.into());
        self
    }
}

// ============================================================================
// CONSTRAINT
// ============================================================================

type Predicate = Arc<dyn Fn(&Value) -> Verdict + Send + Sync>;

/// The underlying runtype plus a predicate checked after it succeeds.
#[derive(Clone)]
pub struct Constraint {
    underlying: Runtype,
    predicate: Predicate,
    options: ConstraintOptions,
}

impl Constraint {
    pub fn underlying(&self) -> &Runtype {
        &self.underlying
    }

    pub fn options(&self) -> &ConstraintOptions {
        &self.options
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("underlying", &self.underlying)
            .field("options", &self.options)
            .finish()
    }
}

impl Check for Constraint {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let validated = inner_validate(&self.underlying, value, visited)?;
        match (self.predicate)(&validated) {
            Verdict::Pass => Ok(validated),
            Verdict::Fail(Some(message)) => Err(Failure::new(Failcode::ConstraintFailed, message)),
            Verdict::Fail(None) => Err(Failure::new(
                Failcode::ConstraintFailed,
                format!("Failed constraint check for {}", show::describe(self)),
            )),
        }
    }
}

/// Refines `underlying` with `predicate`.
pub fn constraint<F, R>(underlying: Runtype, predicate: F, options: ConstraintOptions) -> Runtype
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: Into<Verdict>,
{
    Runtype::new(Reflect::Constraint(Constraint {
        underlying,
        predicate: Arc::new(move |value| predicate(value).into()),
        options,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use rstest::rstest;

    fn positive() -> Runtype {
        number().with_constraint(|v| v.as_f64().is_some_and(|n| n > 0.0))
    }

    #[test]
    fn underlying_runs_first() {
        let failure = positive().validate(&Value::from("1")).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
    }

    #[test]
    fn generic_message() {
        let failure = positive().validate(&Value::from(-1)).unwrap_err();
        assert_eq!(failure.code, Failcode::ConstraintFailed);
        assert_eq!(failure.message, "Failed constraint check for WithConstraint<number>");

        let named = number().with_constraint_options(|_| false, ConstraintOptions::named("Never"));
        assert_eq!(
            named.validate(&Value::from(1)).unwrap_err().message,
            "Failed constraint check for Never"
        );
    }

    #[rstest]
    #[case::short("ab", Some("too short"))]
    #[case::ok("abcd", None)]
    fn message_verdicts(#[case] input: &str, #[case] expected: Option<&str>) {
        let rt = string().with_constraint(|v| {
            if v.as_str().is_some_and(|s| s.len() >= 3) {
                Verdict::Pass
            } else {
                Verdict::from("too short")
            }
        });
        let result = rt.validate(&Value::from(input));
        assert_eq!(result.err().map(|f| f.message.into_owned()), expected.map(str::to_owned));
    }

    #[test]
    fn result_verdicts() {
        let even = number().with_constraint(|v| -> Result<(), String> {
            match v.as_f64() {
                Some(n) if n % 2.0 == 0.0 => Ok(()),
                _ => Err(format!("{v} is odd")),
            }
        });
        assert!(even.guard(&Value::from(4)));
        assert_eq!(even.validate(&Value::from(3)).unwrap_err().message, "3 is odd");
    }

    #[test]
    fn options_are_reflected() {
        let rt = string().with_constraint_options(
            |_| true,
            ConstraintOptions::named("Slug").with_args(Value::from("^[a-z-]+$")),
        );
        let Reflect::Constraint(c) = rt.reflect() else {
            panic!("expected a constraint");
        };
        assert_eq!(c.options().name.as_deref(), Some("Slug"));
        assert_eq!(c.options().args.as_ref().and_then(Value::as_str), Some("^[a-z-]+$"));
    }
}
