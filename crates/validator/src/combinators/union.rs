//! UNION combinator - any one of several alternatives
//!
//! Unions of objects or tuples that carry a discriminating literal are
//! dispatched straight to the matching alternative, so a failure describes
//! what is wrong with *that* alternative. Other unions try each alternative
//! in declaration order.

use std::sync::OnceLock;

use runtypes_value::Value;

use crate::combinators::discriminant::{self, DiscriminantKey, Dispatch};
use crate::foundation::{
    Check, Failcode, Failure, PathSegment, Reflect, Runtype, Validation, Visited, inner_validate,
};
use crate::show;

// ============================================================================
// UNION
// ============================================================================

/// Alternatives in declaration order, plus the lazily computed discriminant.
#[derive(Debug)]
pub struct Union {
    alternatives: Vec<Runtype>,
    dispatch: OnceLock<Option<Dispatch>>,
}

impl Union {
    pub fn alternatives(&self) -> &[Runtype] {
        &self.alternatives
    }

    /// The field or slot used to pick an alternative, if the union has one.
    ///
    /// Computed on first use.
    pub fn discriminant(&self) -> Option<&DiscriminantKey> {
        self.dispatch().map(|d| &d.key)
    }

    fn dispatch(&self) -> Option<&Dispatch> {
        self.dispatch
            .get_or_init(|| {
                let dispatch = discriminant::analyse(&self.alternatives);
                match &dispatch {
                    Some(d) => tracing::debug!(
                        discriminant = %d.key,
                        alternatives = self.alternatives.len(),
                        "union dispatches on discriminant"
                    ),
                    None => tracing::debug!(
                        alternatives = self.alternatives.len(),
                        "union has no discriminant, trying alternatives in order"
                    ),
                }
                dispatch
            })
            .as_ref()
    }

    fn check_discriminated(&self, dispatch: &Dispatch, value: &Value, visited: &mut Visited) -> Validation {
        let (actual, segment) = match &dispatch.key {
            DiscriminantKey::Field(name) => {
                let Some(object) = value.as_object() else {
                    return Err(Failure::type_incorrect(show::describe(self), value));
                };
                (
                    object.get(name).unwrap_or_default(),
                    PathSegment::Field(name.clone()),
                )
            }
            DiscriminantKey::Index(index) => {
                let Some(array) = value.as_array() else {
                    return Err(Failure::type_incorrect(show::describe(self), value));
                };
                (array.get(*index).unwrap_or_default(), PathSegment::Index(*index))
            }
        };

        let matched = actual
            .as_primitive()
            .and_then(|p| dispatch.table.get_key_value(&p));
        match matched {
            Some((literal, &index)) => inner_validate(&self.alternatives[index], value, visited)
                .map_err(|failure| {
                    failure.prefixed(PathSegment::Discriminant {
                        at: dispatch.key.to_string(),
                        value: literal.clone(),
                    })
                }),
            None => Err(Failure::value_incorrect(dispatch.expected(), &actual).prefixed(segment)),
        }
    }

    fn check_linear(&self, value: &Value, visited: &mut Visited) -> Validation {
        for alternative in &self.alternatives {
            match inner_validate(alternative, value, visited) {
                Ok(validated) => return Ok(validated),
                Err(failure) if failure.code == Failcode::DepthExceeded => return Err(failure),
                Err(_) => {}
            }
        }
        Err(Failure::type_incorrect(show::describe(self), value))
    }
}

impl Check for Union {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        match self.dispatch() {
            Some(dispatch) => self.check_discriminated(dispatch, value, visited),
            None => self.check_linear(value, visited),
        }
    }
}

/// Accepts values satisfying any of `alternatives`.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let shape = union([
///     object! { kind: literal("circle"), radius: number() },
///     object! { kind: literal("square"), side: number() },
/// ]);
///
/// let err = shape
///     .check(&Value::object([("kind", Value::from("circle")), ("size", Value::from("oops"))]))
///     .unwrap_err();
/// assert_eq!(err.code(), Failcode::PropertyMissing);
/// assert_eq!(err.key().as_deref(), Some(r#"<kind: "circle">.radius"#));
/// ```
pub fn union(alternatives: impl IntoIterator<Item = Runtype>) -> Runtype {
    Runtype::new(Reflect::Union(Union {
        alternatives: alternatives.into_iter().collect(),
        dispatch: OnceLock::new(),
    }))
}

// ============================================================================
// TESTS
// ============================================================================
