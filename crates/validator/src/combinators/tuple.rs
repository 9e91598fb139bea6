//! TUPLE combinator - fixed-shape lists, optionally with a variadic middle

use runtypes_value::Value;

use crate::combinators::aggregate::Aggregate;
use crate::foundation::{
    Check, ConstructError, Failcode, Failure, PathSegment, Reflect, Runtype, Validation, Visited,
    inner_validate,
};
use crate::show;

// ============================================================================
// TUPLE
// ============================================================================

/// Leading components, an optional rest element type, trailing components.
///
/// Without a rest element the length must match exactly; with one, the rest
/// absorbs zero or more elements between the leading and trailing parts.
#[derive(Debug, Clone, Default)]
pub struct Tuple {
    leading: Vec<Runtype>,
    rest: Option<Runtype>,
    trailing: Vec<Runtype>,
}

impl Tuple {
    /// Starts a tuple whose invariants are checked as parts are added.
    pub fn builder() -> TupleBuilder {
        TupleBuilder::default()
    }

    pub fn leading(&self) -> &[Runtype] {
        &self.leading
    }

    /// Element type of the variadic middle, if any.
    pub fn rest(&self) -> Option<&Runtype> {
        self.rest.as_ref()
    }

    pub fn trailing(&self) -> &[Runtype] {
        &self.trailing
    }

    /// Number of fixed components.
    pub fn fixed_len(&self) -> usize {
        self.leading.len() + self.trailing.len()
    }

    fn component(&self, index: usize, len: usize) -> &Runtype {
        if index < self.leading.len() {
            return &self.leading[index];
        }
        let trailing_start = len - self.trailing.len();
        match &self.rest {
            Some(rest) if index < trailing_start => rest,
            _ => &self.trailing[index - trailing_start],
        }
    }
}

impl Check for Tuple {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let Some(array) = value.as_array() else {
            return Err(Failure::type_incorrect(show::describe(self), value));
        };

        let items = array.snapshot();
        let len = items.len();
        let fixed = self.fixed_len();
        let length_ok = if self.rest.is_some() { len >= fixed } else { len == fixed };
        if !length_ok {
            let message = if self.rest.is_some() {
                format!("Expected length at least {fixed}, but was {len}")
            } else {
                format!("Expected length {fixed}, but was {len}")
            };
            return Err(Failure::new(Failcode::ConstraintFailed, message));
        }

        let mut aggregate = Aggregate::with_capacity(len);
        for (index, item) in items.iter().enumerate() {
            let result = inner_validate(self.component(index, len), item, visited);
            aggregate.record(PathSegment::Index(index), item, result);
        }

        aggregate.finish(
            value,
            |n| format!("Expected {}, but {n} elements were incorrect", show::describe(self)),
            |outputs| Value::array(outputs.into_iter().map(|(_, v)| v)),
        )
    }
}

/// Accepts arrays of exactly `components.len()` elements, each checked by its component.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let pair = tuple([string(), number()]);
/// assert!(pair.guard(&Value::array([Value::from("a"), Value::from(1)])));
/// assert!(!pair.guard(&Value::array([Value::from("a")])));
/// ```
pub fn tuple(components: impl IntoIterator<Item = Runtype>) -> Runtype {
    Runtype::new(Reflect::Tuple(Tuple {
        leading: components.into_iter().collect(),
        rest: None,
        trailing: Vec::new(),
    }))
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds tuples with rest elements and spreads.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let head = tuple([string(), string()]);
/// let rt = Tuple::builder()
///     .spread(head).unwrap()
///     .rest(number()).unwrap()
///     .element(boolean())
///     .build()
///     .unwrap();
/// assert_eq!(rt.show(), "[string, string, ...number[], boolean]");
/// ```
#[derive(Debug, Default)]
#[must_use = "builder methods must be chained or built"]
pub struct TupleBuilder {
    shape: Tuple,
    error: Option<ConstructError>,
}

impl TupleBuilder {
    /// Appends a single component.
    pub fn element(mut self, component: Runtype) -> Self {
        if self.shape.rest.is_some() {
            self.shape.trailing.push(component);
        } else {
            self.shape.leading.push(component);
        }
        self
    }

    /// Sets the variadic element type. At most one rest is allowed.
    pub fn rest(mut self, element: Runtype) -> Result<Self, ConstructError> {
        if self.shape.rest.is_some() {
            return Err(ConstructError::DuplicateRest);
        }
        self.shape.rest = Some(element);
        Ok(self)
    }

    /// Inlines an array (as a rest) or a tuple (component by component).
    pub fn spread(self, source: Runtype) -> Result<Self, ConstructError> {
        match source.reflect() {
            Reflect::Array(array) => self.rest(array.element().clone()),
            Reflect::Tuple(tuple) => {
                let mut builder = self;
                for component in &tuple.leading {
                    builder = builder.element(component.clone());
                }
                if let Some(rest) = &tuple.rest {
                    builder = builder.rest(rest.clone())?;
                }
                for component in &tuple.trailing {
                    builder = builder.element(component.clone());
                }
                Ok(builder)
            }
            other => Err(ConstructError::InvalidSpread {
                found: other.tag().to_string(),
            }),
        }
    }

    /// Like [`rest`](Self::rest) but defers the error to [`build`](Self::build).
    pub fn try_rest(self, element: Runtype) -> Self {
        self.deferred(|b| b.rest(element))
    }

    /// Like [`spread`](Self::spread) but defers the error to [`build`](Self::build).
    pub fn try_spread(self, source: Runtype) -> Self {
        self.deferred(|b| b.spread(source))
    }

    fn deferred(self, step: impl FnOnce(Self) -> Result<Self, ConstructError>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let snapshot = self.shape.clone();
        match step(self) {
            Ok(next) => next,
            Err(error) => Self {
                shape: snapshot,
                error: Some(error),
            },
        }
    }

    pub fn build(self) -> Result<Runtype, ConstructError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(Runtype::new(Reflect::Tuple(self.shape))),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use rstest::rstest;

    fn numbers(n: usize) -> Value {
        Value::array((0..n).map(Value::from))
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    #[case(3, false)]
    fn exact_length(#[case] len: usize, #[case] ok: bool) {
        let rt = tuple([number(), number()]);
        let result = rt.validate(&numbers(len));
        assert_eq!(result.is_ok(), ok);
        if let Err(failure) = result {
            assert_eq!(failure.code, Failcode::ConstraintFailed);
            assert_eq!(failure.message, format!("Expected length 2, but was {len}"));
        }
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    #[case(3, true)]
    #[case(10, true)]
    fn rest_absorbs_zero_or_more(#[case] len: usize, #[case] ok: bool) {
        let rt = Tuple::builder()
            .element(number())
            .rest(number())
            .unwrap()
            .element(number())
            .build()
            .unwrap();
        assert_eq!(rt.guard(&numbers(len)), ok);
    }

    #[test]
    fn components_are_positional() {
        let rt = Tuple::builder()
            .element(string())
            .rest(number())
            .unwrap()
            .element(boolean())
            .build()
            .unwrap();
        let good = Value::array([Value::from("a"), Value::from(1), Value::from(2), Value::from(true)]);
        assert!(rt.guard(&good));

        let bad = Value::array([Value::from("a"), Value::from(1), Value::from(2)]);
        let failure = rt.validate(&bad).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.key().as_deref(), Some("[2]"));
    }

    #[test]
    fn spread_invariants() {
        assert_eq!(
            Tuple::builder().spread(number()).unwrap_err(),
            ConstructError::InvalidSpread { found: "number".into() }
        );
        let err = Tuple::builder()
            .spread(array(number()))
            .unwrap()
            .spread(array(string()))
            .unwrap_err();
        assert_eq!(err, ConstructError::DuplicateRest);

        let deferred = Tuple::builder().try_rest(number()).try_rest(string()).build();
        assert_eq!(deferred.unwrap_err(), ConstructError::DuplicateRest);
    }

    #[test]
    fn spreading_a_tuple_inlines_components() {
        let inner = Tuple::builder()
            .element(string())
            .rest(number())
            .unwrap()
            .build()
            .unwrap();
        let rt = Tuple::builder()
            .element(boolean())
            .spread(inner)
            .unwrap()
            .element(null())
            .build()
            .unwrap();
        assert_eq!(rt.show(), "[boolean, string, ...number[], null]");
    }
}
