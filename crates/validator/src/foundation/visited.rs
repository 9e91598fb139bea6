//! Per-call bookkeeping that makes recursive validation terminate on cyclic data.

use std::collections::{HashMap, HashSet};

use runtypes_value::{Identity, Value};

use crate::foundation::{
    Check, Failcode, Failure, Runtype, RuntypeId, ValidateOptions, Validation,
};

type Pair = (Identity, RuntypeId);

/// The `(value, runtype)` pairs seen during one validation call.
///
/// Created once per public call and threaded by `&mut` through every
/// recursive check. A pair is in flight while its check is on the stack, so
/// re-entering it means the data is cyclic and it succeeds immediately. Once a
/// check finishes, its result is kept for the rest of the call; shared
/// subgraphs are checked once per runtype, however many paths reach them.
#[derive(Debug)]
pub struct Visited {
    in_flight: HashSet<Pair>,
    // Holding the value keeps its identity from being reused within the call.
    finished: HashMap<Pair, (Value, Validation)>,
    depth: usize,
    options: ValidateOptions,
}

impl Visited {
    pub fn new(options: ValidateOptions) -> Self {
        Self {
            in_flight: HashSet::new(),
            finished: HashMap::new(),
            depth: 0,
            options,
        }
    }

    /// `true` if `runtype` is already validating this very `value` further up the stack.
    pub fn contains(&self, value: &Value, runtype: &Runtype) -> bool {
        value
            .identity()
            .is_some_and(|identity| self.in_flight.contains(&(identity, runtype.id())))
    }

    /// Number of container values currently being descended into.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }
}

impl Default for Visited {
    fn default() -> Self {
        Self::new(ValidateOptions::default())
    }
}

/// Validates `value` against `runtype` from inside another check.
///
/// A `(value, runtype)` pair that is already in flight succeeds immediately
/// with `value`, and a pair that already finished returns its earlier result;
/// in both cases the raw check is not invoked. Otherwise composite values are
/// marked for the duration of the raw check.
pub fn inner_validate(runtype: &Runtype, value: &Value, visited: &mut Visited) -> Validation {
    let key = value.identity().map(|identity| (identity, runtype.id()));

    if let Some(key) = key {
        if visited.in_flight.contains(&key) {
            tracing::trace!(runtype = %runtype.id(), "cycle detected, assuming success");
            return Ok(value.clone());
        }
        if let Some((_, done)) = visited.finished.get(&key) {
            return done.clone();
        }
    }

    // Only descending into the contents of a composite value counts as nesting.
    let descends = key.is_some() && runtype.reflect().tag().is_container();
    if descends {
        if let Some(max) = visited.options.max_depth {
            if visited.depth >= max {
                return Err(Failure::new(
                    Failcode::DepthExceeded,
                    format!("Expected data nested at most {max} containers deep, but it was nested deeper"),
                ));
            }
        }
        visited.depth += 1;
    }

    if let Some(key) = key {
        visited.in_flight.insert(key);
    }

    let result = runtype.reflect().check(value, visited);

    if let Some(key) = key {
        visited.in_flight.remove(&key);
        // A depth failure depends on the path taken, not on the pair.
        if !result.as_ref().is_err_and(exceeded_depth) {
            visited.finished.insert(key, (value.clone(), result.clone()));
        }
    }
    if descends {
        visited.depth -= 1;
    }
    result
}

fn exceeded_depth(failure: &Failure) -> bool {
    failure.code == Failcode::DepthExceeded
        || failure
            .details
            .as_ref()
            .is_some_and(|details| details.values().any(exceeded_depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use runtypes_value::Array;

    #[test]
    fn in_flight_pair_short_circuits() {
        let rt = array(number());
        let value = Value::array([Value::from("not a number")]);
        let mut visited = Visited::default();

        visited.in_flight.insert((value.identity().unwrap(), rt.id()));
        assert!(visited.contains(&value, &rt));
        assert!(inner_validate(&rt, &value, &mut visited).is_ok());

        // A different runtype on the same value is not suppressed.
        let other = array(number());
        assert!(!visited.contains(&value, &other));
        assert!(inner_validate(&other, &value, &mut visited).is_err());
    }

    #[test]
    fn primitives_are_never_tracked() {
        let rt = number();
        let visited = Visited::default();
        assert!(!visited.contains(&Value::from(1), &rt));
    }

    #[test]
    fn pairs_are_released_after_the_call() {
        let rt = array(unknown());
        let a = Array::new();
        let value = Value::Array(a);
        let mut visited = Visited::default();

        assert!(inner_validate(&rt, &value, &mut visited).is_ok());
        assert!(!visited.contains(&value, &rt));
        assert_eq!(visited.depth(), 0);
    }

    #[test]
    fn finished_pairs_are_not_checked_again() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = array(number()).with_guard(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let shared = Value::array([Value::from(1)]);
        let value = Value::array([shared.clone(), shared.clone(), shared]);
        assert!(array(counted).guard(&value));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wrappers_are_not_nesting() {
        let rt = array(number().optional()).with_brand("Ids").optional();
        let value = Value::array([Value::from(1)]);
        assert!(rt.validate_with(&value, &ValidateOptions::strict(1)).is_ok());
        assert!(rt.validate_with(&value, &ValidateOptions::strict(0)).is_err());
    }

    #[test]
    fn depth_limit() {
        let nested = Value::array([Value::array([Value::array([Value::from(1)])])]);
        let rt = array(array(array(number())));

        let err = rt
            .validate_with(&nested, &ValidateOptions::strict(2))
            .unwrap_err();
        assert_eq!(err.code, Failcode::DepthExceeded);
        assert_eq!(err.key().as_deref(), Some("[0][0]"));

        assert!(rt.validate_with(&nested, &ValidateOptions::strict(4)).is_ok());
        assert!(rt.validate_with(&nested, &ValidateOptions::unbounded()).is_ok());
    }
}
