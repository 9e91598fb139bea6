//! RECORD combinator - homogeneous maps

use runtypes_value::{Value, number};

use crate::combinators::aggregate::Aggregate;
use crate::combinators::object::rebuild_object;
use crate::foundation::{
    Check, Failcode, Failure, PathSegment, Reflect, Runtype, Validation, Visited, inner_validate,
};
use crate::show;
use crate::validators;

/// Every key must satisfy `key` and every value `value`.
///
/// Object keys are strings; a key such as `"42"` that `key` rejects as a
/// string is retried as the number `42`.
#[derive(Debug, Clone)]
pub struct Record {
    key: Runtype,
    value: Runtype,
}

impl Record {
    pub fn key(&self) -> &Runtype {
        &self.key
    }

    pub fn value(&self) -> &Runtype {
        &self.value
    }

    fn check_key(&self, key: &str, visited: &mut Visited) -> bool {
        let as_string = Value::from(key);
        if inner_validate(&self.key, &as_string, visited).is_ok() {
            return true;
        }
        if !number::is_canonical_numeric_key(key) {
            return false;
        }
        number::parse_js(key)
            .is_some_and(|n| inner_validate(&self.key, &Value::number(n), visited).is_ok())
    }
}

impl Check for Record {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let Some(object) = value.as_object() else {
            return Err(Failure::type_incorrect(show::describe(self), value));
        };

        let entries = object.snapshot();
        let mut aggregate = Aggregate::with_capacity(entries.len());
        for (key, item) in &entries {
            let segment = PathSegment::Field(key.clone());
            if !self.check_key(key, visited) {
                aggregate.fail(
                    segment,
                    Failure::new(
                        Failcode::KeyIncorrect,
                        format!(
                            "Expected key of type {}, but was {}",
                            self.key,
                            runtypes_value::Primitive::from(key.as_str())
                        ),
                    ),
                );
                continue;
            }
            let result = inner_validate(&self.value, item, visited);
            aggregate.record(segment, item, result);
        }

        aggregate.finish(
            value,
            |n| format!("Expected {}, but {n} properties were incorrect", show::describe(self)),
            rebuild_object,
        )
    }
}

/// Accepts objects whose keys satisfy `key` and values satisfy `value`.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let scores = record(string(), number());
/// assert!(scores.guard(&Value::object([("ada", Value::from(3))])));
/// assert!(!scores.guard(&Value::object([("ada", Value::from("3"))])));
/// ```
pub fn record(key: Runtype, value: Runtype) -> Runtype {
    Runtype::new(Reflect::Record(Record { key, value }))
}

/// Key domain of a [`dictionary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    #[default]
    String,
    Number,
}

/// Shorthand for `record(string(), value)` or `record(number(), value)`.
pub fn dictionary(value: Runtype, key: KeyKind) -> Runtype {
    let key = match key {
        KeyKind::String => validators::string(),
        KeyKind::Number => validators::number(),
    };
    record(key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn numeric_keys_are_coerced() {
        let rt = dictionary(string(), KeyKind::Number);
        assert!(rt.guard(&Value::object([("1", Value::from("a")), ("2.5", Value::from("b"))])));

        let failure = rt
            .validate(&Value::object([("1", Value::from("a")), ("x", Value::from("b"))]))
            .unwrap_err();
        assert_eq!(failure.code, Failcode::KeyIncorrect);
        assert_eq!(failure.key().as_deref(), Some("x"));
        assert_eq!(failure.message, r#"Expected key of type number, but was "x""#);
    }

    #[test]
    fn non_canonical_numeric_keys_are_rejected() {
        let rt = dictionary(unknown(), KeyKind::Number);
        assert!(!rt.guard(&Value::object([("01", Value::Null)])));
        assert!(!rt.guard(&Value::object([("1.50", Value::Null)])));
    }

    #[test]
    fn literal_union_keys() {
        let rt = record(literal("a").or(literal(1)), boolean());
        assert!(rt.guard(&Value::object([("a", Value::from(true)), ("1", Value::from(false))])));
        assert!(!rt.guard(&Value::object([("b", Value::from(true))])));
    }

    #[test]
    fn value_failures_are_keyed() {
        let rt = dictionary(number(), KeyKind::String);
        let failure = rt
            .validate(&Value::object([("a", Value::from(1)), ("b", Value::Null)]))
            .unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.key().as_deref(), Some("b"));
    }

    #[test]
    fn rejects_arrays() {
        let failure = record(string(), number()).validate(&Value::array([])).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.message, "Expected { [_: string]: number }, but was array");
    }
}
