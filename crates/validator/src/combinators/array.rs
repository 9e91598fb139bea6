//! ARRAY combinator - homogeneous lists

use runtypes_value::Value;

use crate::combinators::aggregate::Aggregate;
use crate::foundation::{
    Check, Failure, PathSegment, Reflect, Runtype, Validation, Visited, inner_validate,
};
use crate::show;

/// Every element must satisfy `element`.
#[derive(Debug, Clone)]
pub struct ArrayOf {
    element: Runtype,
}

impl ArrayOf {
    pub fn element(&self) -> &Runtype {
        &self.element
    }
}

impl Check for ArrayOf {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let Some(array) = value.as_array() else {
            return Err(Failure::type_incorrect(show::describe(self), value));
        };

        let items = array.snapshot();
        let mut aggregate = Aggregate::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let result = inner_validate(&self.element, item, visited);
            aggregate.record(PathSegment::Index(index), item, result);
        }

        aggregate.finish(
            value,
            |n| format!("Expected {}, but {n} elements were incorrect", show::describe(self)),
            |outputs| Value::array(outputs.into_iter().map(|(_, v)| v)),
        )
    }
}

/// Accepts arrays whose every element satisfies `element`.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let rt = array(string());
/// assert!(rt.guard(&Value::array([Value::from("a"), Value::from("b")])));
/// assert_eq!(
///     rt.validate(&Value::array([Value::from("a"), Value::from(1)]))
///         .unwrap_err()
///         .key()
///         .as_deref(),
///     Some("[1]")
/// );
/// ```
pub fn array(element: Runtype) -> Runtype {
    Runtype::new(Reflect::Array(ArrayOf { element }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_non_arrays() {
        let failure = array(number()).validate(&Value::from("x")).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.message, r#"Expected number[], but was "x""#);
    }

    #[test]
    fn aggregates_several_failures() {
        let value = Value::array([Value::from(1), Value::from("a"), Value::Null]);
        let failure = array(number()).validate(&value).unwrap_err();

        assert_eq!(failure.code, Failcode::ContentIncorrect);
        assert_eq!(failure.message, "Expected number[], but 2 elements were incorrect");
        let keys: Vec<_> = failure.paths().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["[1]".to_owned(), "[2]".to_owned()]);
    }

    #[test]
    fn success_returns_the_same_array() {
        let value = Value::array([Value::from(1)]);
        let out = array(number()).check(&value).unwrap();
        assert!(out.same_value(&value));
    }

    #[test]
    fn transformed_elements_produce_a_new_array() {
        let parsed = string().with_parser(|v| {
            v.as_str()
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| "not numeric".to_owned())
        });
        let value = Value::array([Value::from("1"), Value::from("2.5")]);
        let out = array(parsed).check(&value).unwrap();
        assert!(!out.same_value(&value));
        assert_eq!(out.to_string(), "[1, 2.5]");
        assert_eq!(value.to_string(), r#"["1", "2.5"]"#);
    }
}
