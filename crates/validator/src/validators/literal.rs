//! Literal validators

use runtypes_value::{Primitive, Value};

use crate::foundation::{Check, Failure, Reflect, Runtype, Validation, Visited};

/// Matches exactly one primitive value, compared with `SameValueZero`.
#[derive(Debug, Clone)]
pub struct Literal {
    value: Primitive,
}

impl Literal {
    pub fn value(&self) -> &Primitive {
        &self.value
    }
}

impl Check for Literal {
    fn check(&self, value: &Value, _visited: &mut Visited) -> Validation {
        match value.as_primitive() {
            Some(actual) if actual == self.value => Ok(value.clone()),
            Some(actual) if actual.kind() == self.value.kind() => {
                Err(Failure::value_incorrect(&self.value, value))
            }
            _ => Err(Failure::type_incorrect(&self.value, value)),
        }
    }
}

/// Accepts exactly `value`.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let circle = literal("circle");
/// assert!(circle.guard(&Value::from("circle")));
/// assert!(!circle.guard(&Value::from("square")));
/// assert!(literal(f64::NAN).guard(&Value::number(f64::NAN)));
/// ```
pub fn literal(value: impl Into<Primitive>) -> Runtype {
    Runtype::new(Reflect::Literal(Literal {
        value: value.into(),
    }))
}

/// Accepts only `undefined`.
pub fn undefined() -> Runtype {
    literal(Primitive::Undefined)
}

/// Accepts only `null`.
pub fn null() -> Runtype {
    literal(Primitive::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Failcode;

    #[test]
    fn same_value_zero() {
        assert!(literal(0.0).guard(&Value::number(-0.0)));
        assert!(literal(f64::NAN).guard(&Value::number(f64::NAN)));
        assert!(!literal(1).guard(&Value::bigint(1)));
    }

    #[test]
    fn wrong_value_vs_wrong_type() {
        let rt = literal("circle");

        let failure = rt.validate(&Value::from("square")).unwrap_err();
        assert_eq!(failure.code, Failcode::ValueIncorrect);
        assert_eq!(failure.message, r#"Expected "circle", but was "square""#);

        let failure = rt.validate(&Value::from(3)).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
    }

    #[test]
    fn unit_literals() {
        assert!(undefined().guard(&Value::Undefined));
        assert!(!undefined().guard(&Value::Null));
        assert!(null().guard(&Value::Null));
        assert_eq!(
            null().validate(&Value::Undefined).unwrap_err().code,
            Failcode::TypeIncorrect
        );
    }
}
