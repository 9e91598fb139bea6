//! OPTIONAL combinator - `undefined` or the underlying runtype

use runtypes_value::Value;

use crate::foundation::{Check, Reflect, Runtype, Validation, Visited, inner_validate};

/// Accepts `undefined`; as an object property, the key may also be absent.
#[derive(Debug, Clone)]
pub struct Optional {
    underlying: Runtype,
}

impl Optional {
    pub fn underlying(&self) -> &Runtype {
        &self.underlying
    }
}

impl Check for Optional {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        if value.is_undefined() {
            return Ok(Value::Undefined);
        }
        inner_validate(&self.underlying, value, visited)
    }
}

/// Makes `underlying` optional.
pub fn optional(underlying: Runtype) -> Runtype {
    Runtype::new(Reflect::Optional(Optional { underlying }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn undefined_or_underlying() {
        let rt = optional(number());
        assert!(rt.guard(&Value::Undefined));
        assert!(rt.guard(&Value::from(1)));
        assert_eq!(rt.validate(&Value::Null).unwrap_err().code, Failcode::TypeIncorrect);
    }
}
