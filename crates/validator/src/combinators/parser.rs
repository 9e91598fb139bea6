//! PARSER combinator - transform a validated value

use std::fmt;
use std::sync::Arc;

use runtypes_value::Value;

use crate::foundation::{
    Check, Failcode, Failure, Reflect, Runtype, Validation, Visited, inner_validate,
};

type ParseFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Validates with the underlying runtype, then maps the result.
#[derive(Clone)]
pub struct Parser {
    underlying: Runtype,
    parse: ParseFn,
}

impl Parser {
    pub fn underlying(&self) -> &Runtype {
        &self.underlying
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("underlying", &self.underlying)
            .finish_non_exhaustive()
    }
}

impl Check for Parser {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let validated = inner_validate(&self.underlying, value, visited)?;
        (self.parse)(validated).map_err(|reason| {
            Failure::new(
                Failcode::ParsingFailed,
                format!("Failed to parse {}: {reason}", self.underlying),
            )
        })
    }
}

/// Runs `parse` on values accepted by `underlying`.
pub fn parser<F, T, E>(underlying: Runtype, parse: F) -> Runtype
where
    F: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
    T: Into<Value>,
    E: fmt::Display,
{
    Runtype::new(Reflect::Parser(Parser {
        underlying,
        parse: Arc::new(move |value| parse(value).map(Into::into).map_err(|e| e.to_string())),
    }))
}
