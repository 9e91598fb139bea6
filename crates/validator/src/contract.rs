//! Function contracts: validated arguments in, validated result out.
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! let add = Contract::new([number(), number()], number())
//!     .enforce(|args| Value::from(args[0].as_f64().unwrap_or(0.0) + args[1].as_f64().unwrap_or(0.0)));
//!
//! assert_eq!(add.call(&[Value::from(1), Value::from(2)]).unwrap().as_f64(), Some(3.0));
//!
//! let err = add.call(&[Value::from(1), Value::from("2")]).unwrap_err();
//! assert_eq!(err.code(), Failcode::ArgumentIncorrect);
//! assert_eq!(err.key().as_deref(), Some("[1]"));
//! ```

use std::fmt;

use runtypes_value::{Function, Value};

use crate::foundation::{Failcode, Failure, PathSegment, Runtype, ValidationError};

// ============================================================================
// CONTRACT
// ============================================================================

/// Argument runtypes plus a return runtype.
#[derive(Debug, Clone)]
pub struct Contract {
    args: Vec<Runtype>,
    returns: Runtype,
}

impl Contract {
    pub fn new(args: impl IntoIterator<Item = Runtype>, returns: Runtype) -> Self {
        Self {
            args: args.into_iter().collect(),
            returns,
        }
    }

    pub fn args(&self) -> &[Runtype] {
        &self.args
    }

    pub fn returns(&self) -> &Runtype {
        &self.returns
    }

    /// Wraps a Rust closure so every call is checked against this contract.
    pub fn enforce<F>(&self, f: F) -> Enforced
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Enforced {
            contract: self.clone(),
            target: Function::new(f),
        }
    }

    /// Wraps a function value.
    ///
    /// # Errors
    ///
    /// `TYPE_INCORRECT` if `value` is not a function.
    pub fn enforce_value(&self, value: &Value) -> Result<Enforced, ValidationError> {
        let target = value
            .as_function()
            .cloned()
            .ok_or_else(|| Failure::type_incorrect("function", value))?;
        Ok(Enforced {
            contract: self.clone(),
            target,
        })
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(Runtype::show).collect();
        write!(f, "({}) => {}", args.join(", "), self.returns)
    }
}

// ============================================================================
// ENFORCED
// ============================================================================

/// A function bound to a [`Contract`].
#[derive(Debug, Clone)]
pub struct Enforced {
    contract: Contract,
    target: Function,
}

impl Enforced {
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Validates `args`, calls the function with the validated arguments and
    /// validates its result.
    ///
    /// Extra arguments beyond the contract are passed through unchecked.
    ///
    /// # Errors
    ///
    /// `ARGUMENT_INCORRECT` when arguments are missing or one fails its
    /// runtype (keyed by its position), `RETURN_INCORRECT` when the result
    /// fails the return runtype.
    pub fn call(&self, args: &[Value]) -> Result<Value, ValidationError> {
        let expected = self.contract.args.len();
        if args.len() < expected {
            return Err(Failure::new(
                Failcode::ArgumentIncorrect,
                format!(
                    "Expected {expected} arguments but only {} were received",
                    args.len()
                ),
            )
            .into());
        }

        let mut validated = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            match self.contract.args.get(index) {
                Some(runtype) => {
                    let value = runtype
                        .validate(arg)
                        .map_err(|failure| recode(failure, Failcode::ArgumentIncorrect).prefixed(PathSegment::Index(index)))?;
                    validated.push(value);
                }
                None => validated.push(arg.clone()),
            }
        }

        let result = self.target.call(&validated);
        self.contract.returns.validate(&result).map_err(|failure| {
            tracing::debug!(contract = %self.contract, code = %failure.code, "function returned an incorrect value");
            recode(failure, Failcode::ReturnIncorrect).into()
        })
    }
}

/// Keeps message, details and path of `failure` under a contract code.
fn recode(failure: Failure, code: Failcode) -> Failure {
    let message = match failure.code {
        Failcode::TypeIncorrect | Failcode::ValueIncorrect => failure.message,
        inner => format!("{inner}: {}", failure.message).into(),
    };
    Failure {
        code,
        message,
        details: failure.details,
        path: failure.path,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    fn concat() -> Contract {
        Contract::new([string(), string()], string())
    }

    fn join(args: &[Value]) -> Value {
        let text: String = args.iter().filter_map(Value::as_str).collect();
        Value::from(text)
    }

    #[test]
    fn valid_calls_pass_through() {
        let f = concat().enforce(join);
        let out = f.call(&[Value::from("a"), Value::from("b")]).unwrap();
        assert_eq!(out.as_str(), Some("ab"));
    }

    #[test]
    fn missing_arguments() {
        let err = concat().enforce(join).call(&[Value::from("a")]).unwrap_err();
        assert_eq!(err.code(), Failcode::ArgumentIncorrect);
        assert_eq!(err.message(), "Expected 2 arguments but only 1 were received");
        assert_eq!(err.key(), None);
    }

    #[test]
    fn incorrect_argument_is_keyed_by_position() {
        let err = concat()
            .enforce(join)
            .call(&[Value::from(1), Value::from("b")])
            .unwrap_err();
        assert_eq!(err.code(), Failcode::ArgumentIncorrect);
        assert_eq!(err.key().as_deref(), Some("[0]"));
        assert_eq!(err.message(), "Expected string, but was 1");
    }

    #[test]
    fn nested_argument_failures_keep_their_path() {
        let contract = Contract::new([object! { id: number() }], unknown());
        let err = contract
            .enforce(|_| Value::Undefined)
            .call(&[Value::object([("id", Value::from("x"))])])
            .unwrap_err();
        assert_eq!(err.key().as_deref(), Some("[0].id"));
    }

    #[test]
    fn incorrect_return() {
        let err = concat()
            .enforce(|_| Value::from(0))
            .call(&[Value::from("a"), Value::from("b")])
            .unwrap_err();
        assert_eq!(err.code(), Failcode::ReturnIncorrect);
        assert_eq!(err.message(), "Expected string, but was 0");
    }

    #[test]
    fn arguments_are_parsed_before_the_call() {
        let trimmed = string().with_parser(|v| {
            v.as_str().map(|s| s.trim().to_owned()).ok_or("not a string")
        });
        let f = Contract::new([trimmed], string()).enforce(|args| args[0].clone());
        assert_eq!(f.call(&[Value::from("  x ")]).unwrap().as_str(), Some("x"));
    }

    #[test]
    fn wraps_function_values() {
        let value = Value::function(join);
        let f = concat().enforce_value(&value).unwrap();
        assert!(f.call(&[Value::from("a"), Value::from("b")]).is_ok());

        let err = concat().enforce_value(&Value::Null).unwrap_err();
        assert_eq!(err.code(), Failcode::TypeIncorrect);
    }

    #[test]
    fn displays_as_signature() {
        assert_eq!(concat().to_string(), "(string, string) => string");
    }
}
