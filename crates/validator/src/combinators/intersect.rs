//! INTERSECT combinator - all members must accept the same value

use runtypes_value::Value;

use crate::foundation::{
    Check, Failcode, Failure, Reflect, Runtype, Validation, Visited, inner_validate,
};
use crate::show;

/// Members validated in declaration order against the same input.
#[derive(Debug, Clone)]
pub struct Intersect {
    members: Vec<Runtype>,
}

impl Intersect {
    pub fn members(&self) -> &[Runtype] {
        &self.members
    }
}

impl Check for Intersect {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let mut result = value.clone();
        for member in &self.members {
            let validated = inner_validate(member, value, visited)?;
            if validated.same_value(value) {
                continue;
            }
            if validated.kind() != value.kind() {
                tracing::error!(
                    member = %member,
                    input = %value.kind(),
                    output = %validated.kind(),
                    "intersect member changed the value kind"
                );
                return Err(Failure::new(
                    Failcode::ParsingFailed,
                    format!(
                        "Expected {} to preserve the {} kind of its input, but a member produced {}",
                        show::describe(self),
                        value.kind(),
                        validated.kind()
                    ),
                ));
            }
            result = validated;
        }
        Ok(result)
    }
}

/// Accepts values satisfying every member.
///
/// The first failing member's failure is returned as-is.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let named = object! { name: string() };
/// let aged = object! { age: number() };
/// let person = intersect([named, aged]);
///
/// let value = Value::object([("name", Value::from("ada")), ("age", Value::from(36))]);
/// assert!(person.guard(&value));
/// ```
pub fn intersect(members: impl IntoIterator<Item = Runtype>) -> Runtype {
    Runtype::new(Reflect::Intersect(Intersect {
        members: members.into_iter().collect(),
    }))
}
