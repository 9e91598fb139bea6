//! BRAND combinator - nominal tag with no runtime effect

use runtypes_value::Value;

use crate::foundation::{Check, Reflect, Runtype, Validation, Visited, inner_validate};

/// A named wrapper that validates exactly like its entity.
#[derive(Debug, Clone)]
pub struct Brand {
    brand: String,
    entity: Runtype,
}

impl Brand {
    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn entity(&self) -> &Runtype {
        &self.entity
    }
}

impl Check for Brand {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        inner_validate(&self.entity, value, visited)
    }
}

/// Tags `entity` with `brand`.
pub fn brand(brand: impl Into<String>, entity: Runtype) -> Runtype {
    Runtype::new(Reflect::Brand(Brand {
        brand: brand.into(),
        entity,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn validates_like_the_entity() {
        let user_id = brand("UserId", string());
        assert!(user_id.guard(&Value::from("u-1")));

        let failure = user_id.validate(&Value::from(1)).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.message, "Expected string, but was 1");
    }

    #[test]
    fn is_reflected() {
        let rt = number().with_brand("Meters");
        assert_eq!(rt.tag(), Tag::Brand);
        let Reflect::Brand(b) = rt.reflect() else {
            panic!("expected a brand");
        };
        assert_eq!(b.brand(), "Meters");
        assert_eq!(b.entity().tag(), Tag::Number);
    }
}
