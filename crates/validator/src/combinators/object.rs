//! OBJECT combinator - declared properties, optionally exact

use std::collections::HashSet;

use indexmap::IndexMap;
use runtypes_value::{Object, Primitive, Value};

use crate::combinators::aggregate::Aggregate;
use crate::foundation::{
    Check, ConstructError, Failcode, Failure, PathSegment, Reflect, Runtype, Validation, Visited,
    inner_validate,
};
use crate::show;

// ============================================================================
// OBJECT SHAPE
// ============================================================================

/// Declared properties of an object, in declaration order.
///
/// A property whose runtype is [`optional`](crate::combinators::optional) may
/// be absent. Undeclared properties pass through unless the shape is exact.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    fields: IndexMap<String, Runtype>,
    exact: bool,
}

impl ObjectShape {
    pub fn fields(&self) -> &IndexMap<String, Runtype> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Runtype> {
        self.fields.get(name)
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    fn into_runtype(self) -> Runtype {
        Runtype::new(Reflect::Object(self))
    }
}

/// An optional field, possibly behind brand and lazy layers.
fn is_optional(field: &Runtype) -> bool {
    let mut current = field.clone();
    let mut seen = HashSet::new();
    while seen.insert(current.id()) {
        let next = match current.reflect() {
            Reflect::Optional(_) => return true,
            Reflect::Brand(brand) => brand.entity().clone(),
            Reflect::Lazy(lazy) => lazy.resolve(),
            _ => return false,
        };
        current = next;
    }
    false
}

impl Check for ObjectShape {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let Some(object) = value.as_object() else {
            return Err(Failure::type_incorrect(show::describe(self), value));
        };

        let entries: IndexMap<String, Value> = object.snapshot().into_iter().collect();
        let mut aggregate = Aggregate::with_capacity(entries.len());

        for (name, field) in &self.fields {
            let segment = PathSegment::Field(name.clone());
            match entries.get(name) {
                Some(item) => {
                    let result = inner_validate(field, item, visited);
                    aggregate.record(segment, item, result);
                }
                None if is_optional(field) => {}
                None => aggregate.fail(
                    segment,
                    Failure::new(
                        Failcode::PropertyMissing,
                        format!(
                            "Expected property {} to be present, but was missing",
                            Primitive::from(name.as_str())
                        ),
                    ),
                ),
            }
        }

        for (name, item) in &entries {
            if self.fields.contains_key(name) {
                continue;
            }
            let segment = PathSegment::Field(name.clone());
            if self.exact {
                aggregate.fail(
                    segment,
                    Failure::new(
                        Failcode::PropertyPresent,
                        format!(
                            "Expected property {} not to be present, but was present",
                            Primitive::from(name.as_str())
                        ),
                    ),
                );
            } else {
                aggregate.pass(segment, item);
            }
        }

        aggregate.finish(
            value,
            |n| format!("Expected {}, but {n} properties were incorrect", show::describe(self)),
            rebuild_object,
        )
    }
}

pub(crate) fn rebuild_object(outputs: Vec<(PathSegment, Value)>) -> Value {
    let rebuilt = Object::new();
    for (segment, item) in outputs {
        if let PathSegment::Field(name) = segment {
            rebuilt.insert(name, item);
        }
    }
    Value::Object(rebuilt)
}

/// Accepts objects carrying the declared properties.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let user = object([("name", string()), ("age", number().optional())]);
/// assert!(user.guard(&Value::object([("name", Value::from("ada"))])));
/// ```
pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Runtype)>) -> Runtype {
    ObjectShape {
        fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        exact: false,
    }
    .into_runtype()
}

// ============================================================================
// SHAPE OPERATIONS
// ============================================================================

impl Runtype {
    /// The object shape, if this is an object runtype.
    pub fn as_object(&self) -> Option<&ObjectShape> {
        match self.reflect() {
            Reflect::Object(shape) => Some(shape),
            _ => None,
        }
    }

    fn object_shape(&self) -> Result<&ObjectShape, ConstructError> {
        self.as_object().ok_or_else(|| ConstructError::NotAnObject {
            found: self.reflect().tag().to_string(),
        })
    }

    /// The same object shape, rejecting undeclared properties with `PROPERTY_PRESENT`.
    pub fn exact(&self) -> Result<Runtype, ConstructError> {
        let mut shape = self.object_shape()?.clone();
        shape.exact = true;
        Ok(shape.into_runtype())
    }

    /// `true` for exact object runtypes.
    pub fn is_exact(&self) -> bool {
        self.as_object().is_some_and(ObjectShape::is_exact)
    }

    /// Keeps only the named properties.
    pub fn pick<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<Runtype, ConstructError> {
        let shape = self.object_shape()?;
        let mut fields = IndexMap::new();
        for name in names {
            let field = shape.fields.get(name).ok_or_else(|| ConstructError::UnknownField {
                name: name.to_owned(),
            })?;
            fields.insert(name.to_owned(), field.clone());
        }
        Ok(ObjectShape {
            fields,
            exact: shape.exact,
        }
        .into_runtype())
    }

    /// Drops the named properties.
    pub fn omit<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<Runtype, ConstructError> {
        let mut shape = self.object_shape()?.clone();
        for name in names {
            if shape.fields.shift_remove(name).is_none() {
                return Err(ConstructError::UnknownField {
                    name: name.to_owned(),
                });
            }
        }
        Ok(shape.into_runtype())
    }

    /// Adds properties; a redeclared property replaces the original in place.
    pub fn extend<K: Into<String>>(
        &self,
        fields: impl IntoIterator<Item = (K, Runtype)>,
    ) -> Result<Runtype, ConstructError> {
        let mut shape = self.object_shape()?.clone();
        for (name, field) in fields {
            shape.fields.insert(name.into(), field);
        }
        Ok(shape.into_runtype())
    }

    /// Makes every property optional.
    pub fn partial(&self) -> Result<Runtype, ConstructError> {
        let mut shape = self.object_shape()?.clone();
        for field in shape.fields.values_mut() {
            if !is_optional(field) {
                *field = field.clone().optional();
            }
        }
        Ok(shape.into_runtype())
    }
}

// ============================================================================
// TESTS
// ============================================================================
