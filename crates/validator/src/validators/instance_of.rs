//! Host-type validators

use std::any::{Any, TypeId, type_name};

use runtypes_value::Value;

use crate::foundation::{Check, Failure, Reflect, Runtype, Validation, Visited};

/// Accepts [`Instance`](runtypes_value::Instance) values wrapping a particular Rust type.
#[derive(Debug, Clone, Copy)]
pub struct InstanceOf {
    type_id: TypeId,
    type_name: &'static str,
}

impl InstanceOf {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Last path segment of the type name, used in messages.
    pub fn short_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }
}

impl Check for InstanceOf {
    fn check(&self, value: &Value, _visited: &mut Visited) -> Validation {
        match value.as_instance() {
            Some(instance) if instance.type_id() == self.type_id => Ok(value.clone()),
            Some(instance) => Err(Failure::new(
                crate::foundation::Failcode::TypeIncorrect,
                format!(
                    "Expected InstanceOf<{}>, but was InstanceOf<{}>",
                    self.short_name(),
                    instance.type_name()
                ),
            )),
            None => Err(Failure::type_incorrect(
                format_args!("InstanceOf<{}>", self.short_name()),
                value,
            )),
        }
    }
}

/// Accepts instances of `T`.
pub fn instance_of<T: Any>() -> Runtype {
    Runtype::new(Reflect::InstanceOf(InstanceOf {
        type_id: TypeId::of::<T>(),
        type_name: type_name::<T>(),
    }))
}
