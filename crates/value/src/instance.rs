//! Opaque host objects.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use crate::value::Identity;

/// Shared opaque host object, checked by runtime type rather than by shape.
#[derive(Clone)]
pub struct Instance {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// True if the wrapped object is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// `TypeId` of the wrapped object (not of the handle).
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        Any::type_id(&*self.inner)
    }

    /// Fully qualified Rust type name of the wrapped object.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::of(Arc::as_ptr(&self.inner))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("identity", &self.identity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i32,
    }

    #[test]
    fn downcast_matches_wrapped_type() {
        let i = Instance::new(Point { x: 3 });
        assert!(i.is::<Point>());
        assert!(!i.is::<String>());
        assert_eq!(i.downcast_ref::<Point>().map(|p| p.x), Some(3));
        assert!(i.type_name().ends_with("Point"));
        assert_eq!(i.type_id(), TypeId::of::<Point>());
    }
}
