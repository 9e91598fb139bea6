//! Callable values.

use std::fmt;
use std::sync::Arc;

use crate::value::{Identity, Value};

type Callable = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Shared callable taking positional arguments.
#[derive(Clone)]
pub struct Function {
    inner: Arc<Callable>,
    name: Option<Arc<str>>,
}

impl Function {
    /// Wraps an anonymous closure.
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(f),
            name: None,
        }
    }

    /// Wraps a closure under a display name.
    pub fn named(
        name: impl AsRef<str>,
        f: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(f),
            name: Some(Arc::from(name.as_ref())),
        }
    }

    /// Invokes the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.inner)(args)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::of(Arc::as_ptr(&self.inner))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("identity", &self.identity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_forwards_arguments() {
        let len = Function::named("len", |args| Value::from(args.len()));
        assert_eq!(len.call(&[Value::Null, Value::Null]).as_f64(), Some(2.0));
        assert_eq!(len.name(), Some("len"));
    }

    #[test]
    fn clones_share_identity() {
        let f = Function::new(|_| Value::Undefined);
        assert_eq!(f.identity(), f.clone().identity());
    }
}
