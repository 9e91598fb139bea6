use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::{Identity, Value};

/// Shared, interior-mutable list of values.
#[derive(Clone, Default)]
pub struct Array {
    inner: Arc<RwLock<Vec<Value>>>,
}

impl Array {
    /// Creates an empty array node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node owning the given items.
    #[must_use]
    pub fn from_vec(items: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns a handle to the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.read().get(index).cloned()
    }

    /// Appends an element. Visible through every handle to this node.
    pub fn push(&self, value: Value) {
        self.inner.write().push(value);
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&self, index: usize, value: Value) -> Option<Value> {
        let mut items = self.inner.write();
        items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Clones the current items (handles only) without holding the lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Value> {
        self.inner.read().clone()
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::of(Arc::as_ptr(&self.inner))
    }

    /// True if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// Contents are not printed: the node may be part of a cycle.
impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("identity", &self.identity())
            .field("len", &self.len())
            .finish()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
