//! Shared collection nodes.
//!
//! Both collections are `Arc<RwLock<..>>` handles: cloning shares the node,
//! mutation through any handle is visible through all of them. Readers that
//! recurse into children should take a [`snapshot`](Array::snapshot) rather
//! than hold the lock across the recursion.

mod array;
mod object;

pub use array::Array;
pub use object::Object;
