//! The raw check trait implemented by every validator kind.

use runtypes_value::Value;

use crate::foundation::{Validation, Visited};

// ============================================================================
// CHECK TRAIT
// ============================================================================

/// The raw check of one validator kind.
///
/// Implementations inspect `value` and report conformance. They never call
/// each other's `check` directly: children are validated through
/// [`inner_validate`](crate::foundation::inner_validate), which consults the
/// visited state before invoking the child's raw check.
///
/// `check` must not mutate `value`. On success it returns either `value`
/// itself (same identity) or, when a parse transform ran somewhere below, a
/// freshly built value.
pub trait Check: Send + Sync {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation;
}
