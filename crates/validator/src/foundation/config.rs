//! Configuration for a single validation call.

use serde::{Deserialize, Serialize};

/// Default container nesting limit for [`ValidateOptions`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options accepted by `validate_with` / `check_with`.
///
/// # Examples
///
/// ```rust
/// use runtypes_validator::foundation::ValidateOptions;
///
/// let options: ValidateOptions = serde_json::from_str(r#"{"max_depth": 16}"#).unwrap();
/// assert_eq!(options, ValidateOptions::strict(16));
/// assert_eq!(ValidateOptions::default().max_depth, Some(512));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Maximum number of arrays and objects validated inside one another.
    /// Wrappers such as unions, brands and lazies do not count. `None`
    /// disables the limit.
    pub max_depth: Option<usize>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// No depth limit. Deeply nested (acyclic) input can exhaust the stack.
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    /// A tight limit for input from untrusted sources.
    pub fn strict(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(ValidateOptions::new().max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(ValidateOptions::unbounded().max_depth, None);
        assert_eq!(ValidateOptions::unbounded().with_max_depth(3), ValidateOptions::strict(3));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let options: ValidateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ValidateOptions::default());

        let unbounded: ValidateOptions = serde_json::from_str(r#"{"max_depth": null}"#).unwrap();
        assert_eq!(unbounded, ValidateOptions::unbounded());
    }
}
