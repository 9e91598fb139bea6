//! Macros for building runtypes with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`object!`] - object runtype from `field: runtype` pairs
//! - [`union!`] - union of runtypes
//! - [`intersect!`] - intersection of runtypes
//! - [`template!`] - template literal from text and runtype parts
//!
//! # Examples
//!
//! ```rust
//! use runtypes_validator::prelude::*;
//!
//! let event = union![
//!     object! { "type": literal("click"), x: number(), y: number() },
//!     object! { "type": literal("key"), code: template!("Key", string()).unwrap() },
//! ];
//!
//! let key = Value::object([("type", Value::from("key")), ("code", Value::from("KeyA"))]);
//! assert!(event.guard(&key));
//! ```

// ============================================================================
// OBJECT MACRO
// ============================================================================

/// Builds an object runtype. Field names are identifiers or string literals.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let user = object! {
///     id: number(),
///     "display name": string(),
///     email: string().optional(),
/// };
/// assert_eq!(user.show(), r#"{ id: number; "display name": string; email?: string; }"#);
/// ```
#[macro_export]
macro_rules! object {
    (@key $key:ident) => {
        stringify!($key)
    };
    (@key $key:literal) => {
        $key
    };
    ($($key:tt : $runtype:expr),* $(,)?) => {{
        let fields: ::std::vec::Vec<(&str, $crate::foundation::Runtype)> =
            ::std::vec![$(($crate::object!(@key $key), $runtype)),*];
        $crate::combinators::object(fields)
    }};
}

// ============================================================================
// ALGEBRA MACROS
// ============================================================================

/// Union of the given runtypes.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let id = union![number(), string()];
/// assert!(id.guard(&Value::from("a")));
/// ```
#[macro_export]
macro_rules! union {
    ($($runtype:expr),* $(,)?) => {
        $crate::combinators::union([$($runtype),*])
    };
}

/// Intersection of the given runtypes.
#[macro_export]
macro_rules! intersect {
    ($($runtype:expr),* $(,)?) => {
        $crate::combinators::intersect([$($runtype),*])
    };
}

// ============================================================================
// TEMPLATE MACRO
// ============================================================================

/// Template literal runtype. Parts are string literals or runtypes.
///
/// Returns `Result<Runtype, ConstructError>`.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let px = template!(number(), "px").unwrap();
/// assert!(px.guard(&Value::from("12px")));
/// assert!(!px.guard(&Value::from("12em")));
/// ```
#[macro_export]
macro_rules! template {
    ($($part:expr),+ $(,)?) => {
        $crate::combinators::template([$($crate::combinators::TemplatePart::from($part)),+])
    };
}
