//! Conversions between `Value`, Rust primitives and `serde_json::Value`.

use std::sync::Arc;

use serde_json::{Map, Number};

use crate::collections::{Array, Object};
use crate::error::{ValueError, ValueResult};
use crate::function::Function;
use crate::instance::Instance;
use crate::value::{Identity, Value};

// ============================================================================
// FROM RUST TYPES
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Self::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(Array::from_vec(items))
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self {
        Self::Instance(i)
    }
}

// ============================================================================
// JSON INTEROP
// ============================================================================

/// Builds a fresh value graph from parsed JSON.
///
/// Integers outside the `f64` safe range lose precision, as they would in a
/// JavaScript consumer.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::from(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Self::from(json.clone())
    }
}

impl Value {
    /// Converts to JSON with `JSON.stringify` rules: `undefined` properties
    /// are dropped and `undefined` array slots become `null`.
    ///
    /// # Errors
    ///
    /// - [`ValueError::Cycle`] if the graph contains a back-reference
    /// - [`ValueError::NonFiniteNumber`] for `NaN`/`Infinity`
    /// - [`ValueError::Unrepresentable`] for bigints, functions, instances and a
    ///   top-level `undefined`
    pub fn to_json(&self) -> ValueResult<serde_json::Value> {
        let mut stack = Vec::new();
        to_json_inner(self, &mut stack)
    }
}

fn to_json_inner(value: &Value, stack: &mut Vec<Identity>) -> ValueResult<serde_json::Value> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => number_to_json(*n).map(serde_json::Value::Number),
        Value::String(s) => Ok(serde_json::Value::String(s.to_string())),
        Value::Array(a) => {
            let id = a.identity();
            if stack.contains(&id) {
                return Err(ValueError::Cycle);
            }
            stack.push(id);
            let items = a
                .snapshot()
                .iter()
                .map(|item| match item {
                    Value::Undefined => Ok(serde_json::Value::Null),
                    other => to_json_inner(other, stack),
                })
                .collect::<ValueResult<Vec<_>>>();
            stack.pop();
            items.map(serde_json::Value::Array)
        }
        Value::Object(o) => {
            let id = o.identity();
            if stack.contains(&id) {
                return Err(ValueError::Cycle);
            }
            stack.push(id);
            let mut map = Map::new();
            let mut result = Ok(());
            for (key, item) in o.snapshot() {
                if item.is_undefined() {
                    continue;
                }
                match to_json_inner(&item, stack) {
                    Ok(json) => {
                        map.insert(key, json);
                    }
                    Err(e) => {
                        result = Err(e);
                        break;
                    }
                }
            }
            stack.pop();
            result.map(|()| serde_json::Value::Object(map))
        }
        other => Err(ValueError::Unrepresentable {
            kind: other.kind(),
        }),
    }
}

fn number_to_json(n: f64) -> ValueResult<Number> {
    const SAFE: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() < SAFE {
        return Ok(Number::from(n as i64));
    }
    Number::from_f64(n).ok_or(ValueError::NonFiniteNumber)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_round_trip() {
        let source = json!({"kind": "circle", "radius": 2.5, "tags": ["a", null], "n": 3});
        let value = Value::from(source.clone());
        assert_eq!(value.to_json().ok(), Some(source));
    }

    #[test]
    fn undefined_follows_stringify_rules() {
        let value = Value::object([
            ("gone", Value::Undefined),
            ("list", Value::array([Value::Undefined])),
        ]);
        assert_eq!(value.to_json().ok(), Some(json!({"list": [null]})));
        assert!(matches!(
            Value::Undefined.to_json(),
            Err(ValueError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn cycles_are_rejected() {
        let a = Array::new();
        a.push(Value::Array(a.clone()));
        assert!(matches!(Value::Array(a).to_json(), Err(ValueError::Cycle)));
    }

    #[test]
    fn shared_but_acyclic_nodes_serialize() {
        let shared = Value::array([Value::from(1)]);
        let outer = Value::array([shared.clone(), shared]);
        assert_eq!(outer.to_json().ok(), Some(json!([[1], [1]])));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(matches!(
            Value::number(f64::NAN).to_json(),
            Err(ValueError::NonFiniteNumber)
        ));
    }
}
