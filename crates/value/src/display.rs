//! Display implementation for `Value`.
//!
//! Renders a compact JSON-like form. Back-references to a node that is still
//! being printed appear as `[Circular]`, so cyclic graphs print finitely.

use std::fmt;

use crate::number;
use crate::primitive::Primitive;
use crate::value::{Identity, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        write_value(f, self, &mut stack)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, stack: &mut Vec<Identity>) -> fmt::Result {
    if let Some(id) = value.identity() {
        if stack.contains(&id) {
            return f.write_str("[Circular]");
        }
    }
    match value {
        Value::Number(n) => f.write_str(&number::format(*n)),
        Value::Array(a) => {
            stack.push(a.identity());
            f.write_str("[")?;
            for (i, item) in a.snapshot().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, stack)?;
            }
            stack.pop();
            f.write_str("]")
        }
        Value::Object(o) => {
            stack.push(o.identity());
            f.write_str("{")?;
            for (i, (key, item)) in o.snapshot().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: ", Primitive::from(key.as_str()))?;
                write_value(f, item, stack)?;
            }
            stack.pop();
            f.write_str("}")
        }
        Value::Function(func) => match func.name() {
            Some(name) => write!(f, "[Function {name}]"),
            None => f.write_str("[Function]"),
        },
        Value::Instance(i) => write!(f, "[Instance {}]", i.type_name()),
        primitive => match primitive.as_primitive() {
            Some(p) => write!(f, "{p}"),
            None => Ok(()),
        },
    }
}
