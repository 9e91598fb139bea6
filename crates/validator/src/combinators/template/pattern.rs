//! Regex fragments for template children and revival of captured text.

use runtypes_value::{Value, number};

use crate::combinators::TemplatePart;
use crate::foundation::{Failcode, Failure, Reflect, Runtype, RuntypeId, Validation, Visited, inner_validate};
use crate::show;

pub(super) const ANY: &str = ".*";
const NUMBER: &str = r"[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|0[bB][01]+|0[oO][0-7]+|0[xX][0-9a-fA-F]+|Infinity)";
const BIGINT: &str = r"-?(?:0|[1-9]\d*)";
const BOOLEAN: &str = "true|false";

// ============================================================================
// PATTERNS
// ============================================================================

/// The anchored source for a whole template: one capturing group per child.
pub(super) fn anchored(parts: &[TemplatePart]) -> String {
    let mut path = Vec::new();
    let mut source = String::from("(?s)^");
    for part in parts {
        match part {
            TemplatePart::Literal(text) => source.push_str(&regex::escape(text)),
            TemplatePart::Runtype(rt) => {
                source.push('(');
                source.push_str(&child(rt, &mut path));
                source.push(')');
            }
        }
    }
    source.push('$');
    source
}

/// Non-capturing source for a template nested in another template.
fn inner(parts: &[TemplatePart], path: &mut Vec<RuntypeId>) -> String {
    parts
        .iter()
        .map(|part| match part {
            TemplatePart::Literal(text) => regex::escape(text),
            TemplatePart::Runtype(rt) => format!("(?:{})", child(rt, path)),
        })
        .collect()
}

/// Pattern for one child. Contains no capturing groups.
fn child(rt: &Runtype, path: &mut Vec<RuntypeId>) -> String {
    if path.contains(&rt.id()) {
        return ANY.to_owned();
    }
    path.push(rt.id());
    let pattern = match rt.reflect() {
        Reflect::String | Reflect::Unknown => ANY.to_owned(),
        Reflect::Number => NUMBER.to_owned(),
        Reflect::BigInt => BIGINT.to_owned(),
        Reflect::Boolean => BOOLEAN.to_owned(),
        Reflect::Literal(literal) => regex::escape(&literal.value().to_text()),
        Reflect::Union(union) => union
            .alternatives()
            .iter()
            .map(|alt| format!("(?:{})", child(alt, path)))
            .collect::<Vec<_>>()
            .join("|"),
        Reflect::Intersect(intersect) => intersect
            .members()
            .iter()
            .map(|member| child(member, path))
            .find(|pattern| pattern != ANY)
            .unwrap_or_else(|| ANY.to_owned()),
        Reflect::Optional(optional) => format!("undefined|(?:{})", child(optional.underlying(), path)),
        Reflect::Constraint(constraint) => child(constraint.underlying(), path),
        Reflect::Brand(brand) => child(brand.entity(), path),
        Reflect::Parser(parser) => child(parser.underlying(), path),
        Reflect::Template(template) => inner(template.parts(), path),
        Reflect::Lazy(lazy) => child(&lazy.resolve(), path),
        Reflect::Never
        | Reflect::Function
        | Reflect::InstanceOf(_)
        | Reflect::Array(_)
        | Reflect::Tuple(_)
        | Reflect::Object(_)
        | Reflect::Record(_) => ANY.to_owned(),
    };
    path.pop();
    pattern
}

// ============================================================================
// REVIVAL
// ============================================================================

/// Reads captured text as the value `rt` would have interpolated, if any.
fn revive(rt: &Runtype, text: &str, path: &mut Vec<RuntypeId>) -> Option<Value> {
    if path.contains(&rt.id()) {
        return None;
    }
    path.push(rt.id());
    let revived = match rt.reflect() {
        Reflect::String | Reflect::Unknown | Reflect::Template(_) => Some(Value::string(text)),
        Reflect::Number => number::parse_js(text).map(Value::from),
        Reflect::BigInt => text.parse::<i128>().ok().map(Value::bigint),
        Reflect::Boolean => match text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Reflect::Literal(literal) => (literal.value().to_text() == text).then(|| literal.value().to_value()),
        Reflect::Union(union) => union.alternatives().iter().find_map(|alt| revive(alt, text, path)),
        Reflect::Intersect(intersect) => intersect
            .members()
            .iter()
            .find_map(|member| revive(member, text, path)),
        Reflect::Optional(_) if text == "undefined" => Some(Value::Undefined),
        Reflect::Optional(optional) => revive(optional.underlying(), text, path),
        Reflect::Constraint(constraint) => revive(constraint.underlying(), text, path),
        Reflect::Brand(brand) => revive(brand.entity(), text, path),
        Reflect::Parser(parser) => revive(parser.underlying(), text, path),
        Reflect::Lazy(lazy) => revive(&lazy.resolve(), text, path),
        Reflect::Never
        | Reflect::Function
        | Reflect::InstanceOf(_)
        | Reflect::Array(_)
        | Reflect::Tuple(_)
        | Reflect::Object(_)
        | Reflect::Record(_) => None,
    };
    path.pop();
    revived
}

/// Validates a captured substring against the child that captured it.
///
/// Unions try each alternative in order, intersections require every member
/// to accept the same text, and everything else revives the text and
/// validates the revived value.
pub(super) fn accept(rt: &Runtype, text: &str, visited: &mut Visited, path: &mut Vec<RuntypeId>) -> Validation {
    match rt.reflect() {
        Reflect::Union(union) => {
            let mut last = None;
            for alt in union.alternatives() {
                match accept(alt, text, visited, path) {
                    Ok(value) => return Ok(value),
                    Err(failure) if failure.code == Failcode::DepthExceeded => return Err(failure),
                    Err(failure) => last = Some(failure),
                }
            }
            Err(last.unwrap_or_else(|| Failure::value_incorrect(show::runtype(rt), &Value::string(text))))
        }
        Reflect::Intersect(intersect) => {
            let mut accepted = Value::string(text);
            for member in intersect.members() {
                accepted = accept(member, text, visited, path)?;
            }
            Ok(accepted)
        }
        Reflect::Optional(_) if text == "undefined" => Ok(Value::Undefined),
        Reflect::Optional(optional) => accept(optional.underlying(), text, visited, path),
        Reflect::Lazy(lazy) if !path.contains(&rt.id()) => {
            path.push(rt.id());
            let accepted = accept(&lazy.resolve(), text, visited, path);
            path.pop();
            accepted
        }
        _ => {
            let value = revive(rt, text, &mut Vec::new()).unwrap_or_else(|| Value::string(text));
            inner_validate(rt, &value, visited)
        }
    }
}
