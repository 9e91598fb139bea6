//! TEMPLATE combinator - strings shaped like a template literal type
//!
//! A template such as `` `v${number}` `` is normalized at construction
//! (literal children become text, trivial wrappers are inlined) and compiled
//! to one anchored regex on first use. Each captured substring is then
//! revived into the value its child expects and validated by that child.

mod pattern;

use std::sync::OnceLock;

use regex::Regex;
use runtypes_value::Value;

use crate::foundation::{
    Check, ConstructError, Failcode, Failure, Reflect, Runtype, Validation, Visited,
};
use crate::show;

// ============================================================================
// PARTS
// ============================================================================

/// One piece of a template: fixed text or an interpolated runtype.
#[derive(Debug, Clone)]
pub enum TemplatePart {
    Literal(String),
    Runtype(Runtype),
}

impl From<&str> for TemplatePart {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_owned())
    }
}

impl From<String> for TemplatePart {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<Runtype> for TemplatePart {
    fn from(rt: Runtype) -> Self {
        Self::Runtype(rt)
    }
}

impl From<&Runtype> for TemplatePart {
    fn from(rt: &Runtype) -> Self {
        Self::Runtype(rt.clone())
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

/// Normalized parts plus the compiled pattern.
#[derive(Debug)]
pub struct Template {
    parts: Vec<TemplatePart>,
    compiled: OnceLock<Result<Regex, regex::Error>>,
}

impl Template {
    /// Parts after normalization: text is folded, literal children are
    /// inlined as text.
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// The interpolated runtypes, in order.
    pub fn children(&self) -> impl Iterator<Item = &Runtype> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Runtype(rt) => Some(rt),
            TemplatePart::Literal(_) => None,
        })
    }

    /// Source of the compiled regex, compiling it if needed.
    pub fn pattern(&self) -> Option<&str> {
        self.regex().ok().map(Regex::as_str)
    }

    fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled
            .get_or_init(|| {
                let source = pattern::anchored(&self.parts);
                tracing::debug!(pattern = %source, "compiling template pattern");
                Regex::new(&source)
            })
            .as_ref()
    }
}

impl Check for Template {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        let Some(text) = value.as_str() else {
            return Err(Failure::type_incorrect(show::describe(self), value));
        };
        let regex = self.regex().map_err(|e| {
            tracing::error!(error = %e, "template pattern failed to compile");
            Failure::new(
                Failcode::ValueIncorrect,
                format!("Failed to compile the pattern for {}: {e}", show::describe(self)),
            )
        })?;
        let Some(captures) = regex.captures(text) else {
            return Err(Failure::value_incorrect(show::describe(self), value));
        };

        for (child, capture) in self.children().zip(captures.iter().skip(1)) {
            let captured = capture.map_or("", |m| m.as_str());
            match pattern::accept(child, captured, visited, &mut Vec::new()) {
                Ok(_) => {}
                Err(failure) if failure.code == Failcode::DepthExceeded => return Err(failure),
                Err(_) => return Err(Failure::value_incorrect(show::describe(self), value)),
            }
        }
        Ok(value.clone())
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Builds a template runtype from text and runtype parts.
///
/// Children without a string form (arrays, objects, functions, ...) are
/// rejected.
///
/// ```rust
/// use runtypes_validator::prelude::*;
///
/// let version = template(["v".into(), TemplatePart::from(number())]).unwrap();
/// assert!(version.guard(&Value::from("v42")));
/// assert!(!version.guard(&Value::from("v4a2")));
/// assert_eq!(version.show(), "`v${number}`");
///
/// assert!(template([TemplatePart::from(array(string()))]).is_err());
/// ```
pub fn template<I, P>(parts: I) -> Result<Runtype, ConstructError>
where
    I: IntoIterator<Item = P>,
    P: Into<TemplatePart>,
{
    let mut normalized = Vec::new();
    for part in parts {
        push_part(&mut normalized, &part.into())?;
    }
    Ok(Runtype::new(Reflect::Template(Template {
        parts: normalized,
        compiled: OnceLock::new(),
    })))
}

fn push_part(out: &mut Vec<TemplatePart>, part: &TemplatePart) -> Result<(), ConstructError> {
    match part {
        TemplatePart::Literal(text) => push_text(out, text),
        TemplatePart::Runtype(rt) => push_runtype(out, rt)?,
    }
    Ok(())
}

fn push_text(out: &mut Vec<TemplatePart>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(TemplatePart::Literal(last)) => last.push_str(text),
        _ => out.push(TemplatePart::Literal(text.to_owned())),
    }
}

fn push_runtype(out: &mut Vec<TemplatePart>, rt: &Runtype) -> Result<(), ConstructError> {
    match rt.reflect() {
        Reflect::Literal(literal) => push_text(out, &literal.value().to_text()),
        Reflect::Union(union) if union.alternatives().len() == 1 => {
            push_runtype(out, &union.alternatives()[0])?;
        }
        Reflect::Intersect(intersect) if intersect.members().len() == 1 => {
            push_runtype(out, &intersect.members()[0])?;
        }
        Reflect::Brand(brand) => push_runtype(out, brand.entity())?,
        Reflect::Template(template) => {
            for part in template.parts() {
                push_part(out, part)?;
            }
        }
        _ => {
            ensure_string_form(rt)?;
            out.push(TemplatePart::Runtype(rt.clone()));
        }
    }
    Ok(())
}

/// Rejects children that never produce a string form. Lazy children are
/// not resolved here; they may still be under construction.
fn ensure_string_form(rt: &Runtype) -> Result<(), ConstructError> {
    let representable = match rt.reflect() {
        Reflect::Never
        | Reflect::Function
        | Reflect::InstanceOf(_)
        | Reflect::Array(_)
        | Reflect::Tuple(_)
        | Reflect::Object(_)
        | Reflect::Record(_) => false,
        Reflect::Union(union) => {
            for alt in union.alternatives() {
                ensure_string_form(alt)?;
            }
            !union.alternatives().is_empty()
        }
        Reflect::Intersect(intersect) => {
            for member in intersect.members() {
                ensure_string_form(member)?;
            }
            true
        }
        Reflect::Optional(optional) => return ensure_string_form(optional.underlying()),
        Reflect::Constraint(constraint) => return ensure_string_form(constraint.underlying()),
        Reflect::Brand(brand) => return ensure_string_form(brand.entity()),
        Reflect::Parser(parser) => return ensure_string_form(parser.underlying()),
        Reflect::Unknown
        | Reflect::Boolean
        | Reflect::Number
        | Reflect::String
        | Reflect::BigInt
        | Reflect::Literal(_)
        | Reflect::Template(_)
        | Reflect::Lazy(_) => true,
    };
    if representable {
        Ok(())
    } else {
        Err(ConstructError::InvalidTemplatePart { found: rt.show() })
    }
}

// ============================================================================
// TESTS
// ============================================================================
