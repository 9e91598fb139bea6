//! Type-like rendering of runtypes for failure messages and `Display`.
//!
//! ```text
//! { kind: "circle"; radius: number; }
//! (string | number)[]
//! [number, ...string[]]
//! `v${number}`
//! ```
//!
//! Self-referencing runtypes (through `lazy`) render the back-reference as
//! `CIRCULAR`.

use crate::combinators::{
    ArrayOf, Brand, Constraint, Intersect, Lazy, ObjectShape, Optional, Parser, Record, Template,
    TemplatePart, Tuple, Union,
};
use crate::foundation::{Reflect, Runtype, RuntypeId};
use crate::validators::{InstanceOf, Literal};

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub(crate) fn runtype(rt: &Runtype) -> String {
    Printer::default().runtype(rt, Position::Top)
}

/// Renders a payload on its own, for messages produced inside its check.
pub(crate) fn describe(payload: &impl Describe) -> String {
    payload.describe(&mut Printer::default())
}

// ============================================================================
// PRINTER
// ============================================================================

/// Where a runtype is rendered, to decide on parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Top,
    /// Element of `T[]`.
    ArrayElement,
    /// Member of `A & B`.
    IntersectMember,
}

#[derive(Default)]
pub(crate) struct Printer {
    stack: Vec<RuntypeId>,
}

impl Printer {
    pub(crate) fn runtype(&mut self, rt: &Runtype, position: Position) -> String {
        if self.stack.contains(&rt.id()) {
            return "CIRCULAR".to_owned();
        }
        self.stack.push(rt.id());
        let text = self.reflect(rt.reflect(), position);
        self.stack.pop();
        text
    }

    fn reflect(&mut self, reflect: &Reflect, position: Position) -> String {
        let text = match reflect {
            Reflect::Unknown => "unknown".to_owned(),
            Reflect::Never => "never".to_owned(),
            Reflect::Boolean => "boolean".to_owned(),
            Reflect::Number => "number".to_owned(),
            Reflect::String => "string".to_owned(),
            Reflect::BigInt => "bigint".to_owned(),
            Reflect::Function => "function".to_owned(),
            Reflect::Literal(r) => r.describe(self),
            Reflect::InstanceOf(r) => r.describe(self),
            Reflect::Array(r) => r.describe(self),
            Reflect::Tuple(r) => r.describe(self),
            Reflect::Object(r) => r.describe(self),
            Reflect::Record(r) => r.describe(self),
            Reflect::Union(r) => r.describe(self),
            Reflect::Intersect(r) => r.describe(self),
            Reflect::Optional(r) => r.describe(self),
            Reflect::Constraint(r) => r.describe(self),
            Reflect::Brand(r) => r.describe(self),
            Reflect::Template(r) => r.describe(self),
            Reflect::Lazy(r) => return self.runtype(&r.resolve(), position),
            Reflect::Parser(r) => return self.runtype(r.underlying(), position),
        };
        let compound = match reflect {
            Reflect::Union(u) => u.alternatives().len() > 1,
            Reflect::Intersect(i) => i.members().len() > 1,
            Reflect::Optional(_) => true,
            _ => false,
        };
        let needs_parens = compound
            && match position {
                Position::Top => false,
                Position::ArrayElement => true,
                Position::IntersectMember => !matches!(reflect, Reflect::Intersect(_)),
            };
        if needs_parens { format!("({text})") } else { text }
    }
}

// ============================================================================
// PER-KIND RENDERING
// ============================================================================

pub(crate) trait Describe {
    fn describe(&self, printer: &mut Printer) -> String;
}

impl Describe for Literal {
    fn describe(&self, _printer: &mut Printer) -> String {
        self.value().to_string()
    }
}

impl Describe for InstanceOf {
    fn describe(&self, _printer: &mut Printer) -> String {
        format!("InstanceOf<{}>", self.short_name())
    }
}

impl Describe for ArrayOf {
    fn describe(&self, printer: &mut Printer) -> String {
        format!("{}[]", printer.runtype(self.element(), Position::ArrayElement))
    }
}

impl Describe for Tuple {
    fn describe(&self, printer: &mut Printer) -> String {
        let mut items: Vec<String> = self
            .leading()
            .iter()
            .map(|c| printer.runtype(c, Position::Top))
            .collect();
        if let Some(rest) = self.rest() {
            items.push(format!("...{}[]", printer.runtype(rest, Position::ArrayElement)));
        }
        items.extend(self.trailing().iter().map(|c| printer.runtype(c, Position::Top)));
        format!("[{}]", items.join(", "))
    }
}

impl Describe for ObjectShape {
    fn describe(&self, printer: &mut Printer) -> String {
        if self.fields().is_empty() {
            return "{}".to_owned();
        }
        let mut out = String::from("{ ");
        for (name, field) in self.fields() {
            let key = property_key(name);
            match field.reflect() {
                Reflect::Optional(optional) => {
                    let shown = printer.runtype(optional.underlying(), Position::Top);
                    out.push_str(&format!("{key}?: {shown}; "));
                }
                _ => {
                    let shown = printer.runtype(field, Position::Top);
                    out.push_str(&format!("{key}: {shown}; "));
                }
            }
        }
        out.push('}');
        out
    }
}

impl Describe for Record {
    fn describe(&self, printer: &mut Printer) -> String {
        format!(
            "{{ [_: {}]: {} }}",
            printer.runtype(self.key(), Position::Top),
            printer.runtype(self.value(), Position::Top)
        )
    }
}

impl Describe for Union {
    fn describe(&self, printer: &mut Printer) -> String {
        if self.alternatives().is_empty() {
            return "never".to_owned();
        }
        self.alternatives()
            .iter()
            .map(|a| printer.runtype(a, Position::Top))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Describe for Intersect {
    fn describe(&self, printer: &mut Printer) -> String {
        if self.members().is_empty() {
            return "unknown".to_owned();
        }
        self.members()
            .iter()
            .map(|m| printer.runtype(m, Position::IntersectMember))
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

impl Describe for Optional {
    fn describe(&self, printer: &mut Printer) -> String {
        format!("{} | undefined", printer.runtype(self.underlying(), Position::Top))
    }
}

impl Describe for Constraint {
    fn describe(&self, printer: &mut Printer) -> String {
        match &self.options().name {
            Some(name) => name.clone(),
            None => format!("WithConstraint<{}>", printer.runtype(self.underlying(), Position::Top)),
        }
    }
}

impl Describe for Brand {
    fn describe(&self, printer: &mut Printer) -> String {
        format!(
            "Brand<{:?}, {}>",
            self.brand(),
            printer.runtype(self.entity(), Position::Top)
        )
    }
}

impl Describe for Lazy {
    fn describe(&self, printer: &mut Printer) -> String {
        printer.runtype(&self.resolve(), Position::Top)
    }
}

impl Describe for Parser {
    fn describe(&self, printer: &mut Printer) -> String {
        printer.runtype(self.underlying(), Position::Top)
    }
}

impl Describe for Template {
    fn describe(&self, printer: &mut Printer) -> String {
        let mut out = String::from("`");
        for part in self.parts() {
            match part {
                TemplatePart::Literal(text) => out.push_str(&escape_template_text(text)),
                TemplatePart::Runtype(rt) => {
                    out.push_str("${");
                    out.push_str(&printer.runtype(rt, Position::Top));
                    out.push('}');
                }
            }
        }
        out.push('`');
        out
    }
}

fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if identifier {
        name.to_owned()
    } else {
        runtypes_value::Primitive::from(name).to_string()
    }
}

fn escape_template_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::sync::LazyLock;

    #[test]
    fn primitives_and_literals() {
        insta::assert_snapshot!(number().show(), @"number");
        insta::assert_snapshot!(literal("circle").show(), @r#""circle""#);
        insta::assert_snapshot!(literal(10_i128).show(), @"10n");
        insta::assert_snapshot!(undefined().show(), @"undefined");
    }

    #[test]
    fn objects_and_optionals() {
        let circle = object! {
            kind: literal("circle"),
            radius: number(),
            label: string().optional(),
        };
        insta::assert_snapshot!(
            circle.show(),
            @r#"{ kind: "circle"; radius: number; label?: string; }"#
        );
    }

    #[test]
    fn arrays_parenthesize_compound_elements() {
        insta::assert_snapshot!(array(number().or(string())).show(), @"(number | string)[]");
        insta::assert_snapshot!(array(array(boolean())).show(), @"boolean[][]");
    }

    #[test]
    fn intersections_parenthesize_unions() {
        let rt = intersect([number().or(string()), unknown()]);
        insta::assert_snapshot!(rt.show(), @"(number | string) & unknown");
    }

    #[test]
    fn tuples_with_rest() {
        let rt = Tuple::builder()
            .element(string())
            .try_rest(number())
            .element(boolean())
            .build()
            .unwrap();
        insta::assert_snapshot!(rt.show(), @"[string, ...number[], boolean]");
    }

    #[test]
    fn templates() {
        let rt = template!("v", number(), "-`x`").unwrap();
        insta::assert_snapshot!(rt.show(), @r"`v${number}-\`x\``");
    }

    #[test]
    fn recursive_runtypes_terminate() {
        static TREE: LazyLock<Runtype> = LazyLock::new(|| lazy(|| array(TREE.clone())));
        insta::assert_snapshot!(TREE.show(), @"CIRCULAR[]");
    }

    #[test]
    fn records_constraints_and_brands() {
        insta::assert_snapshot!(record(string(), number()).show(), @"{ [_: string]: number }");
        let positive = number().with_constraint_options(
            |v| v.as_f64().is_some_and(|n| n > 0.0),
            ConstraintOptions::named("Positive"),
        );
        insta::assert_snapshot!(positive.show(), @"Positive");
        insta::assert_snapshot!(number().with_guard(|_| true).show(), @"WithConstraint<number>");
        insta::assert_snapshot!(string().with_brand("UserId").show(), @r#"Brand<"UserId", string>"#);
    }
}
