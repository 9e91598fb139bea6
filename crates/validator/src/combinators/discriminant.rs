//! Discriminant analysis for unions.
//!
//! A union of objects (or of tuples) whose alternatives each pin one field (or
//! slot 0) to a distinct literal can be dispatched by looking at that field
//! alone. The analysis looks through brands, constraints, parsers and lazy
//! runtypes.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use runtypes_value::Primitive;

use crate::foundation::{Reflect, Runtype};

/// Field names tried first, in this order, before the remaining common fields.
const PREFERRED_FIELDS: [&str; 3] = ["type", "kind", "tag"];

/// Where the discriminating literal lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscriminantKey {
    /// An object property.
    Field(String),
    /// A tuple slot.
    Index(usize),
}

impl fmt::Display for DiscriminantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A usable discriminant: the key and a literal-to-alternative table.
#[derive(Debug, Clone)]
pub(crate) struct Dispatch {
    pub(crate) key: DiscriminantKey,
    pub(crate) table: IndexMap<Primitive, usize>,
}

impl Dispatch {
    /// `"circle" | "square"`, for messages.
    pub(crate) fn expected(&self) -> String {
        self.table
            .keys()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Strips brand, constraint, parser and lazy layers.
pub(crate) fn underlying_shape(runtype: &Runtype) -> Runtype {
    let mut current = runtype.clone();
    let mut seen = HashSet::new();
    while seen.insert(current.id()) {
        let next = match current.reflect() {
            Reflect::Brand(brand) => brand.entity().clone(),
            Reflect::Constraint(constraint) => constraint.underlying().clone(),
            Reflect::Parser(parser) => parser.underlying().clone(),
            Reflect::Lazy(lazy) => lazy.resolve(),
            _ => break,
        };
        current = next;
    }
    current
}

fn literal_of(runtype: &Runtype) -> Option<Primitive> {
    match underlying_shape(runtype).reflect() {
        Reflect::Literal(literal) => Some(literal.value().clone()),
        _ => None,
    }
}

/// Builds a table if every alternative maps to a distinct literal.
fn table_for(literals: impl Iterator<Item = Option<Primitive>>) -> Option<IndexMap<Primitive, usize>> {
    let mut table = IndexMap::new();
    for (index, literal) in literals.enumerate() {
        if table.insert(literal?, index).is_some() {
            return None;
        }
    }
    Some(table)
}

/// Finds the discriminant of `alternatives`, if there is one.
pub(crate) fn analyse(alternatives: &[Runtype]) -> Option<Dispatch> {
    if alternatives.is_empty() {
        return None;
    }
    let shapes: Vec<Runtype> = alternatives.iter().map(underlying_shape).collect();

    let objects: Option<Vec<_>> = shapes.iter().map(Runtype::as_object).collect();
    if let Some(objects) = objects {
        let first = objects[0];
        let mut candidates: Vec<&str> = PREFERRED_FIELDS.to_vec();
        for name in first.fields().keys() {
            if !candidates.contains(&name.as_str()) {
                candidates.push(name);
            }
        }
        return candidates.into_iter().find_map(|name| {
            let table = table_for(
                objects
                    .iter()
                    .map(|shape| shape.field(name).and_then(literal_of)),
            )?;
            Some(Dispatch {
                key: DiscriminantKey::Field(name.to_owned()),
                table,
            })
        });
    }

    let tuples: Option<Vec<_>> = shapes
        .iter()
        .map(|shape| match shape.reflect() {
            Reflect::Tuple(tuple) => tuple.leading().first(),
            _ => None,
        })
        .collect();
    let slots = tuples?;
    let table = table_for(slots.into_iter().map(literal_of))?;
    Some(Dispatch {
        key: DiscriminantKey::Index(0),
        table,
    })
}
