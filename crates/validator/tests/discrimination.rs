//! Discriminated unions: dispatch on a literal field or tuple slot.

use std::sync::LazyLock;

use pretty_assertions::assert_eq;
use rstest::rstest;
use runtypes_validator::prelude::*;

fn shape() -> Runtype {
    union![
        object! { kind: literal("circle"), radius: number() },
        object! { kind: literal("square"), side: number() },
        object! { kind: literal("triangle"), base: number(), height: number() },
    ]
}

fn obj(entries: &[(&str, Value)]) -> Value {
    Value::object(entries.iter().cloned())
}

#[test]
fn failure_names_the_selected_alternative() {
    let err = shape()
        .check(&obj(&[("kind", Value::from("circle")), ("size", Value::from("oops"))]))
        .unwrap_err();
    assert_eq!(err.code(), Failcode::PropertyMissing);
    assert_eq!(err.key().as_deref(), Some(r#"<kind: "circle">.radius"#));
    assert_eq!(
        err.message(),
        r#"Expected property "radius" to be present, but was missing"#
    );
}

#[test]
fn several_failures_inside_the_selected_alternative() {
    let err = shape()
        .check(&obj(&[("kind", Value::from("triangle")), ("base", Value::from("1"))]))
        .unwrap_err();
    assert_eq!(err.code(), Failcode::ContentIncorrect);
    assert_eq!(err.key().as_deref(), Some(r#"<kind: "triangle">"#));

    let keys: Vec<String> = err.failure().paths().into_iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![r#"<kind: "triangle">.base"#, r#"<kind: "triangle">.height"#]
    );
}

#[rstest]
#[case::unknown_value(obj(&[("kind", Value::from("hexagon"))]), "kind")]
#[case::missing_field(obj(&[("radius", Value::from(1))]), "kind")]
fn bad_discriminant(#[case] value: Value, #[case] key: &str) {
    let err = shape().check(&value).unwrap_err();
    assert_eq!(err.code(), Failcode::ValueIncorrect);
    assert_eq!(err.key().as_deref(), Some(key));
    assert!(err.message().starts_with(r#"Expected "circle" | "square" | "triangle", but was"#));
}

#[test]
fn well_known_field_names_win() {
    let rt = union![
        object! { id: literal(1), "type": literal("a") },
        object! { id: literal(2), "type": literal("b") },
    ];
    let err = rt
        .check(&obj(&[("id", Value::from(2)), ("type", Value::from("c"))]))
        .unwrap_err();
    assert_eq!(err.key().as_deref(), Some("type"));
}

#[test]
fn discriminant_through_brands_and_lazies() {
    static LEAF: LazyLock<Runtype> =
        LazyLock::new(|| lazy(|| object! { tag: literal("leaf"), value: number() }));
    static TREE: LazyLock<Runtype> = LazyLock::new(|| {
        lazy(|| {
            union![
                LEAF.clone(),
                object! { tag: literal("node"), children: array(TREE.clone()) }.with_brand("Node"),
            ]
        })
    });

    let leaf = obj(&[("tag", Value::from("leaf")), ("value", Value::from(1))]);
    let node = obj(&[("tag", Value::from("node")), ("children", Value::array([leaf.clone()]))]);
    assert!(TREE.guard(&node));

    let bad = obj(&[
        ("tag", Value::from("node")),
        ("children", Value::array([obj(&[("tag", Value::from("leaf"))])])),
    ]);
    let err = TREE.check(&bad).unwrap_err();
    assert_eq!(
        err.key().as_deref(),
        Some(r#"<tag: "node">.children[0].<tag: "leaf">.value"#)
    );
}

#[test]
fn tuple_unions_use_the_first_slot() {
    let command = union![
        tuple([literal("move"), number(), number()]),
        tuple([literal("say"), string()]),
    ];
    assert!(command.guard(&Value::array([Value::from("say"), Value::from("hi")])));

    let err = command
        .check(&Value::array([Value::from("say"), Value::from(1)]))
        .unwrap_err();
    assert_eq!(err.code(), Failcode::TypeIncorrect);
    assert_eq!(err.key().as_deref(), Some(r#"<0: "say">[1]"#));

    let err = command.check(&Value::array([Value::from("jump")])).unwrap_err();
    assert_eq!(err.code(), Failcode::ValueIncorrect);
    assert_eq!(err.key().as_deref(), Some("[0]"));
}

#[test]
fn unions_without_a_discriminant_try_in_order() {
    let rt = union![
        object! { a: number() },
        object! { b: number() },
    ];
    assert!(rt.guard(&obj(&[("b", Value::from(1))])));

    let err = rt.check(&obj(&[("c", Value::from(1))])).unwrap_err();
    assert_eq!(err.code(), Failcode::TypeIncorrect);
    assert_eq!(err.key(), None);
    assert_eq!(
        err.message(),
        r#"Expected { a: number; } | { b: number; }, but was object"#
    );
}

#[test]
fn dispatch_and_trial_agree_on_acceptance() {
    let discriminated = shape();
    let linear = union![
        object! { kind: literal("circle"), radius: number() }.with_guard(|_| true),
        number(),
        object! { kind: literal("square"), side: number() },
        object! { kind: literal("triangle"), base: number(), height: number() },
    ];
    let values = [
        obj(&[("kind", Value::from("circle")), ("radius", Value::from(1))]),
        obj(&[("kind", Value::from("square")), ("side", Value::from(1))]),
        obj(&[("kind", Value::from("square")), ("radius", Value::from(1))]),
        obj(&[("kind", Value::from("blob"))]),
    ];
    for value in &values {
        assert_eq!(discriminated.guard(value), linear.guard(value), "{value}");
    }
}
