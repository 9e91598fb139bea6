//! Recursive runtypes over cyclic and deeply nested values.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use runtypes_validator::prelude::*;

static NODE: LazyLock<Runtype> = LazyLock::new(|| lazy(|| array(NODE.clone())));

static PERSON: LazyLock<Runtype> = LazyLock::new(|| {
    lazy(|| {
        object! {
            name: string(),
            friends: array(PERSON.clone()),
        }
    })
});

fn push(array: &Value, item: Value) {
    array.as_array().expect("array value").push(item);
}

#[test]
fn mutually_referencing_arrays_terminate() {
    let a = Value::array([]);
    let b = Value::array([a.clone()]);
    push(&a, b.clone());

    assert!(NODE.guard(&a));
    assert!(NODE.guard(&b));
    assert!(array(NODE.clone()).guard(&Value::array([a.clone(), b])));

    let out = NODE.check(&a).unwrap();
    assert!(out.same_value(&a));
}

#[test]
fn self_containing_array() {
    let a = Value::array([]);
    push(&a, a.clone());
    assert!(NODE.guard(&a));
    assert_eq!(a.to_string(), "[[Circular]]");
}

#[test]
fn failures_inside_a_cycle_are_reported() {
    let a = Value::array([]);
    let b = Value::array([a.clone(), Value::from(1)]);
    push(&a, b);

    let failure = NODE.validate(&a).unwrap_err();
    assert_eq!(failure.code, Failcode::TypeIncorrect);
    assert_eq!(failure.key().as_deref(), Some("[0][1]"));
}

#[test]
fn cyclic_object_graph() {
    let ada = Value::object([("name", Value::from("ada"))]);
    let grace = Value::object([("name", Value::from("grace"))]);
    ada.as_object()
        .expect("object value")
        .insert("friends", Value::array([grace.clone()]));
    grace
        .as_object()
        .expect("object value")
        .insert("friends", Value::array([ada.clone()]));

    assert!(PERSON.guard(&ada));

    grace
        .as_object()
        .expect("object value")
        .insert("name", Value::from(7));
    let failure = PERSON.validate(&ada).unwrap_err();
    assert_eq!(failure.key().as_deref(), Some("friends[0].name"));
}

#[test]
fn independent_runtypes_on_the_same_cycle() {
    let a = Value::array([]);
    push(&a, a.clone());

    let other: Runtype = {
        static OTHER: LazyLock<Runtype> = LazyLock::new(|| lazy(|| array(OTHER.clone())));
        OTHER.clone()
    };
    let both = intersect([NODE.clone(), other]);
    assert!(both.guard(&a));
}

#[test]
fn shared_nodes_are_checked_everywhere() {
    let shared = Value::array([Value::from("x")]);
    let rt = array(array(number()));
    let value = Value::array([shared.clone(), shared]);

    let failure = rt.validate(&value).unwrap_err();
    assert_eq!(failure.code, Failcode::ContentIncorrect);
    assert_eq!(failure.details.as_ref().map(|d| d.len()), Some(2));
}

#[test]
fn depth_limit_is_configurable() {
    let mut deep = Value::array([]);
    for _ in 0..100 {
        deep = Value::array([deep]);
    }

    assert!(NODE.guard(&deep));
    assert!(NODE.check_with(&deep, &ValidateOptions::unbounded()).is_ok());

    let err = NODE.check_with(&deep, &ValidateOptions::strict(50)).unwrap_err();
    assert_eq!(err.code(), Failcode::DepthExceeded);
    assert_eq!(
        err.message(),
        "Expected data nested at most 50 containers deep, but it was nested deeper"
    );
}

#[test]
fn wrappers_do_not_count_towards_the_depth_limit() {
    static TREE: LazyLock<Runtype> = LazyLock::new(|| {
        lazy(|| {
            union![
                object! { tag: literal("leaf") },
                object! { tag: literal("node"), children: array(TREE.clone()) }.with_brand("Node"),
            ]
        })
    });

    // Each level is one object and one array.
    let mut tree = Value::object([("tag", Value::from("leaf"))]);
    for _ in 0..200 {
        tree = Value::object([
            ("tag", Value::from("node")),
            ("children", Value::array([tree])),
        ]);
    }

    let handle = std::thread::Builder::new()
        .stack_size(64 << 20)
        .spawn(move || {
            let ok = TREE.guard(&tree);
            let strict = TREE.check_with(&tree, &ValidateOptions::strict(300)).map(|_| ());
            (ok, strict.map_err(|e| e.code()))
        })
        .unwrap();
    let (ok, strict) = handle.join().unwrap();
    assert!(ok);
    assert_eq!(strict, Err(Failcode::DepthExceeded));
}

#[test]
fn shared_subgraphs_are_checked_once() {
    static DAG: LazyLock<Runtype> = LazyLock::new(|| lazy(|| array(number().or(DAG.clone()))));

    // 2^30 paths reach the innermost array.
    let mut value = Value::array([Value::from(1)]);
    for _ in 0..30 {
        value = Value::array([value.clone(), value]);
    }

    let started = Instant::now();
    assert!(DAG.guard(&value));
    assert!(started.elapsed() < Duration::from_secs(5));

    let mut bad = Value::array([Value::from("x")]);
    for _ in 0..30 {
        bad = Value::array([bad.clone(), bad]);
    }
    let failure = DAG.validate(&bad).unwrap_err();
    assert_eq!(failure.code, Failcode::ContentIncorrect);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn show_marks_back_references() {
    assert_eq!(NODE.show(), "CIRCULAR[]");
    assert_eq!(
        PERSON.show(),
        "{ name: string; friends: CIRCULAR[]; }"
    );
}
