//! Generated payloads keep the same shape from call to call.

use gq_synthetic::{generators, FallbackResolver};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structural fingerprint: key layout and value kinds, ignoring values.
#[derive(Debug, PartialEq)]
enum Shape {
    Object(BTreeMap<String, Shape>),
    Array(Box<Shape>),
    Empty,
    Scalar(&'static str),
}

fn shape(value: &Value) -> Shape {
    match value {
        Value::Object(map) => Shape::Object(map.iter().map(|(k, v)| (k.clone(), shape(v))).collect()),
        Value::Array(items) => match items.first() {
            Some(first) => {
                let first_shape = shape(first);
                for item in &items[1..] {
                    assert_eq!(shape(item), first_shape, "heterogeneous array");
                }
                Shape::Array(Box::new(first_shape))
            }
            None => Shape::Empty,
        },
        Value::String(_) => Shape::Scalar("string"),
        Value::Number(_) => Shape::Scalar("number"),
        Value::Bool(_) => Shape::Scalar("bool"),
        Value::Null => Shape::Scalar("null"),
    }
}

fn to_value<T: serde::Serialize>(payload: T) -> Value {
    serde_json::to_value(payload).unwrap()
}

#[test]
fn test_generator_shapes_are_stable() {
    let generate: [(&str, fn() -> Value); 13] = [
        ("overview", || to_value(generators::overview())),
        ("risk", || to_value(generators::risk(generators::DEFAULT_RISK_COUNT))),
        ("whales", || to_value(generators::whales(generators::DEFAULT_WHALE_COUNT))),
        ("trends", || to_value(generators::trends())),
        ("map", || to_value(generators::map())),
        ("anomalies", || to_value(generators::anomalies(generators::DEFAULT_ANOMALY_COUNT))),
        ("entities", || to_value(generators::entities(generators::DEFAULT_ENTITY_COUNT))),
        ("narratives", || to_value(generators::narratives(generators::DEFAULT_NARRATIVE_COUNT))),
        ("rings", || to_value(generators::rings(generators::DEFAULT_RING_COUNT))),
        ("system-status", || to_value(generators::system_status())),
        ("health", || to_value(generators::health())),
        ("ecosystems", || to_value(generators::ecosystems())),
        ("ecosystem", || to_value(generators::ecosystem_detail("arbitrum"))),
    ];

    for (name, generate) in generate {
        let baseline = shape(&generate());
        assert!(matches!(baseline, Shape::Object(_)), "{}", name);
        for _ in 0..20 {
            assert_eq!(shape(&generate()), baseline, "{} changed shape", name);
        }
    }
}

#[test]
fn test_resolver_shapes_are_stable() {
    let resolver = FallbackResolver::new();
    for path in resolver.known_paths() {
        let baseline = shape(&resolver.resolve(path));
        for _ in 0..10 {
            assert_eq!(shape(&resolver.resolve(path)), baseline, "{}", path);
        }
    }
}

#[test]
fn test_payloads_have_no_nulls() {
    fn walk(path: &str, value: &Value) {
        match value {
            Value::Null => panic!("null at {}", path),
            Value::Object(map) => map.iter().for_each(|(k, v)| walk(&format!("{}.{}", path, k), v)),
            Value::Array(items) => items.iter().for_each(|v| walk(&format!("{}[]", path), v)),
            _ => {}
        }
    }

    let resolver = FallbackResolver::new();
    for path in resolver.known_paths() {
        walk(path, &resolver.resolve(path));
    }
    walk("ecosystems/base", &resolver.resolve("ecosystems/base"));
}
