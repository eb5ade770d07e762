use chrono::DateTime;
use flatkey::{
    flatten, flatten_with_options, to_value, unflatten, unflatten_with_options, value, Error,
    FlattenOptions, Map, UnflattenOptions, Value,
};
use num_bigint::BigInt;
use serde::Serialize;

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct Order {
    order_id: u32,
    customer: User,
    totals: Vec<f64>,
}

fn sample_date() -> DateTime<chrono::Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Every scalar and opaque leaf kind must survive `{hello: {world: V}}`
/// becoming `{"hello.world": V}` and back.
fn leaf_values() -> Vec<Value> {
    vec![
        Value::from("good morning"),
        Value::from(1234.99),
        Value::from(1234),
        Value::Bool(true),
        Value::Null,
        Value::Date(sample_date()),
        Value::BigInt(BigInt::from(10).pow(40)),
        Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
    ]
}

#[test]
fn test_flatten_primitives() {
    for leaf in leaf_values() {
        let mut world = Map::new();
        world.insert("world".to_string(), leaf.clone());
        let mut tree = Map::new();
        tree.insert("hello".to_string(), Value::Object(world));

        let flat = flatten(Value::Object(tree)).unwrap();
        let obj = flat.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("hello.world"), Some(&leaf));
    }
}

#[test]
fn test_unflatten_primitives() {
    for leaf in leaf_values() {
        let mut flat = Map::new();
        flat.insert("hello.world".to_string(), leaf.clone());

        let tree = unflatten(Value::Object(flat)).unwrap();
        let world = tree
            .as_object()
            .and_then(|m| m.get("hello"))
            .and_then(|v| v.as_object())
            .and_then(|m| m.get("world"));
        assert_eq!(world, Some(&leaf));
    }
}

#[test]
fn test_roundtrip_mixed_tree() {
    let tree = value!({
        "id": 1,
        "name": "Alice",
        "posts": [
            { "id": 10, "title": "First Post" },
            { "id": 11, "title": "Second Post", "drafts": [] }
        ],
        "settings": {}
    });
    let flat = flatten(tree.clone()).unwrap();
    assert_eq!(unflatten(flat).unwrap(), tree);
}

#[test]
fn test_flatten_key_set() {
    let flat = flatten(value!({
        "a": { "b": 1 },
        "c": [true, { "d": null }]
    }))
    .unwrap();
    assert_eq!(flat, value!({ "a.b": 1, "c.0": true, "c.1.d": null }));
}

#[test]
fn test_struct_through_serde_bridge() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        totals: vec![29.99, 49.99],
    };

    let flat = flatten(to_value(&order).unwrap()).unwrap();
    let obj = flat.as_object().unwrap();
    assert_eq!(obj.get("order_id").and_then(|v| v.as_i64()), Some(12345));
    assert_eq!(
        obj.get("customer.name").and_then(|v| v.as_str()),
        Some("Alice")
    );
    assert_eq!(obj.get("customer.tags.0").and_then(|v| v.as_str()), Some("vip"));
    assert_eq!(obj.get("totals.1"), Some(&Value::from(49.99)));

    // The rebuilt tree matches what the serde bridge produced.
    let back = unflatten(Value::Object(obj.clone())).unwrap();
    assert_eq!(back, to_value(&order).unwrap());
}

#[test]
fn test_serde_json_fixture() {
    let fixture = serde_json::json!({
        "service": {
            "replicas": [1, 2, 3],
            "labels": { "tier": "backend" }
        }
    });

    let flat = flatten(to_value(&fixture).unwrap()).unwrap();
    assert_eq!(
        flat,
        value!({
            "service.replicas.0": 1,
            "service.replicas.1": 2,
            "service.replicas.2": 3,
            "service.labels.tier": "backend"
        })
    );
}

#[test]
fn test_inputs_are_not_mutated_across_calls() {
    let flat = value!({ "a.b": 1, "a.c": 2 });
    let first = unflatten(flat.clone()).unwrap();
    let second = unflatten(flat.clone()).unwrap();
    assert_eq!(first, second);
    assert_eq!(flat, value!({ "a.b": 1, "a.c": 2 }));
}

#[test]
fn test_delimiters_must_match_for_roundtrip() {
    let tree = value!({ "a": { "b": 1 } });
    let flat = flatten_with_options(tree, FlattenOptions::new().with_delimiter("/")).unwrap();
    assert_eq!(flat, value!({ "a/b": 1 }));

    // The default "." delimiter finds no separators, so the key stays flat.
    let mismatched = unflatten(flat.clone()).unwrap();
    assert_eq!(mismatched, value!({ "a/b": 1 }));

    let matched =
        unflatten_with_options(flat, UnflattenOptions::new().with_delimiter("/")).unwrap();
    assert_eq!(matched, value!({ "a": { "b": 1 } }));
}

#[test]
fn test_invalid_options_report_before_work() {
    let err = flatten_with_options(value!({ "a": 1 }), FlattenOptions::new().with_max_depth(0))
        .unwrap_err();
    assert_eq!(
        err,
        Error::invalid_option("max_depth", "must be at least 1")
    );

    let err = unflatten_with_options(
        value!({ "a.b": 1 }),
        UnflattenOptions::new().with_delimiter(""),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidOption { option: "delimiter", .. }));
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = Error::invalid_option("delimiter", "must not be empty");
    assert_eq!(err.to_string(), "invalid option `delimiter`: must not be empty");

    let err = Error::conflicting_type("a.b", "sequence", "mapping");
    assert!(err.to_string().contains("a.b"));
    assert!(err.to_string().contains("sequence"));
}
