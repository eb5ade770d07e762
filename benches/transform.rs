use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flatkey::{flatten, unflatten, value, Map, Value};

/// A user-record-shaped tree with `size` entries, three levels deep.
fn build_tree(size: usize) -> Value {
    let mut root = Map::new();
    for i in 0..size {
        let user = value!({
            "name": (format!("user-{}", i)),
            "active": (i % 2 == 0),
            "profile": {
                "age": ((i % 80) as i64),
                "tags": ["alpha", "beta", "gamma"]
            }
        });
        root.insert(format!("user{}", i), user);
    }
    Value::Object(root)
}

fn benchmark_flatten_simple(c: &mut Criterion) {
    let tree = value!({
        "id": 123,
        "name": "Alice",
        "roles": ["admin", "dev"],
        "address": { "city": "Berlin", "zip": "10115" }
    });

    c.bench_function("flatten_simple_tree", |b| {
        b.iter(|| flatten(black_box(tree.clone())))
    });
}

fn benchmark_unflatten_simple(c: &mut Criterion) {
    let flat = value!({
        "id": 123,
        "name": "Alice",
        "roles.0": "admin",
        "roles.1": "dev",
        "address.city": "Berlin",
        "address.zip": "10115"
    });

    c.bench_function("unflatten_simple_map", |b| {
        b.iter(|| unflatten(black_box(flat.clone())))
    });
}

fn benchmark_flatten_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_sized");

    for size in [10, 100, 1000].iter() {
        let tree = build_tree(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| flatten(black_box(tree.clone())))
        });
    }
    group.finish();
}

fn benchmark_unflatten_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("unflatten_sized");

    for size in [10, 100, 1000].iter() {
        let flat = flatten(build_tree(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &flat, |b, flat| {
            b.iter(|| unflatten(black_box(flat.clone())))
        });
    }
    group.finish();
}

fn benchmark_deep_nesting(c: &mut Criterion) {
    // 200 levels of single-key nesting: exercises the worklist traversal.
    let mut tree = value!(1);
    for _ in 0..200 {
        let mut wrapper = Map::new();
        wrapper.insert("inner".to_string(), tree);
        tree = Value::Object(wrapper);
    }

    c.bench_function("flatten_deep_tree", |b| {
        b.iter(|| flatten(black_box(tree.clone())))
    });

    let flat = flatten(tree).unwrap();
    c.bench_function("unflatten_deep_key", |b| {
        b.iter(|| unflatten(black_box(flat.clone())))
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let tree = build_tree(100);

    c.bench_function("roundtrip_100_users", |b| {
        b.iter(|| {
            let flat = flatten(black_box(tree.clone())).unwrap();
            let _tree = unflatten(black_box(flat)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_flatten_simple,
    benchmark_unflatten_simple,
    benchmark_flatten_sized,
    benchmark_unflatten_sized,
    benchmark_deep_nesting,
    benchmark_roundtrip
);
criterion_main!(benches);
