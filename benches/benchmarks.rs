use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::hint::black_box;

use snapstore::{JsonState, Store};

fn object(value: Value) -> JsonState {
    match value {
        Value::Object(map) => map,
        _ => JsonState::new(),
    }
}

fn store_creation_benchmark(c: &mut Criterion) {
    c.bench_function("store_creation", |b| {
        b.iter(|| {
            let store: Store<HashMap<&str, i32>> = Store::new(black_box(HashMap::new()));
            store
        });
    });
}

fn get_state_benchmark(c: &mut Criterion) {
    let store = Store::new(object(json!({"a": 1, "b": 2})));

    c.bench_function("get_state", |b| {
        b.iter(|| {
            black_box(store.get_state());
        });
    });
}

fn set_state_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_state");

    for key_count in [1, 16, 256].iter() {
        let initial: JsonState = (0..*key_count)
            .map(|i| (format!("key{i}"), json!(i)))
            .collect();
        let store = Store::new(initial);

        group.bench_with_input(
            BenchmarkId::from_parameter(key_count),
            key_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.set_state(object(json!({"key0": black_box(i)})));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new(HashMap::from([("value", 0usize)]));

        for _ in 0..*subscriber_count {
            let _ = store.subscribe(|_| {
                // Empty subscriber
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.set_state(HashMap::from([("value", black_box(i))]));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    store_creation_benchmark,
    get_state_benchmark,
    set_state_benchmark,
    store_subscribe_benchmark,
);
criterion_main!(benches);
