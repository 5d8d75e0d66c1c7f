use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use flatnest::{Nested, Order, flatten, pattern, unflatten};
use std::hint::black_box;

/// Flat list with a two-leaf sub-list after every fourth leaf, the shape
/// "4[2]4[2]..." repeated.
fn ragged_structure(groups: usize) -> Nested<u64> {
    let mut items = Vec::new();
    let mut value = 0u64;
    for _ in 0..groups {
        for _ in 0..4 {
            items.push(Nested::Leaf(value));
            value += 1;
        }
        items.push(Nested::List(vec![Nested::Leaf(value), Nested::Leaf(value + 1)]));
        value += 2;
    }
    Nested::List(items)
}

/// Singly-nested chain `[[[...[0]...]]]` of the given depth.
fn deep_chain(depth: usize) -> Nested<u64> {
    let mut structure = Nested::List(vec![Nested::Leaf(0)]);
    for _ in 0..depth {
        structure = Nested::List(vec![structure]);
    }
    structure
}

const SHAPES: &[(&str, fn() -> Nested<u64>)] = &[
    ("ragged-1k", || ragged_structure(1_000)),
    ("deep-4k", || deep_chain(4_096)),
];

fn bench_flatten(c: &mut Criterion) {
    for (name, build) in SHAPES {
        for (order_name, order) in [("dfs", Order::DepthFirst), ("bfs", Order::BreadthFirst)] {
            c.bench_function(&format!("flatten/{order_name}/{name}"), |b| {
                b.iter_batched(
                    build,
                    |structure| flatten(structure, order).unwrap(),
                    BatchSize::SmallInput,
                );
            });
        }
    }
}

fn bench_unflatten(c: &mut Criterion) {
    for (name, build) in SHAPES {
        for (order_name, order) in [("dfs", Order::DepthFirst), ("bfs", Order::BreadthFirst)] {
            let flattened = flatten(build(), order).unwrap();
            c.bench_function(&format!("unflatten/{order_name}/{name}"), |b| {
                b.iter_batched(
                    || flattened.values.clone(),
                    |values| unflatten(&flattened.pattern, values, order).unwrap(),
                    BatchSize::SmallInput,
                );
            });
        }
    }
}

fn bench_decode(c: &mut Criterion) {
    for (name, build) in SHAPES {
        for (order_name, order) in [("dfs", Order::DepthFirst), ("bfs", Order::BreadthFirst)] {
            let encoded = flatten(build(), order).unwrap().pattern;
            c.bench_function(&format!("decode/{order_name}/{name}"), |b| {
                b.iter(|| pattern::decode(black_box(&encoded), order).unwrap());
            });
        }
    }
}

fn bench_index_mapping(c: &mut Criterion) {
    for (name, build) in SHAPES {
        for (order_name, order) in [("dfs", Order::DepthFirst), ("bfs", Order::BreadthFirst)] {
            let shape = flatten(build(), order).unwrap().shape;
            c.bench_function(&format!("flat_to_nested/{order_name}/{name}"), |b| {
                let last = shape.num_leaves() - 1;
                b.iter(|| shape.flat_to_nested(order, black_box(last)).unwrap());
            });
        }
    }
}

criterion_group!(codec, bench_decode, bench_flatten, bench_unflatten);
criterion_group! {
    name = mapping;
    config = Criterion::default().sample_size(50);
    targets = bench_index_mapping
}
criterion_main!(codec, mapping);
