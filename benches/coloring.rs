//! Performance benchmarks for the indexed queue and the coloring engine.
//!
//! Run with: `cargo bench --bench coloring`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | Queue reposition | O(log n) | One sift per call |
//! | Full run | O((n + m) log n) | One reposition per edge |

use criterion::{
    black_box, criterion_group, criterion_main,
    BenchmarkId, Criterion, Throughput,
};
use std::sync::Arc;

use degeneracy_coloring::{
    color_graph, degeneracy, AdjacencyGraph, ColorableGraph, ColoringPolicyV1, IndexedPriorityQueue,
    QueuedVertex, RemovalOrder, VertexId,
};

/// Sparse graph whose edges come from a fixed-seed LCG.
fn make_sparse_graph(n: u32, edges_per_vertex: u32) -> AdjacencyGraph {
    let mut graph = AdjacencyGraph::new();
    for i in 0..n {
        graph.add_vertex(VertexId::new(i));
    }
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in 0..n {
        for _ in 0..edges_per_vertex {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = ((state >> 33) % n as u64) as u32;
            if j != i {
                graph.add_edge(VertexId::new(i), VertexId::new(j));
            }
        }
    }
    graph
}

fn queued(n: u32) -> Vec<QueuedVertex> {
    (0..n)
        .map(|i| QueuedVertex::new(VertexId::new(i), ((i * 7919) % 97) as usize))
        .collect()
}

/// Benchmark insert-all then extract-all.
fn bench_queue_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_drain");

    for n in [100u32, 1_000, 10_000] {
        let items = queued(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("elements", n), &items, |b, items| {
            b.iter(|| {
                let mut queue = IndexedPriorityQueue::with_capacity(items.len(), RemovalOrder::LargestFirst);
                for item in items {
                    queue.insert(*item).unwrap();
                }
                while let Ok(top) = queue.extract_top() {
                    black_box(top);
                }
            })
        });
    }

    group.finish();
}

/// Benchmark repeated cost decrements, the engine's hot path.
fn bench_queue_reposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_reposition");

    for n in [1_000u32, 10_000] {
        let items = queued(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("elements", n), &items, |b, items| {
            b.iter_batched(
                || IndexedPriorityQueue::from_items(items.iter().copied(), RemovalOrder::LargestFirst).unwrap(),
                |mut queue| {
                    for item in items {
                        let cost = item.cost.saturating_sub(1);
                        queue.reposition(QueuedVertex::new(item.id, cost));
                    }
                    queue
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark a full engine run per graph family and removal order.
fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");

    let graphs = [
        ("complete_64", AdjacencyGraph::complete(64)),
        ("cycle_10000", AdjacencyGraph::cycle(10_000)),
        ("sparse_5000", make_sparse_graph(5_000, 4)),
    ];

    for (name, graph) in graphs {
        let graph = Arc::new(graph);
        group.throughput(Throughput::Elements(graph.vertex_count() as u64));

        for order in [RemovalOrder::LargestFirst, RemovalOrder::SmallestLast] {
            let policy = ColoringPolicyV1::new(16).with_removal_order(order);
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), name),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        let report = color_graph(Arc::clone(graph), policy.clone()).unwrap();
                        black_box(report.colors_used)
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the standalone degeneracy computation.
fn bench_degeneracy(c: &mut Criterion) {
    let graph = make_sparse_graph(5_000, 4);
    c.bench_function("degeneracy_sparse_5000", |b| {
        b.iter(|| degeneracy(black_box(&graph)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_queue_drain,
    bench_queue_reposition,
    bench_full_run,
    bench_degeneracy,
);
criterion_main!(benches);
