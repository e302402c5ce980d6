//! Golden tests for the coloring engine.
//!
//! These tests pin exact orderings and color assignments for small graphs,
//! and check determinism of the report fingerprint.

use std::sync::Arc;
use degeneracy_coloring::{
    VertexId, ColorIndex, ColorOutcome,
    AdjacencyGraph, GraphSpec, GraphError, degeneracy,
    IndexedPriorityQueue, QueuedVertex, RemovalOrder,
    ColoringEngine, ColoringPolicyV1, EnginePhase, EngineError,
    color_graph, verify_coloring, COLORING_SCHEMA_VERSION,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn v(id: u32) -> VertexId {
    VertexId::new(id)
}

fn c(i: u32) -> ColorOutcome {
    ColorOutcome::Color(ColorIndex::new(i))
}

fn graph_from_json(json: &str) -> AdjacencyGraph {
    let spec: GraphSpec = serde_json::from_str(json).unwrap();
    AdjacencyGraph::from_spec(&spec).unwrap()
}

fn run(graph: AdjacencyGraph, palette: usize, order: RemovalOrder) -> degeneracy_coloring::ColoringReport {
    let policy = ColoringPolicyV1::new(palette).with_removal_order(order);
    color_graph(Arc::new(graph), policy).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Queue
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_queue_extraction_order() {
    let items = [(2, 5), (0, 3), (1, 5), (3, 1)].map(|(id, cost)| QueuedVertex::new(v(id), cost));
    let mut queue = IndexedPriorityQueue::new(RemovalOrder::LargestFirst);
    for item in items {
        queue.insert(item).unwrap();
    }

    let mut order = Vec::new();
    while let Ok(top) = queue.extract_top() {
        order.push(top.id.get());
    }
    assert_eq!(order, vec![1, 2, 0, 3]);
}

#[test]
fn golden_queue_reposition_promotes_and_demotes() {
    let items = (0..5).map(|i| QueuedVertex::new(v(i), 10));
    let mut queue = IndexedPriorityQueue::from_items(items, RemovalOrder::LargestFirst).unwrap();
    assert_eq!(queue.peek_top().unwrap().id, v(0));

    // Decrease the top: it sinks below every equal-cost peer.
    assert!(queue.reposition(QueuedVertex::new(v(0), 2)));
    assert_eq!(queue.peek_top().unwrap().id, v(1));

    // Increase a leaf: it rises to the top.
    assert!(queue.reposition(QueuedVertex::new(v(4), 11)));
    assert_eq!(queue.peek_top().unwrap().id, v(4));
    assert!(queue.check_invariants().is_ok());
}

// ─────────────────────────────────────────────────────────────────────────────
// Triangle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_triangle_eight_colors() {
    let graph = graph_from_json(r#"{"vertices": [0, 1, 2], "edges": [[0, 1], [1, 2], [0, 2]]}"#);
    let report = run(graph, 8, RemovalOrder::LargestFirst);

    assert_eq!(report.removal_order, vec![v(0), v(1), v(2)]);
    assert_eq!(report.outcome_of(v(2)), Some(c(0)));
    assert_eq!(report.outcome_of(v(1)), Some(c(1)));
    assert_eq!(report.outcome_of(v(0)), Some(c(2)));
    assert_eq!(report.colors_used, 3);
    assert!(report.is_conflict_free());
}

#[test]
fn golden_triangle_two_colors_conflicts() {
    let report = run(AdjacencyGraph::complete(3), 2, RemovalOrder::LargestFirst);

    assert_eq!(report.outcome_of(v(2)), Some(c(0)));
    assert_eq!(report.outcome_of(v(1)), Some(c(1)));
    assert_eq!(report.outcome_of(v(0)), Some(ColorOutcome::Conflict));
    assert_eq!(report.conflicts, vec![v(0)]);
}

#[test]
fn golden_triangle_stepwise() {
    let mut engine = ColoringEngine::new(Arc::new(AdjacencyGraph::complete(3)), ColoringPolicyV1::new(8)).unwrap();
    engine.start().unwrap();

    let mut phases = vec![engine.current_phase()];
    while engine.step().unwrap() {
        phases.push(engine.current_phase());
    }
    phases.push(engine.current_phase());

    assert_eq!(
        phases,
        vec![
            EnginePhase::Ordering,
            EnginePhase::Ordering,
            EnginePhase::Ordering,
            EnginePhase::Coloring,
            EnginePhase::Coloring,
            EnginePhase::Coloring,
            EnginePhase::Done,
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Removal Orders
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_path_largest_first() {
    let report = run(AdjacencyGraph::path(4), 8, RemovalOrder::LargestFirst);

    assert_eq!(report.removal_order, vec![v(1), v(2), v(0), v(3)]);
    assert_eq!(report.outcome_of(v(3)), Some(c(0)));
    assert_eq!(report.outcome_of(v(0)), Some(c(0)));
    assert_eq!(report.outcome_of(v(2)), Some(c(1)));
    assert_eq!(report.outcome_of(v(1)), Some(c(2)));
    assert_eq!(report.max_removal_cost, 2);
}

#[test]
fn golden_path_smallest_last() {
    let graph = AdjacencyGraph::path(4);
    assert_eq!(degeneracy(&graph).unwrap(), 1);

    let report = run(graph, 2, RemovalOrder::SmallestLast);

    assert_eq!(report.removal_order, vec![v(0), v(1), v(2), v(3)]);
    assert_eq!(report.colors_used, 2);
    assert_eq!(report.max_removal_cost, 1);
    assert!(report.is_conflict_free());
}

#[test]
fn golden_path_largest_first_conflicts_where_smallest_last_does_not() {
    let largest = run(AdjacencyGraph::path(4), 2, RemovalOrder::LargestFirst);
    assert_eq!(largest.conflicts, vec![v(1)]);

    let smallest = run(AdjacencyGraph::path(4), 2, RemovalOrder::SmallestLast);
    assert!(smallest.conflicts.is_empty());
}

#[test]
fn golden_complete_graph_one_short() {
    let report = run(AdjacencyGraph::complete(5), 4, RemovalOrder::LargestFirst);

    assert_eq!(report.conflicts, vec![v(0)]);
    assert_eq!(report.colors_used, 4);
    assert!(verify_coloring(&AdjacencyGraph::complete(5), &report).is_valid);
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_sparse_ids_and_isolated_vertex() {
    let graph = graph_from_json(r#"{"vertices": [2, 7, 9], "edges": [[9, 7]]}"#);
    let report = run(graph, 3, RemovalOrder::LargestFirst);

    assert_eq!(report.removal_order, vec![v(7), v(2), v(9)]);
    assert_eq!(report.outcome_of(v(9)), Some(c(0)));
    assert_eq!(report.outcome_of(v(2)), Some(c(0)));
    assert_eq!(report.outcome_of(v(7)), Some(c(1)));
}

#[test]
fn golden_huge_ids_from_json() {
    let graph = graph_from_json(
        r#"{"vertices": [4000000000, 3, 4294967295], "edges": [[3, 4000000000], [4000000000, 4294967295]]}"#,
    );
    assert_eq!(degeneracy(&graph).unwrap(), 1);

    let report = run(graph, 2, RemovalOrder::LargestFirst);
    assert_eq!(report.removal_order, vec![v(4_000_000_000), v(3), v(u32::MAX)]);
    assert_eq!(report.outcome_of(v(u32::MAX)), Some(c(0)));
    assert_eq!(report.outcome_of(v(3)), Some(c(0)));
    assert_eq!(report.outcome_of(v(4_000_000_000)), Some(c(1)));
}

#[test]
fn golden_edges_default_to_empty() {
    let graph = graph_from_json(r#"{"vertices": [0, 1]}"#);
    let report = run(graph, 1, RemovalOrder::LargestFirst);
    assert_eq!(report.colors_used, 1);
    assert!(report.is_conflict_free());
}

#[test]
fn golden_rejects_bad_edges() {
    let self_loop: GraphSpec = serde_json::from_str(r#"{"vertices": [0], "edges": [[0, 0]]}"#).unwrap();
    assert_eq!(AdjacencyGraph::from_spec(&self_loop).unwrap_err(), GraphError::SelfLoop(v(0)));

    let dangling: GraphSpec = serde_json::from_str(r#"{"vertices": [0], "edges": [[0, 4]]}"#).unwrap();
    assert_eq!(AdjacencyGraph::from_spec(&dangling).unwrap_err(), GraphError::VertexNotFound(v(4)));
}

#[test]
fn golden_zero_palette_rejected() {
    let result = color_graph(Arc::new(AdjacencyGraph::path(2)), ColoringPolicyV1::new(0));
    assert!(matches!(result, Err(EngineError::InvalidPolicy(_))));
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_fingerprint_is_stable() {
    let a = run(AdjacencyGraph::cycle(7), 3, RemovalOrder::SmallestLast);
    let b = run(AdjacencyGraph::cycle(7), 3, RemovalOrder::SmallestLast);

    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    assert_eq!(a.fingerprint.len(), 16);
}

#[test]
fn golden_fingerprint_tracks_policy() {
    let a = run(AdjacencyGraph::cycle(7), 3, RemovalOrder::SmallestLast);
    let b = run(AdjacencyGraph::cycle(7), 4, RemovalOrder::SmallestLast);

    assert_ne!(a.params_hash, b.params_hash);
    assert_ne!(a.fingerprint, b.fingerprint);
}

#[test]
fn golden_report_json_roundtrip() {
    let report = run(AdjacencyGraph::complete(3), 2, RemovalOrder::LargestFirst);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["schema_version"], COLORING_SCHEMA_VERSION);
    assert_eq!(json["policy_id"], "coloring_policy_v1");
    assert_eq!(json["palette_size"], 2);
    assert_eq!(json["conflicts"], serde_json::json!([0]));

    let back: degeneracy_coloring::ColoringReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
