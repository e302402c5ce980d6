//! # degeneracy-coloring
//!
//! Step-driven greedy graph coloring over a degeneracy-style vertex ordering.
//!
//! The engine answers one question:
//!
//! > Given a graph and a palette of K colors, which color does each vertex get?
//!
//! ## Core Contract
//!
//! 1. Order vertices by repeatedly removing the queue top and re-keying its
//!    active neighbors through an indexed priority queue
//! 2. Color vertices first-fit in reverse removal order
//! 3. Report `Conflict` for any vertex whose neighbors exhaust the palette
//!
//! ## Architecture
//!
//! ```text
//! ColorableGraph → ColoringEngine::start → step()* → ColoringReport → verify_coloring
//!                        ↓
//!              IndexedPriorityQueue<QueuedVertex, RemovalOrder>
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Cost ties are broken by lowest vertex id
//! - Same graph + same policy → identical report fingerprint
//! - Report assignments are ordered by vertex id

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod queue;
pub mod graph;
pub mod policy;
pub mod engine;
pub mod report;
pub mod canonical;

// Re-exports
pub use types::{VertexId, Edge, ColorIndex, ColorOutcome, ColorSet};
pub use queue::{IndexedPriorityQueue, HeapKey, PriorityOrder, MaxFirst, MinFirst, QueueError, HeapViolation};
pub use graph::{ColorableGraph, AdjacencyGraph, GraphSpec, GraphError, degeneracy};
pub use policy::{ColoringPolicyV1, PolicyError, QueuedVertex, RemovalOrder, DEFAULT_PALETTE_SIZE};
pub use engine::{
    ColoringEngine, EngineError, EnginePhase, color_graph,
    StepObserver, NoOpObserver, RecordingObserver, StepEvent,
};
pub use report::{ColoringReport, VertexAssignment, ColoringCheck, ColoringViolation, verify_coloring};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

/// Schema version for serialized reports.
/// Increment on breaking changes to any schema type.
pub const COLORING_SCHEMA_VERSION: &str = "1.0.0";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "coloring_policy_v1";
