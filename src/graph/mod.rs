//! Graph collaborators for the coloring engine.

pub mod memory;

use crate::policy::{QueuedVertex, RemovalOrder};
use crate::queue::IndexedPriorityQueue;
use crate::types::{Edge, VertexId};

/// Read access to an undirected graph, as needed by the coloring engine.
///
/// Implementations must guarantee deterministic ordering of results:
/// vertices and neighbors ascending by id, edges in canonical order.
/// The engine never mutates the graph; its per-vertex scratch state lives in
/// an engine-owned side table.
pub trait ColorableGraph: Send + Sync {
    /// Error type for graph lookups.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All vertex ids, ascending.
    fn vertices(&self) -> Vec<VertexId>;

    /// All edges, sorted canonically.
    fn edges(&self) -> Vec<Edge>;

    /// Neighbors of a vertex, ascending by id.
    fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>, Self::Error>;

    /// Whether the vertex exists.
    fn contains_vertex(&self, v: VertexId) -> bool;

    /// Number of neighbors of a vertex.
    fn degree(&self, v: VertexId) -> Result<usize, Self::Error> {
        Ok(self.neighbors(v)?.len())
    }

    /// Number of vertices.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Number of edges.
    fn edge_count(&self) -> usize {
        self.edges().len()
    }
}

/// Degeneracy of a graph: the largest minimum degree over all its subgraphs.
///
/// Peels the graph smallest-last, re-keying neighbors through the indexed
/// queue, and returns the largest cost seen at removal. O((n + m) log n).
pub fn degeneracy<G: ColorableGraph + ?Sized>(graph: &G) -> Result<usize, G::Error> {
    let mut vertices = graph.vertices();
    vertices.sort_unstable();
    vertices.dedup();

    // Indexed by dense position; None once removed
    let mut costs: Vec<Option<usize>> = Vec::with_capacity(vertices.len());
    let mut queue = IndexedPriorityQueue::with_capacity(vertices.len(), RemovalOrder::SmallestLast);
    for (slot, &v) in vertices.iter().enumerate() {
        let degree = graph.degree(v)?;
        costs.push(Some(degree));
        // Keys are fresh positions, so insertion cannot collide.
        let _ = queue.insert(QueuedVertex::at(slot, v, degree));
    }

    let mut result = 0;
    while let Ok(top) = queue.extract_top() {
        result = result.max(top.cost);
        costs[top.slot] = None;
        for u in graph.neighbors(top.id)? {
            let Ok(slot) = vertices.binary_search(&u) else {
                continue;
            };
            if let Some(cost) = costs[slot].as_mut() {
                *cost = cost.saturating_sub(1);
                queue.reposition(QueuedVertex::at(slot, u, *cost));
            }
        }
    }
    Ok(result)
}

pub use memory::{AdjacencyGraph, GraphError, GraphSpec};
