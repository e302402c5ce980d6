//! In-memory adjacency graph.

use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};

use crate::types::{Edge, VertexId};
use super::ColorableGraph;

/// Error type for the in-memory graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Vertex not found.
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),
    /// Edge from a vertex to itself.
    #[error("Self-loop on vertex {0}")]
    SelfLoop(VertexId),
}

/// Serializable description of an undirected graph.
///
/// ```json
/// {"vertices": [0, 1, 2], "edges": [[0, 1], [1, 2]]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Vertex ids.
    pub vertices: Vec<VertexId>,
    /// Edges as endpoint pairs.
    #[serde(default)]
    pub edges: Vec<(VertexId, VertexId)>,
}

/// Undirected adjacency-list graph.
///
/// Uses BTreeMap/BTreeSet for deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    /// Vertex -> neighbor set.
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
    /// Number of undirected edges.
    num_edges: usize,
}

impl AdjacencyGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a spec, rejecting self-loops and unknown endpoints.
    ///
    /// Repeated edges collapse into one.
    pub fn from_spec(spec: &GraphSpec) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for v in &spec.vertices {
            graph.add_vertex(*v);
        }
        for &(a, b) in &spec.edges {
            if a == b {
                return Err(GraphError::SelfLoop(a));
            }
            for endpoint in [a, b] {
                if !graph.contains_vertex(endpoint) {
                    return Err(GraphError::VertexNotFound(endpoint));
                }
            }
            graph.add_edge(a, b);
        }
        Ok(graph)
    }

    /// Export to a spec.
    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            vertices: self.adjacency.keys().copied().collect(),
            edges: self.edges().iter().map(Edge::endpoints).collect(),
        }
    }

    /// Complete graph on ids `0..n`.
    pub fn complete(n: u32) -> Self {
        let mut graph = Self::with_vertices(n);
        for a in 0..n {
            for b in (a + 1)..n {
                graph.add_edge(VertexId::new(a), VertexId::new(b));
            }
        }
        graph
    }

    /// Path `0 - 1 - ... - (n-1)`.
    pub fn path(n: u32) -> Self {
        let mut graph = Self::with_vertices(n);
        for a in 1..n {
            graph.add_edge(VertexId::new(a - 1), VertexId::new(a));
        }
        graph
    }

    /// Cycle on ids `0..n` (a path for `n < 3`).
    pub fn cycle(n: u32) -> Self {
        let mut graph = Self::path(n);
        if n >= 3 {
            graph.add_edge(VertexId::new(n - 1), VertexId::new(0));
        }
        graph
    }

    fn with_vertices(n: u32) -> Self {
        let mut graph = Self::new();
        for id in 0..n {
            graph.add_vertex(VertexId::new(id));
        }
        graph
    }

    /// Add a vertex. Returns false if it already exists.
    pub fn add_vertex(&mut self, v: VertexId) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, BTreeSet::new());
        true
    }

    /// Add an undirected edge.
    ///
    /// Returns false for self-loops, missing endpoints, or an existing edge.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        if a == b || !self.contains_vertex(a) || !self.contains_vertex(b) {
            return false;
        }
        let fresh = self.adjacency.entry(a).or_default().insert(b);
        if fresh {
            self.adjacency.entry(b).or_default().insert(a);
            self.num_edges += 1;
        }
        fresh
    }

    /// Remove an undirected edge. Returns false if it did not exist.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        let removed = self
            .adjacency
            .get_mut(&a)
            .map(|set| set.remove(&b))
            .unwrap_or(false);
        if removed {
            if let Some(set) = self.adjacency.get_mut(&b) {
                set.remove(&a);
            }
            self.num_edges -= 1;
        }
        removed
    }

    /// Remove a vertex and its incident edges. Returns false if it did not exist.
    pub fn remove_vertex(&mut self, v: VertexId) -> bool {
        let Some(neighbors) = self.adjacency.remove(&v) else {
            return false;
        };
        for u in &neighbors {
            if let Some(set) = self.adjacency.get_mut(u) {
                set.remove(&v);
            }
        }
        self.num_edges -= neighbors.len();
        true
    }

    /// Whether `a` and `b` are adjacent.
    pub fn is_neighbor(&self, a: VertexId, b: VertexId) -> bool {
        self.adjacency
            .get(&a)
            .map(|set| set.contains(&b))
            .unwrap_or(false)
    }

    /// Whether the edge exists.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.is_neighbor(edge.low(), edge.high())
    }

    /// Edges incident to a vertex, in canonical order.
    pub fn incident_edges(&self, v: VertexId) -> Result<Vec<Edge>, GraphError> {
        let mut edges: Vec<Edge> = self
            .neighbor_set(v)?
            .iter()
            .map(|u| Edge::new(v, *u))
            .collect();
        edges.sort();
        Ok(edges)
    }

    fn neighbor_set(&self, v: VertexId) -> Result<&BTreeSet<VertexId>, GraphError> {
        self.adjacency.get(&v).ok_or(GraphError::VertexNotFound(v))
    }
}

impl ColorableGraph for AdjacencyGraph {
    type Error = GraphError;

    fn vertices(&self) -> Vec<VertexId> {
        self.adjacency.keys().copied().collect()
    }

    fn edges(&self) -> Vec<Edge> {
        // Each edge is listed once, from its lower endpoint.
        self.adjacency
            .iter()
            .flat_map(|(a, set)| {
                set.range((std::ops::Bound::Excluded(*a), std::ops::Bound::Unbounded))
                    .map(move |b| Edge::new(*a, *b))
            })
            .collect()
    }

    fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>, Self::Error> {
        Ok(self.neighbor_set(v)?.iter().copied().collect())
    }

    fn contains_vertex(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    fn degree(&self, v: VertexId) -> Result<usize, Self::Error> {
        Ok(self.neighbor_set(v)?.len())
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.num_edges
    }
}
