//! Undirected edge type.

use serde::{Deserialize, Serialize};
use super::vertex::VertexId;

/// Undirected edge between two distinct vertices.
///
/// Endpoints are stored in canonical order (`low < high`), so `Edge::new(a, b)`
/// and `Edge::new(b, a)` are the same edge. The derived `Ord` sorts by
/// (low, high), which gives a deterministic edge listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    low: VertexId,
    high: VertexId,
}

impl Edge {
    /// Create a new edge, normalizing endpoint order.
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Smaller endpoint.
    pub fn low(&self) -> VertexId {
        self.low
    }

    /// Larger endpoint.
    pub fn high(&self) -> VertexId {
        self.high
    }

    /// Both endpoints as a tuple.
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.low, self.high)
    }

    /// The endpoint opposite to `v`, if `v` is incident.
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if v == self.low {
            Some(self.high)
        } else if v == self.high {
            Some(self.low)
        } else {
            None
        }
    }

    /// Whether both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }
}
