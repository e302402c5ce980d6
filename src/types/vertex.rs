//! Vertex identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vertex in a colorable graph.
///
/// Ids are small non-negative integers, stable for the lifetime of the vertex.
/// They double as dense array indices for engine side tables and as the
/// deterministic tie-break key when two vertices share a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u32);

impl VertexId {
    /// Create a new VertexId.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Array index for dense side tables.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
