//! Vertex priority for the ordering phase.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::queue::{HeapKey, PriorityOrder};
use crate::types::VertexId;

/// Queue entry for a vertex during the ordering phase.
///
/// `cost` is the number of still-active neighbors at the time the entry was
/// last inserted or repositioned. `slot` is the queue key; it defaults to the
/// vertex id, and the engine sets it to the vertex's dense position so that
/// sparse or very large ids never size the queue's position map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedVertex {
    /// Vertex id.
    pub id: VertexId,
    /// Current cost.
    pub cost: usize,
    /// Dense queue key.
    pub slot: usize,
}

impl QueuedVertex {
    /// Create a new queue entry keyed by the vertex id.
    pub fn new(id: VertexId, cost: usize) -> Self {
        Self::at(id.index(), id, cost)
    }

    /// Create a new queue entry with an explicit dense key.
    pub fn at(slot: usize, id: VertexId, cost: usize) -> Self {
        Self { id, cost, slot }
    }
}

impl HeapKey for QueuedVertex {
    fn heap_key(&self) -> usize {
        self.slot
    }
}

/// Which active vertex leaves the queue next.
///
/// Both orders break cost ties toward the lower id.
///
/// - `LargestFirst`: highest current cost first. Colors used are bounded by
///   the largest removal cost plus one.
/// - `SmallestLast`: lowest current cost first. Every removal cost is at most
///   the graph's degeneracy, so colors used are bounded by degeneracy plus one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOrder {
    /// Highest cost first.
    #[default]
    LargestFirst,
    /// Lowest cost first.
    SmallestLast,
}

impl PriorityOrder<QueuedVertex> for RemovalOrder {
    fn compare(&self, a: &QueuedVertex, b: &QueuedVertex) -> Ordering {
        let by_cost = match self {
            Self::LargestFirst => a.cost.cmp(&b.cost),
            Self::SmallestLast => b.cost.cmp(&a.cost),
        };
        // Lower id outranks on equal cost
        by_cost.then_with(|| b.id.cmp(&a.id))
    }
}
