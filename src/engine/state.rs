//! Engine run state and per-vertex scratch table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::{QueuedVertex, RemovalOrder};
use crate::queue::IndexedPriorityQueue;
use crate::types::{ColorOutcome, ColorSet, VertexId};

/// Externally visible phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    /// `start()` has not been called.
    NotStarted,
    /// Vertices are being removed into the ordering stack.
    Ordering,
    /// Vertices are being popped and colored.
    Coloring,
    /// Every vertex has an outcome.
    Done,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Ordering => write!(f, "ordering"),
            Self::Coloring => write!(f, "coloring"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Run state. Each variant owns exactly the structures its phase uses.
#[derive(Debug)]
pub(crate) enum RunState {
    NotStarted,
    Ordering {
        queue: IndexedPriorityQueue<QueuedVertex, RemovalOrder>,
        stack: Vec<VertexId>,
        total: usize,
    },
    Coloring {
        stack: Vec<VertexId>,
    },
    Done,
}

impl RunState {
    pub(crate) fn phase(&self) -> EnginePhase {
        match self {
            Self::NotStarted => EnginePhase::NotStarted,
            Self::Ordering { .. } => EnginePhase::Ordering,
            Self::Coloring { .. } => EnginePhase::Coloring,
            Self::Done => EnginePhase::Done,
        }
    }
}

/// Algorithm scratch state for one vertex.
#[derive(Debug, Clone)]
pub(crate) struct VertexScratch {
    /// Number of still-active neighbors.
    pub(crate) cost: usize,
    /// Not yet on the ordering stack.
    pub(crate) active: bool,
    /// Colors held by colored neighbors.
    pub(crate) forbidden: ColorSet,
    /// Set once, during coloring.
    pub(crate) assigned: Option<ColorOutcome>,
    /// Cost at the moment the vertex left the queue.
    pub(crate) removal_cost: Option<usize>,
}

impl VertexScratch {
    pub(crate) fn new(degree: usize, palette_size: usize) -> Self {
        Self {
            cost: degree,
            active: true,
            forbidden: ColorSet::with_capacity(palette_size),
            assigned: None,
            removal_cost: None,
        }
    }
}

/// Side table holding one entry per vertex at its dense position.
///
/// Ids are kept sorted next to their entries, so the table is sized by the
/// vertex count and a lookup is a binary search over the ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScratchTable {
    ids: Vec<VertexId>,
    entries: Vec<VertexScratch>,
}

impl ScratchTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry and return its dense position. Ids must arrive ascending.
    pub(crate) fn push(&mut self, v: VertexId, scratch: VertexScratch) -> usize {
        debug_assert!(self.ids.last().map_or(true, |last| *last < v), "ids out of order at {}", v);
        self.ids.push(v);
        self.entries.push(scratch);
        self.ids.len() - 1
    }

    /// Dense position of a vertex.
    pub(crate) fn slot_of(&self, v: VertexId) -> Option<usize> {
        self.ids.binary_search(&v).ok()
    }

    pub(crate) fn get(&self, v: VertexId) -> Option<&VertexScratch> {
        self.slot_of(v).map(|slot| &self.entries[slot])
    }

    pub(crate) fn get_mut(&mut self, v: VertexId) -> Option<&mut VertexScratch> {
        self.slot_of(v).map(|slot| &mut self.entries[slot])
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
        self.entries.clear();
    }

    /// Entries, ascending by id.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (VertexId, &VertexScratch)> + '_ {
        self.ids.iter().copied().zip(self.entries.iter())
    }
}
