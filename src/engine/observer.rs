//! Step observers.
//!
//! Presentation layers (highlighting the queue top, greying out ordered
//! vertices, painting colors) hook in here instead of reading engine
//! internals. Observers are called synchronously from inside `step()`.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

use crate::types::{ColorOutcome, VertexId};
use super::state::EnginePhase;

/// Callback interface for engine progress.
///
/// Every method defaults to a no-op.
pub trait StepObserver: Send + Sync {
    /// The vertex now at the top of the ordering queue.
    fn on_queue_top(&self, _vertex: VertexId) {}

    /// A vertex left the queue and was pushed onto the ordering stack.
    fn on_ordered(&self, _vertex: VertexId, _removal_cost: usize) {}

    /// A vertex received its outcome.
    fn on_colored(&self, _vertex: VertexId, _outcome: ColorOutcome) {}

    /// The engine entered a new phase.
    fn on_phase(&self, _phase: EnginePhase) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl StepObserver for NoOpObserver {}

/// One recorded observer callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// See [`StepObserver::on_queue_top`].
    QueueTop {
        /// Vertex at the top.
        vertex: VertexId,
    },
    /// See [`StepObserver::on_ordered`].
    Ordered {
        /// Removed vertex.
        vertex: VertexId,
        /// Its cost when removed.
        removal_cost: usize,
    },
    /// See [`StepObserver::on_colored`].
    Colored {
        /// Colored vertex.
        vertex: VertexId,
        /// Assigned outcome.
        outcome: ColorOutcome,
    },
    /// See [`StepObserver::on_phase`].
    Phase {
        /// New phase.
        phase: EnginePhase,
    },
}

/// In-memory observer for testing and replay.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<StepEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<StepEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, event: StepEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl StepObserver for RecordingObserver {
    fn on_queue_top(&self, vertex: VertexId) {
        self.record(StepEvent::QueueTop { vertex });
    }

    fn on_ordered(&self, vertex: VertexId, removal_cost: usize) {
        self.record(StepEvent::Ordered { vertex, removal_cost });
    }

    fn on_colored(&self, vertex: VertexId, outcome: ColorOutcome) {
        self.record(StepEvent::Colored { vertex, outcome });
    }

    fn on_phase(&self, phase: EnginePhase) {
        self.record(StepEvent::Phase { phase });
    }
}
