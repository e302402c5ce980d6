//! Step-driven degeneracy coloring engine.
//!
//! ## Algorithm
//!
//! 1. `start()`: every vertex enters the queue with cost = degree
//! 2. Ordering (one vertex per step):
//!    - Extract the queue top (see [`RemovalOrder`](crate::policy::RemovalOrder))
//!    - Push it onto the ordering stack and mark it inactive
//!    - Decrement the cost of each still-active neighbor and reposition it
//! 3. Coloring (one vertex per step):
//!    - Pop the stack, so vertices are colored in reverse removal order
//!    - Take the lowest palette index not forbidden by colored neighbors,
//!      or `Conflict` if the palette is exhausted
//!    - Forbid the chosen color for every neighbor
//!
//! A vertex is colored after exactly the neighbors that were still active when
//! it left the queue, so a run never needs more than `max removal cost + 1`
//! colors. With [`RemovalOrder::SmallestLast`](crate::policy::RemovalOrder::SmallestLast)
//! that bound is degeneracy + 1.

mod observer;
mod state;

pub use observer::{NoOpObserver, RecordingObserver, StepEvent, StepObserver};
pub use state::EnginePhase;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::graph::ColorableGraph;
use crate::policy::{ColoringPolicyV1, PolicyError, QueuedVertex};
use crate::queue::{IndexedPriorityQueue, QueueError};
use crate::report::{ColoringReport, VertexAssignment};
use crate::types::{ColorOutcome, ColorSet, VertexId};
use state::{RunState, ScratchTable, VertexScratch};

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `step()` before `start()`.
    #[error("Engine is not running; call start() first")]
    NotRunning,
    /// `start()` on an engine that already started.
    #[error("Engine already started; call reset() first")]
    AlreadyStarted,
    /// `step()` after the run finished.
    #[error("Engine already finished")]
    AlreadyDone,
    /// The queue ran dry before every vertex was ordered.
    #[error("Ordering queue empty after {ordered} of {total} vertices")]
    EmptyOrdering {
        /// Vertices already on the stack.
        ordered: usize,
        /// Vertices in the run.
        total: usize,
    },
    /// A result was requested before the run finished.
    #[error("Run incomplete (phase: {0})")]
    Incomplete(EnginePhase),
    /// Vertex not part of the graph.
    #[error("Unknown vertex: {0}")]
    UnknownVertex(VertexId),
    /// Policy cannot drive a run.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
    /// Queue error (internal consistency violation).
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
    /// Graph lookup error.
    #[error("Graph error: {0}")]
    Graph(String),
}

impl EngineError {
    /// Create a graph error from any error type.
    pub fn from_graph<E: std::error::Error>(e: E) -> Self {
        Self::Graph(e.to_string())
    }
}

/// Two-phase coloring state machine over a shared graph.
///
/// The engine owns its queue, stack, and per-vertex scratch state; the graph
/// is only read. Drive it with [`start`](Self::start) and then
/// [`step`](Self::step) until `step` returns `Ok(false)`.
pub struct ColoringEngine<G: ColorableGraph> {
    graph: Arc<G>,
    policy: ColoringPolicyV1,
    observer: Arc<dyn StepObserver>,
    scratch: ScratchTable,
    /// Vertices in removal order; survives the stack being popped.
    removal_order: Vec<VertexId>,
    state: RunState,
}

impl<G: ColorableGraph> ColoringEngine<G> {
    /// Create an engine for `graph`.
    pub fn new(graph: Arc<G>, policy: ColoringPolicyV1) -> Result<Self, EngineError> {
        policy.validate()?;
        Ok(Self {
            graph,
            policy,
            observer: Arc::new(NoOpObserver),
            scratch: ScratchTable::default(),
            removal_order: Vec::new(),
            state: RunState::NotStarted,
        })
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: Arc<dyn StepObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Load every vertex into the queue and enter the ordering phase.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if !matches!(self.state, RunState::NotStarted) {
            return Err(EngineError::AlreadyStarted);
        }

        let mut vertices = self.graph.vertices();
        vertices.sort_unstable();
        vertices.dedup();
        let mut scratch = ScratchTable::with_capacity(vertices.len());
        let mut queue = IndexedPriorityQueue::with_capacity(vertices.len(), self.policy.removal_order);

        // Queue keys are dense positions, never raw ids.
        for &v in &vertices {
            let degree = self.graph.degree(v).map_err(EngineError::from_graph)?;
            let slot = scratch.push(v, VertexScratch::new(degree, self.policy.palette_size));
            queue.insert(QueuedVertex::at(slot, v, degree))?;
        }

        let total = vertices.len();
        let top = queue.peek_top().ok().map(|t| t.id);

        self.scratch = scratch;
        self.removal_order = Vec::with_capacity(total);
        self.state = RunState::Ordering {
            queue,
            stack: Vec::with_capacity(total),
            total,
        };

        info!(
            vertices = total,
            palette_size = self.policy.palette_size,
            removal_order = ?self.policy.removal_order,
            "coloring run started"
        );
        self.observer.on_phase(EnginePhase::Ordering);
        if let Some(top) = top {
            self.observer.on_queue_top(top);
        }
        Ok(())
    }

    /// Perform one transition. Returns whether further steps remain.
    pub fn step(&mut self) -> Result<bool, EngineError> {
        match self.state {
            RunState::NotStarted => return Err(EngineError::NotRunning),
            RunState::Done => return Err(EngineError::AlreadyDone),
            RunState::Ordering { .. } => self.order_next()?,
            RunState::Coloring { .. } => self.color_next()?,
        }
        self.advance_phase();
        Ok(!self.is_done())
    }

    /// Start if needed, then step until done. Returns the number of steps taken.
    pub fn run_to_completion(&mut self) -> Result<usize, EngineError> {
        if matches!(self.state, RunState::NotStarted) {
            self.start()?;
        }
        let mut steps = 0;
        while !self.is_done() {
            self.step()?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Discard all run state and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.state = RunState::NotStarted;
        self.scratch.clear();
        self.removal_order.clear();
    }

    /// Reset and switch to another graph.
    pub fn reset_with(&mut self, graph: Arc<G>) {
        self.graph = graph;
        self.reset();
    }

    /// Current phase.
    pub fn current_phase(&self) -> EnginePhase {
        self.state.phase()
    }

    /// Whether `start()` has been called since construction or the last reset.
    pub fn is_started(&self) -> bool {
        !matches!(self.state, RunState::NotStarted)
    }

    /// Whether every vertex has an outcome.
    pub fn is_done(&self) -> bool {
        matches!(self.state, RunState::Done)
    }

    /// Outcome for a vertex, `None` until it has been colored.
    pub fn color_of(&self, v: VertexId) -> Result<Option<ColorOutcome>, EngineError> {
        if !self.graph.contains_vertex(v) {
            return Err(EngineError::UnknownVertex(v));
        }
        Ok(self.scratch.get(v).and_then(|s| s.assigned))
    }

    /// Vertex at the top of the ordering queue, during the ordering phase.
    pub fn queue_top(&self) -> Option<VertexId> {
        match &self.state {
            RunState::Ordering { queue, .. } => queue.peek_top().ok().map(|t| t.id),
            _ => None,
        }
    }

    /// Whether a vertex is still waiting in the ordering queue.
    pub fn is_active(&self, v: VertexId) -> bool {
        self.scratch.get(v).map(|s| s.active).unwrap_or(false)
    }

    /// Current cost (active-neighbor count) of a vertex.
    pub fn cost_of(&self, v: VertexId) -> Option<usize> {
        self.scratch.get(v).map(|s| s.cost)
    }

    /// Colors forbidden to a vertex by its colored neighbors.
    pub fn forbidden_colors(&self, v: VertexId) -> Option<&ColorSet> {
        self.scratch.get(v).map(|s| &s.forbidden)
    }

    /// Vertices in the order they left the queue so far.
    pub fn ordering(&self) -> &[VertexId] {
        &self.removal_order
    }

    /// The policy.
    pub fn policy(&self) -> &ColoringPolicyV1 {
        &self.policy
    }

    /// The graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Final report. Fails with `Incomplete` before the run is done.
    pub fn report(&self) -> Result<ColoringReport, EngineError> {
        if !self.is_done() {
            return Err(EngineError::Incomplete(self.current_phase()));
        }
        let assignments = self
            .scratch
            .iter()
            .filter_map(|(vertex, s)| {
                s.assigned.map(|outcome| VertexAssignment {
                    vertex,
                    outcome,
                    removal_cost: s.removal_cost.unwrap_or(0),
                })
            })
            .collect();
        Ok(ColoringReport::new(&self.policy, assignments, self.removal_order.clone()))
    }

    fn order_next(&mut self) -> Result<(), EngineError> {
        let RunState::Ordering { queue, stack, total } = &mut self.state else {
            return Ok(());
        };
        if stack.len() >= *total {
            return Ok(());
        }

        let v = match queue.peek_top() {
            Ok(top) => top.id,
            Err(QueueError::EmptyQueue) => {
                return Err(EngineError::EmptyOrdering {
                    ordered: stack.len(),
                    total: *total,
                })
            }
            Err(e) => return Err(e.into()),
        };
        // Fetch before mutating so a graph error leaves the step undone.
        let neighbors = self.graph.neighbors(v).map_err(EngineError::from_graph)?;
        let entry = self.scratch.get_mut(v).ok_or(EngineError::UnknownVertex(v))?;

        queue.extract_top()?;
        stack.push(v);
        self.removal_order.push(v);
        entry.active = false;
        entry.removal_cost = Some(entry.cost);
        let removal_cost = entry.cost;

        for u in neighbors {
            let Some(slot) = self.scratch.slot_of(u) else {
                continue;
            };
            if let Some(n) = self.scratch.get_mut(u) {
                if n.active {
                    debug_assert!(n.cost > 0, "active neighbor {} has zero cost", u);
                    n.cost = n.cost.saturating_sub(1);
                    queue.reposition(QueuedVertex::at(slot, u, n.cost));
                }
            }
        }

        debug!(
            vertex = %v,
            removal_cost,
            remaining = queue.len(),
            "vertex ordered"
        );
        self.observer.on_ordered(v, removal_cost);
        if let Ok(next) = queue.peek_top() {
            self.observer.on_queue_top(next.id);
        }
        Ok(())
    }

    fn color_next(&mut self) -> Result<(), EngineError> {
        let RunState::Coloring { stack } = &mut self.state else {
            return Ok(());
        };
        let Some(&v) = stack.last() else {
            return Ok(());
        };

        let neighbors = self.graph.neighbors(v).map_err(EngineError::from_graph)?;
        let entry = self.scratch.get_mut(v).ok_or(EngineError::UnknownVertex(v))?;
        stack.pop();

        let outcome = match entry.forbidden.first_free() {
            Some(color) => ColorOutcome::Color(color),
            None => ColorOutcome::Conflict,
        };
        entry.assigned = Some(outcome);

        match outcome {
            ColorOutcome::Color(color) => {
                for u in neighbors {
                    if let Some(n) = self.scratch.get_mut(u) {
                        n.forbidden.insert(color);
                    }
                }
                debug!(vertex = %v, color = %color, remaining = stack.len(), "vertex colored");
            }
            ColorOutcome::Conflict => {
                warn!(
                    vertex = %v,
                    palette_size = self.policy.palette_size,
                    "palette exhausted; vertex left in conflict"
                );
            }
        }
        self.observer.on_colored(v, outcome);
        Ok(())
    }

    /// Move to the next phase once the current one has no work left.
    fn advance_phase(&mut self) {
        loop {
            let next = match &mut self.state {
                RunState::Ordering { stack, total, .. } if stack.len() >= *total => {
                    RunState::Coloring {
                        stack: std::mem::take(stack),
                    }
                }
                RunState::Coloring { stack } if stack.is_empty() => RunState::Done,
                _ => return,
            };
            self.state = next;

            let phase = self.state.phase();
            match phase {
                EnginePhase::Coloring => info!(ordered = self.removal_order.len(), "ordering complete"),
                EnginePhase::Done => {
                    let conflicts = self
                        .scratch
                        .iter()
                        .filter(|(_, s)| matches!(s.assigned, Some(ColorOutcome::Conflict)))
                        .count();
                    info!(vertices = self.removal_order.len(), conflicts, "coloring complete");
                }
                _ => {}
            }
            self.observer.on_phase(phase);
        }
    }
}

impl<G: ColorableGraph> std::fmt::Debug for ColoringEngine<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColoringEngine")
            .field("policy", &self.policy)
            .field("phase", &self.current_phase())
            .field("ordered", &self.removal_order.len())
            .finish()
    }
}

/// Convenience: color `graph` start to finish and return the report.
pub fn color_graph<G: ColorableGraph>(
    graph: Arc<G>,
    policy: ColoringPolicyV1,
) -> Result<ColoringReport, EngineError> {
    let mut engine = ColoringEngine::new(graph, policy)?;
    engine.run_to_completion()?;
    engine.report()
}
