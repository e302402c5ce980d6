//! Coloring reports and validity checks.
//!
//! A [`ColoringReport`] is the stable, serializable result of a finished run.
//! Assignments are sorted by vertex id and the report carries a canonical
//! fingerprint, so two runs over the same graph and policy can be compared by
//! fingerprint alone.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::canonical::canonical_hash_hex;
use crate::graph::ColorableGraph;
use crate::policy::ColoringPolicyV1;
use crate::types::{ColorIndex, ColorOutcome, Edge, VertexId};
use crate::COLORING_SCHEMA_VERSION;

/// Final outcome for one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexAssignment {
    /// Vertex id.
    pub vertex: VertexId,
    /// Assigned color or conflict.
    pub outcome: ColorOutcome,
    /// Active-neighbor count when the vertex left the ordering queue.
    pub removal_cost: usize,
}

/// Result of a completed coloring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringReport {
    /// Report schema version.
    pub schema_version: String,
    /// Policy identifier.
    pub policy_id: String,
    /// Hash of the policy parameters.
    pub params_hash: String,
    /// Palette size K.
    pub palette_size: usize,
    /// Outcomes, sorted by vertex id.
    pub assignments: Vec<VertexAssignment>,
    /// Vertices in the order they left the queue.
    pub removal_order: Vec<VertexId>,
    /// Number of distinct palette colors used.
    pub colors_used: usize,
    /// Vertices that ended in `Conflict`, ascending.
    pub conflicts: Vec<VertexId>,
    /// Largest removal cost seen; colors needed never exceed this plus one.
    pub max_removal_cost: usize,
    /// Canonical hash of policy, assignments, and removal order.
    pub fingerprint: String,
}

#[derive(Serialize)]
struct FingerprintInput<'a> {
    params_hash: &'a str,
    assignments: &'a [VertexAssignment],
    removal_order: &'a [VertexId],
}

impl ColoringReport {
    /// Assemble a report; assignments are sorted here.
    pub fn new(
        policy: &ColoringPolicyV1,
        mut assignments: Vec<VertexAssignment>,
        removal_order: Vec<VertexId>,
    ) -> Self {
        assignments.sort_by_key(|a| a.vertex);

        let colors_used = assignments
            .iter()
            .filter_map(|a| a.outcome.color())
            .collect::<BTreeSet<_>>()
            .len();
        let conflicts = assignments
            .iter()
            .filter(|a| a.outcome.is_conflict())
            .map(|a| a.vertex)
            .collect();
        let max_removal_cost = assignments.iter().map(|a| a.removal_cost).max().unwrap_or(0);

        let params_hash = policy.params_hash();
        let fingerprint = canonical_hash_hex(&FingerprintInput {
            params_hash: &params_hash,
            assignments: &assignments,
            removal_order: &removal_order,
        });

        Self {
            schema_version: COLORING_SCHEMA_VERSION.to_string(),
            policy_id: policy.policy_id().to_string(),
            params_hash,
            palette_size: policy.palette_size,
            assignments,
            removal_order,
            colors_used,
            conflicts,
            max_removal_cost,
            fingerprint,
        }
    }

    /// Outcome for a vertex.
    pub fn outcome_of(&self, vertex: VertexId) -> Option<ColorOutcome> {
        self.assignments
            .binary_search_by_key(&vertex, |a| a.vertex)
            .ok()
            .map(|i| self.assignments[i].outcome)
    }

    /// Whether every vertex got a real color.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Vertices grouped by color.
    pub fn color_classes(&self) -> BTreeMap<ColorIndex, Vec<VertexId>> {
        let mut classes: BTreeMap<ColorIndex, Vec<VertexId>> = BTreeMap::new();
        for a in &self.assignments {
            if let Some(c) = a.outcome.color() {
                classes.entry(c).or_default().push(a.vertex);
            }
        }
        classes
    }

    /// Number of vertices covered.
    pub fn num_vertices(&self) -> usize {
        self.assignments.len()
    }
}

/// Specific coloring violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColoringViolation {
    /// Both endpoints of an edge hold the same real color.
    AdjacentSameColor {
        /// The offending edge.
        edge: Edge,
        /// Shared color.
        color: ColorIndex,
    },
    /// A graph vertex has no outcome in the report.
    Unassigned(VertexId),
    /// A color index outside the palette.
    ColorOutOfPalette {
        /// Vertex holding the color.
        vertex: VertexId,
        /// The color.
        color: ColorIndex,
        /// Palette size.
        palette_size: usize,
    },
}

/// Result of checking a report against its graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColoringCheck {
    /// Whether the coloring is proper.
    pub is_valid: bool,
    /// Violations found (empty if valid).
    pub violations: Vec<ColoringViolation>,
}

/// Check that a report is a proper partial coloring of `graph`.
///
/// Conflicted vertices are not violations; they hold no palette slot.
pub fn verify_coloring<G: ColorableGraph + ?Sized>(graph: &G, report: &ColoringReport) -> ColoringCheck {
    let mut violations = Vec::new();

    for v in graph.vertices() {
        match report.outcome_of(v) {
            None => violations.push(ColoringViolation::Unassigned(v)),
            Some(ColorOutcome::Color(color)) if color.index() >= report.palette_size => {
                violations.push(ColoringViolation::ColorOutOfPalette {
                    vertex: v,
                    color,
                    palette_size: report.palette_size,
                });
            }
            Some(_) => {}
        }
    }

    for edge in graph.edges() {
        let (a, b) = edge.endpoints();
        if let (Some(ColorOutcome::Color(ca)), Some(ColorOutcome::Color(cb))) =
            (report.outcome_of(a), report.outcome_of(b))
        {
            if ca == cb {
                violations.push(ColoringViolation::AdjacentSameColor { edge, color: ca });
            }
        }
    }

    ColoringCheck {
        is_valid: violations.is_empty(),
        violations,
    }
}
