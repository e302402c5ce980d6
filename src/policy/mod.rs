//! Coloring policy definitions.

pub mod v1;
pub mod order;

pub use v1::{ColoringPolicyV1, PolicyError, DEFAULT_PALETTE_SIZE};
pub use order::{QueuedVertex, RemovalOrder};
