//! Core types for the coloring engine.

pub mod vertex;
pub mod edge;
pub mod color;

pub use vertex::VertexId;
pub use edge::Edge;
pub use color::{ColorIndex, ColorOutcome, ColorSet};
