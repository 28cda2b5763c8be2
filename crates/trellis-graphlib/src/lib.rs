//! Graph container APIs used by `trellis`.
//!
//! Nodes are addressed by string id at the boundary and by a dense arena index (`ix`) inside
//! the layout phases. Indices are assigned in insertion order and never change, since the
//! container does not support removal.

pub mod alg;
mod graph;

pub use graph::{Graph, GraphOptions};
