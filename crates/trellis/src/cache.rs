//! Memoized layout for embedding applications.
//!
//! `compute_layout` never caches. An interactive editor that re-renders far more often than
//! the graph changes can keep a [`LayoutCache`] next to the graph: it recomputes only when the
//! content hash of the inputs changes.

use crate::error::Result;
use crate::model::{LayoutResult, WorkflowEdge, WorkflowNode};
use crate::options::LayoutOptions;
use crate::compute_layout;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    slot: Option<(u64, LayoutResult)>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content hash over node ids, kinds and sizes, the edges, and every option.
    ///
    /// Node labels are left out: they do not influence the layout.
    pub fn key<K: Hash>(
        nodes: &[WorkflowNode<K>],
        edges: &[WorkflowEdge],
        options: &LayoutOptions,
    ) -> u64 {
        let mut h = FxHasher::default();
        nodes.len().hash(&mut h);
        for n in nodes {
            n.id.hash(&mut h);
            n.kind.hash(&mut h);
            n.width.map(f64::to_bits).hash(&mut h);
            n.height.map(f64::to_bits).hash(&mut h);
        }
        edges.hash(&mut h);
        hash_options(options, &mut h);
        h.finish()
    }

    /// Returns the stored layout when the inputs hash to the stored key, otherwise computes,
    /// stores and returns a fresh one. A failed computation leaves the cache empty.
    pub fn get_or_compute<K: Hash>(
        &mut self,
        nodes: &[WorkflowNode<K>],
        edges: &[WorkflowEdge],
        options: &LayoutOptions,
    ) -> Result<&LayoutResult> {
        let key = Self::key(nodes, edges, options);
        match self.slot.take() {
            Some((stored, result)) if stored == key => {
                tracing::trace!(key, "layout cache hit");
                Ok(&self.slot.insert((stored, result)).1)
            }
            _ => {
                tracing::trace!(key, "layout cache miss");
                let result = compute_layout(nodes, edges, options)?;
                Ok(&self.slot.insert((key, result)).1)
            }
        }
    }

    pub fn cached(&self) -> Option<&LayoutResult> {
        self.slot.as_ref().map(|(_, result)| result)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

fn hash_options(o: &LayoutOptions, h: &mut impl Hasher) {
    o.direction.hash(h);
    o.auto_direction.hash(h);
    o.auto_direction_threshold.hash(h);
    o.ordering_iterations.hash(h);
    for value in [
        o.node_width,
        o.node_height,
        o.rank_spacing,
        o.node_spacing,
        o.component_spacing,
        o.parallel_edge_spacing,
        o.back_edge_spacing,
    ] {
        value.to_bits().hash(h);
    }
}
