//! Node ordering / crossing minimization.
//!
//! Each group (connected component, or the isolated nodes) is ordered on its own: a
//! discovery-order initial layering, then alternating barycenter sweeps. The layering with the
//! fewest crossings seen is kept.

mod barycenter;
mod cross_count;
mod init_order;

pub use barycenter::{BarycenterEntry, barycenter, sort};
pub use cross_count::cross_count;
pub use init_order::init_order;

use crate::normalize::LayerGraph;
use crate::rank::Ranking;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Compare against predecessors (down sweep).
    InEdges,
    /// Compare against successors (up sweep).
    OutEdges,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ordering {
    /// Per group, per rank: layer-graph node indices in order.
    pub groups: Vec<Vec<Vec<usize>>>,
    /// Position within its layer (and group) per layer-graph node index.
    pub position: Vec<usize>,
    pub crossings: usize,
}

impl Ordering {
    /// Real node ids at `rank`, groups concatenated in band order.
    pub fn rank_order<'a>(&self, lg: &'a LayerGraph, rank: usize) -> Vec<&'a str> {
        self.groups
            .iter()
            .filter_map(|layers| layers.get(rank))
            .flatten()
            .filter(|&&v| lg.is_real(v))
            .filter_map(|&v| lg.graph.node_id(v))
            .collect()
    }

    pub fn order_of(&self, v: usize) -> Option<usize> {
        self.position.get(v).copied()
    }
}

pub fn order_layers(lg: &LayerGraph, ranking: &Ranking, iterations: usize) -> Ordering {
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); ranking.groups.len()];
    for v in 0..lg.node_count() {
        if let Some(node) = lg.node(v) {
            members[node.group].push(v);
        }
    }

    let mut position = vec![0usize; lg.node_count()];
    let mut groups: Vec<Vec<Vec<usize>>> = Vec::with_capacity(members.len());
    let mut crossings = 0usize;

    for group_members in &members {
        let initial = init_order(lg, group_members);
        let (layers, cc) = refine(lg, initial, iterations, &mut position);
        assign_positions(&layers, &mut position);
        crossings += cc;
        groups.push(layers);
    }

    tracing::debug!(crossings, iterations, "ordered layers");
    Ordering {
        groups,
        position,
        crossings,
    }
}

fn refine(
    lg: &LayerGraph,
    initial: Vec<Vec<usize>>,
    iterations: usize,
    pos: &mut [usize],
) -> (Vec<Vec<usize>>, usize) {
    assign_positions(&initial, pos);
    let mut tie = vec![usize::MAX; lg.node_count()];
    for layer in &initial {
        for (i, &v) in layer.iter().enumerate() {
            tie[v] = i;
        }
    }

    let mut best_cc = cross_count(lg, &initial);
    let mut best = initial.clone();
    let mut layers = initial;

    for i in 0..iterations {
        if best_cc == 0 {
            break;
        }
        if i % 2 == 0 {
            for r in 1..layers.len() {
                sweep_layer(lg, &mut layers[r], pos, Relationship::InEdges, &tie);
            }
        } else {
            for r in (0..layers.len().saturating_sub(1)).rev() {
                sweep_layer(lg, &mut layers[r], pos, Relationship::OutEdges, &tie);
            }
        }

        let cc = cross_count(lg, &layers);
        tracing::trace!(sweep = i, crossings = cc, "barycenter sweep");
        if cc < best_cc {
            best_cc = cc;
            best = layers.clone();
        }
    }

    (best, best_cc)
}

fn sweep_layer(
    lg: &LayerGraph,
    layer: &mut Vec<usize>,
    pos: &mut [usize],
    relationship: Relationship,
    tie: &[usize],
) {
    let entries = barycenter(lg, layer, pos, relationship);
    *layer = sort(&entries, tie);
    for (i, &v) in layer.iter().enumerate() {
        pos[v] = i;
    }
}

fn assign_positions(layers: &[Vec<usize>], pos: &mut [usize]) {
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }
}
