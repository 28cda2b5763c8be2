//! Barycenter computation and layer sorting.

use super::Relationship;
use crate::normalize::LayerGraph;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: usize,
    /// Mean position of the neighbours in the reference layer; `None` without neighbours.
    pub barycenter: Option<f64>,
}

/// Barycenters of `layer` against the adjacent layer whose positions are in `pos`.
pub fn barycenter(
    lg: &LayerGraph,
    layer: &[usize],
    pos: &[usize],
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    layer
        .iter()
        .map(|&v| {
            let neighbours: Vec<usize> = match relationship {
                Relationship::InEdges => lg.graph.predecessors_ix(v).collect(),
                Relationship::OutEdges => lg.graph.successors_ix(v).collect(),
            };
            if neighbours.is_empty() {
                return BarycenterEntry {
                    v,
                    barycenter: None,
                };
            }
            let sum: usize = neighbours.iter().map(|&u| pos[u]).sum();
            BarycenterEntry {
                v,
                barycenter: Some(sum as f64 / neighbours.len() as f64),
            }
        })
        .collect()
}

/// Reorders a layer by barycenter.
///
/// Entries must be in the layer's current order. Entries without a barycenter keep their
/// slot; the others fill the remaining slots by ascending barycenter, ties broken by `tie`
/// (the initial discovery position).
pub fn sort(entries: &[BarycenterEntry], tie: &[usize]) -> Vec<usize> {
    let mut sortable: Vec<(usize, f64)> = entries
        .iter()
        .filter_map(|e| e.barycenter.map(|b| (e.v, b)))
        .collect();
    sortable.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| tie[a.0].cmp(&tie[b.0])));

    let mut sortable = sortable.into_iter().map(|(v, _)| v);
    entries
        .iter()
        .map(|e| match e.barycenter {
            None => e.v,
            Some(_) => sortable.next().unwrap_or(e.v),
        })
        .collect()
}
