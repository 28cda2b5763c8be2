//! Graph model builder: raw node/edge lists to the internal arena graph.

use crate::error::{Endpoint, Error, Result};
use crate::graphlib::{Graph, GraphOptions};
use crate::model::{WorkflowEdge, WorkflowNode};
use crate::options::LayoutOptions;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeLabel {
    /// Explicit id, or one generated from the endpoints.
    pub id: String,
    /// Position among the edges sharing this edge's ordered endpoint pair.
    pub parallel_index: usize,
    pub parallel_count: usize,
}

/// Node and edge indices equal their positions in the input slices.
pub type LayoutGraph = Graph<NodeLabel, EdgeLabel>;

pub fn build<K>(
    nodes: &[WorkflowNode<K>],
    edges: &[WorkflowEdge],
    opts: &LayoutOptions,
) -> Result<LayoutGraph> {
    let mut g = LayoutGraph::with_capacity(
        GraphOptions { multigraph: true },
        nodes.len(),
        edges.len(),
    );

    for node in nodes {
        if g.has_node(&node.id) {
            return Err(Error::DuplicateNode {
                id: node.id.clone(),
            });
        }
        let width = node.width.unwrap_or(opts.node_width);
        let height = node.height.unwrap_or(opts.node_height);
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::InvalidNodeSize {
                id: node.id.clone(),
                width,
                height,
            });
        }
        g.set_node(node.id.clone(), NodeLabel { width, height });
    }

    let mut taken: HashSet<String> = HashSet::default();
    for e in edges {
        for (endpoint, node) in [(Endpoint::Source, &e.source), (Endpoint::Target, &e.target)] {
            if !g.has_node(node) {
                return Err(Error::DanglingEdge {
                    edge: e
                        .id
                        .clone()
                        .unwrap_or_else(|| format!("{}->{}", e.source, e.target)),
                    endpoint,
                    node: node.clone(),
                });
            }
        }
        if let Some(id) = &e.id {
            if !taken.insert(id.clone()) {
                return Err(Error::DuplicateEdge { id: id.clone() });
            }
        }
    }

    let mut parallel_count: HashMap<(&str, &str), usize> = HashMap::default();
    for e in edges {
        *parallel_count
            .entry((e.source.as_str(), e.target.as_str()))
            .or_default() += 1;
    }

    let mut parallel_seen: HashMap<(&str, &str), usize> = HashMap::default();
    for e in edges {
        let id = match &e.id {
            Some(id) => id.clone(),
            None => unique_edge_id(&mut taken, &e.source, &e.target),
        };
        let pair = (e.source.as_str(), e.target.as_str());
        let seen = parallel_seen.entry(pair).or_default();
        let parallel_index = *seen;
        *seen += 1;

        g.set_edge_named(
            e.source.clone(),
            e.target.clone(),
            Some(id.clone()),
            EdgeLabel {
                id,
                parallel_index,
                parallel_count: parallel_count.get(&pair).copied().unwrap_or(1),
            },
        );
    }

    Ok(g)
}

fn unique_edge_id(taken: &mut HashSet<String>, source: &str, target: &str) -> String {
    let base = format!("{source}->{target}");
    let mut candidate = base.clone();
    let mut i = 1usize;
    while taken.contains(&candidate) {
        candidate = format!("{base}#{i}");
        i += 1;
    }
    taken.insert(candidate.clone());
    candidate
}
