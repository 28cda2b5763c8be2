//! Normalize long edges by inserting dummy nodes.
//!
//! The layer graph holds the real nodes (at the same indices as in the layout graph) plus one
//! zero-size dummy per intermediate rank of every forward edge that spans more than one rank.
//! Afterwards every layer-graph edge joins adjacent ranks, which is what ordering and routing
//! rely on. Feedback edges are left out entirely.

use crate::graph::LayoutGraph;
use crate::graphlib::{Graph, GraphOptions};
use crate::rank::Ranking;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNode {
    pub width: f64,
    pub height: f64,
    pub rank: usize,
    pub group: usize,
    /// Discovery index for real nodes; dummies follow all real nodes in chain order.
    pub seq: usize,
    /// Layout-graph edge index this dummy belongs to.
    pub dummy_of: Option<usize>,
}

impl LayerNode {
    pub fn is_dummy(&self) -> bool {
        self.dummy_of.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerEdge {
    /// Layout-graph edge index this segment belongs to.
    pub edge: usize,
}

#[derive(Debug, Clone)]
pub struct LayerGraph {
    pub graph: Graph<LayerNode, LayerEdge>,
    /// Nodes `0..real_count` are the layout graph's nodes.
    pub real_count: usize,
    /// Dummy node indices per layout-graph edge, in rank order. Empty for short and feedback
    /// edges.
    pub chains: Vec<Vec<usize>>,
}

impl LayerGraph {
    pub fn node(&self, ix: usize) -> Option<&LayerNode> {
        self.graph.node_label_by_ix(ix)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn dummy_count(&self) -> usize {
        self.graph.node_count() - self.real_count
    }

    pub fn is_real(&self, ix: usize) -> bool {
        ix < self.real_count
    }
}

pub fn run(g: &LayoutGraph, ranking: &Ranking) -> LayerGraph {
    let n = g.node_count();
    let mut lg: Graph<LayerNode, LayerEdge> = Graph::with_capacity(
        GraphOptions { multigraph: true },
        n,
        g.edge_count(),
    );

    g.for_each_node(|ix, id, label| {
        lg.set_node(
            id,
            LayerNode {
                width: label.width,
                height: label.height,
                rank: ranking.rank[ix],
                group: ranking.group_of[ix],
                seq: ranking.discovery[ix],
                dummy_of: None,
            },
        );
    });

    let mut edges: Vec<usize> = (0..g.edge_count())
        .filter(|&e| !ranking.is_feedback(e))
        .collect();
    edges.sort_by_key(|&e| {
        let (u, v) = g.edge_endpoints(e).unwrap_or((0, 0));
        let id = g.edge_label_by_ix(e).map(|l| l.id.as_str()).unwrap_or("");
        (ranking.discovery[u], ranking.discovery[v], id)
    });

    let mut chains: Vec<Vec<usize>> = vec![Vec::new(); g.edge_count()];
    let mut next_dummy = 0usize;
    for e in edges {
        let (Some((u, v)), Some(label)) = (g.edge_endpoints(e), g.edge_label_by_ix(e)) else {
            continue;
        };
        let (Some(u_id), Some(v_id)) = (g.node_id(u), g.node_id(v)) else {
            continue;
        };
        let (u_rank, v_rank) = (ranking.rank[u], ranking.rank[v]);

        if v_rank == u_rank + 1 {
            lg.set_edge_named(u_id, v_id, Some(label.id.as_str()), LayerEdge { edge: e });
            continue;
        }

        let mut prev = u_id.to_string();
        for (seg, r) in (u_rank + 1..v_rank).enumerate() {
            let dummy = LayerNode {
                width: 0.0,
                height: 0.0,
                rank: r,
                group: ranking.group_of[u],
                seq: n + next_dummy,
                dummy_of: Some(e),
            };
            let (dummy_ix, dummy_id) = add_dummy_node(&mut lg, dummy, &mut next_dummy);
            lg.set_edge_named(
                prev,
                dummy_id.clone(),
                Some(format!("{}#{seg}", label.id)),
                LayerEdge { edge: e },
            );
            chains[e].push(dummy_ix);
            prev = dummy_id;
        }
        lg.set_edge_named(
            prev,
            v_id,
            Some(format!("{}#{}", label.id, v_rank - u_rank - 1)),
            LayerEdge { edge: e },
        );
    }

    let layer_graph = LayerGraph {
        graph: lg,
        real_count: n,
        chains,
    };
    tracing::debug!(dummies = layer_graph.dummy_count(), "normalized long edges");
    layer_graph
}

fn add_dummy_node(
    g: &mut Graph<LayerNode, LayerEdge>,
    label: LayerNode,
    next: &mut usize,
) -> (usize, String) {
    loop {
        let id = if *next == 0 {
            "_d".to_string()
        } else {
            format!("_d{next}")
        };
        *next += 1;
        if !g.has_node(&id) {
            let ix = g.set_node(id.clone(), label);
            return (ix, id);
        }
    }
}
