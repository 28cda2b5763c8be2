#![forbid(unsafe_code)]

//! Layered layout for workflow graphs.
//!
//! [`compute_layout`] turns a list of workflow steps and the transitions between them into
//! positioned node boxes and orthogonal edge routes. The pipeline is the classic layered one:
//! build and validate the graph, pick a direction, rank nodes by longest path (breaking cycles
//! into feedback edges), split long edges into dummy chains, reduce crossings with barycenter
//! sweeps, assign coordinates and route edges.
//!
//! Everything runs synchronously on per-call working state; the function is pure and safe to
//! call from any thread.

pub use trellis_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cache;
pub mod coordinate_system;
pub mod direction;
pub mod error;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod options;
pub mod order;
pub mod position;
pub mod rank;
pub mod route;

pub use cache::LayoutCache;
pub use error::{Endpoint, Error, Result};
pub use model::{
    Direction, LayoutResult, Point, PositionedEdge, PositionedNode, WorkflowEdge, WorkflowNode,
};
pub use options::LayoutOptions;

use graph::LayoutGraph;
use normalize::LayerGraph;
use order::Ordering;
use position::Placement;
use rank::Ranking;

/// Lays out a workflow graph.
///
/// Fails without producing any layout when the options are invalid, when an edge references
/// a missing node, or on duplicate ids. Cycles are not errors. An empty node list yields an
/// empty result carrying the resolved direction.
pub fn compute_layout<K>(
    nodes: &[WorkflowNode<K>],
    edges: &[WorkflowEdge],
    options: &LayoutOptions,
) -> Result<LayoutResult> {
    options.validate()?;
    let direction = direction::select(
        nodes.len(),
        options.direction,
        options.auto_direction,
        options.auto_direction_threshold,
    );

    let g = graph::build(nodes, edges, options)?;
    if g.node_count() == 0 {
        return Ok(LayoutResult::empty(direction));
    }

    let ranking = rank::assign_layers(&g);
    let mut lg = normalize::run(&g, &ranking);
    coordinate_system::adjust(&mut lg, direction);
    let ordering = order::order_layers(&lg, &ranking, options.ordering_iterations);
    let placement = position::assign_coordinates(&lg, &ranking, &ordering, options);
    let routes = route::route(&g, &lg, &ranking, &placement, options);

    let mut result = assemble(
        &g, &lg, &ranking, &ordering, &placement, routes, edges, direction,
    );
    coordinate_system::undo(&mut result);

    tracing::debug!(
        ?direction,
        nodes = result.nodes.len(),
        edges = result.edges.len(),
        width = result.width,
        height = result.height,
        "computed layout"
    );
    Ok(result)
}

/// Collects the top-to-bottom frame geometry into a result whose bounding box starts at the
/// origin. Node `order` counts real nodes across all bands of a rank.
#[allow(clippy::too_many_arguments)]
fn assemble(
    g: &LayoutGraph,
    lg: &LayerGraph,
    ranking: &Ranking,
    ordering: &Ordering,
    placement: &Placement,
    routes: Vec<Vec<Point>>,
    edges: &[WorkflowEdge],
    direction: Direction,
) -> LayoutResult {
    let mut order = vec![0usize; g.node_count()];
    let mut next_in_rank = vec![0usize; placement.rank_top.len()];
    for layers in &ordering.groups {
        for (r, layer) in layers.iter().enumerate() {
            for &v in layer.iter().filter(|&&v| lg.is_real(v)) {
                order[v] = next_in_rank[r];
                next_in_rank[r] += 1;
            }
        }
    }

    let mut nodes: Vec<PositionedNode> = Vec::with_capacity(g.node_count());
    g.for_each_node(|ix, id, _| {
        let (width, height) = lg
            .node(ix)
            .map(|n| (n.width, n.height))
            .unwrap_or((0.0, 0.0));
        let c = placement.centers[ix];
        nodes.push(PositionedNode {
            id: id.to_string(),
            x: c.x - width / 2.0,
            y: c.y - height / 2.0,
            width,
            height,
            rank: ranking.rank[ix],
            order: order[ix],
        });
    });

    let mut positioned_edges: Vec<PositionedEdge> = Vec::with_capacity(g.edge_count());
    for (e, waypoints) in routes.into_iter().enumerate() {
        let (Some((u, v)), Some(label)) = (g.edge_endpoints(e), g.edge_label_by_ix(e)) else {
            continue;
        };
        let (Some(source), Some(target)) = (g.node_id(u), g.node_id(v)) else {
            continue;
        };
        positioned_edges.push(PositionedEdge {
            id: label.id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            label: edges.get(e).and_then(|input| input.label.clone()),
            feedback: ranking.is_feedback(e),
            waypoints,
        });
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for n in &nodes {
        min_x = min_x.min(n.x);
        min_y = min_y.min(n.y);
        max_x = max_x.max(n.x + n.width);
        max_y = max_y.max(n.y + n.height);
    }
    for p in positioned_edges.iter().flat_map(|e| &e.waypoints) {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    for n in &mut nodes {
        n.x -= min_x;
        n.y -= min_y;
    }
    for p in positioned_edges.iter_mut().flat_map(|e| &mut e.waypoints) {
        p.x -= min_x;
        p.y -= min_y;
    }

    LayoutResult {
        direction,
        width: max_x - min_x,
        height: max_y - min_y,
        nodes,
        edges: positioned_edges,
    }
}
