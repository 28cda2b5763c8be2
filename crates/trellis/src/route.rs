//! Edge routing in the top-to-bottom frame.
//!
//! Routes are orthogonal polylines. Forward edges leave the bottom of the source and enter the
//! top of the target, bending in the middle of rank gaps only, so they never cut through a
//! node. Long edges run straight down through their dummy slots. Feedback edges detour through
//! their component's lane, to the right of every layer.
//!
//! Forward edges attach within the middle half of a node's side and bend at the middle of the
//! rank gap. Feedback edges attach in the right quarter and bend closer to the nodes, one step
//! per lane, so the two kinds never share a segment.

use crate::graph::{EdgeLabel, LayoutGraph};
use crate::model::Point;
use crate::normalize::LayerGraph;
use crate::options::LayoutOptions;
use crate::position::Placement;
use crate::rank::Ranking;

const EPSILON: f64 = 1e-9;

/// Waypoints per layout-graph edge index.
pub fn route(
    g: &LayoutGraph,
    lg: &LayerGraph,
    ranking: &Ranking,
    placement: &Placement,
    opts: &LayoutOptions,
) -> Vec<Vec<Point>> {
    (0..g.edge_count())
        .map(|e| {
            let (Some((u, v)), Some(label)) = (g.edge_endpoints(e), g.edge_label_by_ix(e)) else {
                return Vec::new();
            };
            let points = if ranking.is_feedback(e) {
                route_back_edge(lg, ranking, placement, opts, e, u, v)
            } else {
                route_forward_edge(lg, ranking, placement, opts, e, u, v, label)
            };
            simplify(points)
        })
        .collect()
}

struct Anchors {
    /// Point on the bottom side of the source.
    start: Point,
    /// Point on the top side of the target.
    end: Point,
}

fn node_size(lg: &LayerGraph, ix: usize) -> (f64, f64) {
    lg.node(ix).map(|n| (n.width, n.height)).unwrap_or((0.0, 0.0))
}

fn forward_anchors(
    lg: &LayerGraph,
    placement: &Placement,
    opts: &LayoutOptions,
    u: usize,
    v: usize,
    label: &EdgeLabel,
) -> Anchors {
    let (wu, hu) = node_size(lg, u);
    let (wv, hv) = node_size(lg, v);
    let cu = placement.centers[u];
    let cv = placement.centers[v];

    let offset = parallel_offset(label, opts.parallel_edge_spacing, wu.min(wv) / 4.0);
    Anchors {
        start: Point::new(cu.x + offset, cu.y + hu / 2.0),
        end: Point::new(cv.x + offset, cv.y - hv / 2.0),
    }
}

/// Lateral shift of the `i`-th of `n` parallel edges, centered around zero.
///
/// The step shrinks when `n` edges at `spacing` would not fit in `[-limit, limit]`, so the
/// outermost edges land on the limits and every edge keeps its own x.
fn parallel_offset(label: &EdgeLabel, spacing: f64, limit: f64) -> f64 {
    let n = label.parallel_count;
    if n <= 1 {
        return 0.0;
    }
    let centered = label.parallel_index as f64 - (n - 1) as f64 / 2.0;
    let step = spacing.min(2.0 * limit / (n - 1) as f64);
    centered * step
}

/// Fraction in `(0, 1)` for lane `k` of `lanes`, growing with `k`.
fn lane_fraction(k: usize, lanes: usize) -> f64 {
    (k + 1) as f64 / (lanes.max(k + 1) + 1) as f64
}

fn back_anchors(
    lg: &LayerGraph,
    placement: &Placement,
    u: usize,
    v: usize,
    fraction: f64,
) -> Anchors {
    let (wu, hu) = node_size(lg, u);
    let (wv, hv) = node_size(lg, v);
    let cu = placement.centers[u];
    let cv = placement.centers[v];

    // Right quarter of each side; forward edges stay within the middle half.
    let side = |w: f64| w / 4.0 * (1.0 + fraction);
    Anchors {
        start: Point::new(cu.x + side(wu), cu.y + hu / 2.0),
        end: Point::new(cv.x + side(wv), cv.y - hv / 2.0),
    }
}

fn gap_mid(placement: &Placement, opts: &LayoutOptions, rank: usize) -> f64 {
    placement.rank_bottom(rank) + opts.rank_spacing / 2.0
}

fn push_elbow(points: &mut Vec<Point>, from_x: f64, to_x: f64, y: f64) {
    if (from_x - to_x).abs() > EPSILON {
        points.push(Point::new(from_x, y));
        points.push(Point::new(to_x, y));
    }
}

#[allow(clippy::too_many_arguments)]
fn route_forward_edge(
    lg: &LayerGraph,
    ranking: &Ranking,
    placement: &Placement,
    opts: &LayoutOptions,
    e: usize,
    u: usize,
    v: usize,
    label: &EdgeLabel,
) -> Vec<Point> {
    let Anchors { start, end } = forward_anchors(lg, placement, opts, u, v, label);
    let mut points = vec![start];
    let mut x = start.x;
    let mut rank = ranking.rank[u];

    for &d in lg.chains.get(e).map(Vec::as_slice).unwrap_or(&[]) {
        let Some(dummy) = lg.node(d) else {
            continue;
        };
        let dx = placement.centers[d].x;
        push_elbow(&mut points, x, dx, gap_mid(placement, opts, rank));
        points.push(Point::new(dx, placement.rank_top[dummy.rank]));
        points.push(Point::new(dx, placement.rank_bottom(dummy.rank)));
        x = dx;
        rank = dummy.rank;
    }

    push_elbow(&mut points, x, end.x, gap_mid(placement, opts, rank));
    points.push(end);
    points
}

fn route_back_edge(
    lg: &LayerGraph,
    ranking: &Ranking,
    placement: &Placement,
    opts: &LayoutOptions,
    e: usize,
    u: usize,
    v: usize,
) -> Vec<Point> {
    let band = placement.bands[ranking.group_of[u]];
    let k = ranking.lane.get(e).copied().flatten().unwrap_or(0);
    let fraction = lane_fraction(k, band.lanes);
    let Anchors { start, end } = back_anchors(lg, placement, u, v, fraction);
    let lane_x = band.lane_x(k, opts.back_edge_spacing);

    // Forward elbows sit at the gap middle; lane horizontals stay strictly nearer the nodes.
    let reach = opts.rank_spacing / 2.0 * fraction;
    let below = placement.rank_bottom(ranking.rank[u]) + reach;
    let above = placement.rank_top[ranking.rank[v]] - reach;

    vec![
        start,
        Point::new(start.x, below),
        Point::new(lane_x, below),
        Point::new(lane_x, above),
        Point::new(end.x, above),
        end,
    ]
}

/// Drops repeated points and the middle point of straight runs.
fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out
            .last()
            .is_some_and(|q| (q.x - p.x).abs() <= EPSILON && (q.y - p.y).abs() <= EPSILON)
        {
            continue;
        }
        let straight = match out.as_slice() {
            [.., a, b] => {
                let vertical = (a.x - b.x).abs() <= EPSILON && (b.x - p.x).abs() <= EPSILON;
                let horizontal = (a.y - b.y).abs() <= EPSILON && (b.y - p.y).abs() <= EPSILON;
                vertical || horizontal
            }
            _ => false,
        };
        if straight {
            out.pop();
        }
        out.push(p);
    }
    out
}
