//! Coordinate assignment in the top-to-bottom frame.
//!
//! Ranks stack downwards, each as tall as its tallest node plus `rank_spacing`. Within a rank,
//! nodes sit side by side `node_spacing` apart, and every layer is centered on the widest
//! layer of its group. Groups occupy consecutive bands along the x axis; a band reserves room
//! on its right for the back-edge lanes of its component.

use crate::model::Point;
use crate::normalize::LayerGraph;
use crate::options::LayoutOptions;
use crate::order::Ordering;
use crate::rank::Ranking;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    /// Extent of the widest layer.
    pub width: f64,
    /// Back-edge lanes reserved to the right of the widest layer.
    pub lanes: usize,
}

impl Band {
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// x coordinate of back-edge lane `k`.
    pub fn lane_x(&self, k: usize, spacing: f64) -> f64 {
        self.end() + spacing * (k + 1) as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Center per layer-graph node index.
    pub centers: Vec<Point>,
    pub rank_top: Vec<f64>,
    pub rank_extent: Vec<f64>,
    /// One band per ranking group.
    pub bands: Vec<Band>,
}

impl Placement {
    pub fn rank_bottom(&self, rank: usize) -> f64 {
        self.rank_top[rank] + self.rank_extent[rank]
    }
}

pub fn assign_coordinates(
    lg: &LayerGraph,
    ranking: &Ranking,
    ordering: &Ordering,
    opts: &LayoutOptions,
) -> Placement {
    let rank_count = ranking.max_rank().map(|r| r + 1).unwrap_or(0);

    let mut rank_extent = vec![0.0f64; rank_count];
    for v in 0..lg.node_count() {
        let Some(n) = lg.node(v) else {
            continue;
        };
        if let Some(extent) = rank_extent.get_mut(n.rank) {
            *extent = extent.max(n.height);
        }
    }

    let mut rank_top = Vec::with_capacity(rank_count);
    let mut y = 0.0f64;
    for extent in &rank_extent {
        rank_top.push(y);
        y += extent + opts.rank_spacing;
    }

    let width_of = |v: usize| lg.node(v).map(|n| n.width).unwrap_or(0.0);
    let layer_extent = |layer: &[usize]| -> f64 {
        if layer.is_empty() {
            return 0.0;
        }
        layer.iter().map(|&v| width_of(v)).sum::<f64>()
            + opts.node_spacing * (layer.len() - 1) as f64
    };

    let mut centers = vec![Point::default(); lg.node_count()];
    let mut bands = Vec::with_capacity(ordering.groups.len());
    let mut band_start = 0.0f64;
    for (gi, layers) in ordering.groups.iter().enumerate() {
        let band = Band {
            start: band_start,
            width: layers.iter().map(|l| layer_extent(l)).fold(0.0, f64::max),
            lanes: ranking.lane_count.get(gi).copied().unwrap_or(0),
        };

        for (r, layer) in layers.iter().enumerate() {
            let Some(&top) = rank_top.get(r) else {
                continue;
            };
            let cy = top + rank_extent[r] / 2.0;
            let mut x = band.start + (band.width - layer_extent(layer)) / 2.0;
            for &v in layer {
                let w = width_of(v);
                centers[v] = Point::new(x + w / 2.0, cy);
                x += w + opts.node_spacing;
            }
        }

        band_start =
            band.end() + band.lanes as f64 * opts.back_edge_spacing + opts.component_spacing;
        bands.push(band);
    }

    Placement {
        centers,
        rank_top,
        rank_extent,
        bands,
    }
}
