//! Coordinate system adjustment helpers.
//!
//! Placement and routing assume a top-to-bottom frame. For left-to-right / right-to-left
//! layouts node extents are swapped before placement and the axes are swapped back afterwards;
//! bottom-to-top / right-to-left drawings are mirrored along the rank axis.

use crate::model::{Direction, LayoutResult};
use crate::normalize::LayerGraph;

pub fn adjust(lg: &mut LayerGraph, direction: Direction) {
    if direction.is_horizontal() {
        lg.graph.for_each_node_mut(|_ix, _id, n| {
            (n.width, n.height) = (n.height, n.width);
        });
    }
}

/// Maps a result laid out in the top-to-bottom frame (origin at the top-left of its bounding
/// box) into `result.direction`.
pub fn undo(result: &mut LayoutResult) {
    if result.direction.is_reversed() {
        reverse_y(result);
    }
    if result.direction.is_horizontal() {
        swap_xy(result);
    }
}

fn reverse_y(result: &mut LayoutResult) {
    let height = result.height;
    for n in &mut result.nodes {
        n.y = height - n.y - n.height;
    }
    for e in &mut result.edges {
        for p in &mut e.waypoints {
            p.y = height - p.y;
        }
    }
}

fn swap_xy(result: &mut LayoutResult) {
    for n in &mut result.nodes {
        (n.x, n.y) = (n.y, n.x);
        (n.width, n.height) = (n.height, n.width);
    }
    for e in &mut result.edges {
        for p in &mut e.waypoints {
            (p.x, p.y) = (p.y, p.x);
        }
    }
    (result.width, result.height) = (result.height, result.width);
}
