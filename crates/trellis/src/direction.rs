//! Layout orientation selection.

use crate::model::Direction;

/// Resolves the direction for a graph of `node_count` nodes.
///
/// An explicit direction always wins. Otherwise, with `auto` set, graphs below `threshold`
/// nodes read top-to-bottom like an approval chain and larger ones go left-to-right to keep
/// wide processes from scrolling vertically. Without `auto` the default is `TB`.
pub fn select(
    node_count: usize,
    explicit: Option<Direction>,
    auto: bool,
    threshold: usize,
) -> Direction {
    if let Some(direction) = explicit {
        return direction;
    }
    if auto && node_count >= threshold {
        return Direction::LR;
    }
    Direction::TB
}
