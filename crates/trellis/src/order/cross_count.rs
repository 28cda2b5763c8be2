use crate::normalize::LayerGraph;

/// Number of edge crossings between consecutive layers.
///
/// Every layer-graph edge joins adjacent ranks, so only consecutive layer pairs can cross.
pub fn cross_count(lg: &LayerGraph, layering: &[Vec<usize>]) -> usize {
    let mut cc = 0usize;
    for i in 1..layering.len() {
        cc += two_layer_cross_count(lg, &layering[i - 1], &layering[i]);
    }
    cc
}

/// Accumulator-tree count (Barth, Jünger and Mutzel).
fn two_layer_cross_count(lg: &LayerGraph, north: &[usize], south: &[usize]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos: Vec<Option<usize>> = vec![None; lg.node_count()];
    for (i, &v) in south.iter().enumerate() {
        if let Some(slot) = south_pos.get_mut(v) {
            *slot = Some(i);
        }
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = lg
            .graph
            .successors_ix(v)
            .filter_map(|w| south_pos.get(w).copied().flatten())
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0usize;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum = 0usize;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }

    cc
}
