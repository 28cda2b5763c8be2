use crate::normalize::LayerGraph;

/// Initial layering of one group: a DFS from the nodes sorted by `(rank, seq)`, following
/// successors in `seq` order, appends each node to its rank's layer on first visit.
///
/// Input array order never enters here; `seq` comes from the ranking discovery order.
pub fn init_order(lg: &LayerGraph, members: &[usize]) -> Vec<Vec<usize>> {
    let Some(max_rank) = members
        .iter()
        .filter_map(|&v| lg.node(v).map(|n| n.rank))
        .max()
    else {
        return Vec::new();
    };

    let seq = |v: usize| lg.node(v).map(|n| n.seq).unwrap_or(usize::MAX);
    let rank = |v: usize| lg.node(v).map(|n| n.rank).unwrap_or(usize::MAX);

    let mut start: Vec<usize> = members.to_vec();
    start.sort_by_key(|&v| (rank(v), seq(v)));

    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    let mut visited = vec![false; lg.node_count()];
    let mut stack: Vec<usize> = Vec::new();

    for root in start {
        stack.push(root);
        while let Some(v) = stack.pop() {
            match visited.get_mut(v) {
                Some(seen) if !*seen => *seen = true,
                _ => continue,
            }
            if let Some(layer) = layers.get_mut(rank(v)) {
                layer.push(v);
            }
            let mut succ: Vec<usize> = lg.graph.successors_ix(v).collect();
            succ.sort_by_key(|&w| seq(w));
            succ.dedup();
            // Reversed so the lowest `seq` is popped first.
            stack.extend(succ.into_iter().rev());
        }
    }

    layers
}
