//! Helper algorithms over [`Graph`].

use crate::Graph;
use std::collections::VecDeque;

/// Weakly connected components, as node indices.
///
/// Components are returned in the order of their first node in `seeds`; nodes inside a
/// component are in breadth-first order from that node. Nodes absent from `seeds` are still
/// reached through edges, but never start a component.
pub fn components<N, E>(g: &Graph<N, E>, seeds: &[usize]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; g.node_count()];
    let mut out: Vec<Vec<usize>> = Vec::new();

    for &start in seeds {
        if start >= seen.len() || seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<usize> = Vec::new();
        let mut q: VecDeque<usize> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for n in g.successors_ix(v).chain(g.predecessors_ix(v)) {
                if !seen[n] {
                    seen[n] = true;
                    q.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}
