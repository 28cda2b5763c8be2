//! Layer assignment.
//!
//! Longest-path layering from the sources. Cycles are broken while the DFS runs: an edge that
//! reaches a node still on the DFS stack closes a cycle and becomes a feedback edge, which is
//! ignored for ranking and routed as a back edge later.

use crate::graph::LayoutGraph;
use crate::graphlib::alg;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Rank per node index.
    pub rank: Vec<usize>,
    /// DFS pre-order index per node index.
    pub discovery: Vec<usize>,
    /// Per edge index: the edge closes a cycle (self-loops included).
    pub feedback: Vec<bool>,
    /// Connected components ordered by first discovery, followed by the isolated nodes as one
    /// trailing group. Members are sorted by discovery.
    pub groups: Vec<Vec<usize>>,
    /// Group index per node index.
    pub group_of: Vec<usize>,
    /// Index of the isolated-node group in `groups`, if there are isolated nodes.
    pub isolated_group: Option<usize>,
    /// Back-edge lane per edge index, counted within the source's group. Feedback edges only.
    pub lane: Vec<Option<usize>>,
    /// Number of back-edge lanes per group.
    pub lane_count: Vec<usize>,
}

impl Ranking {
    pub fn rank_of(&self, g: &LayoutGraph, id: &str) -> Option<usize> {
        g.node_ix(id).and_then(|ix| self.rank.get(ix).copied())
    }

    pub fn max_rank(&self) -> Option<usize> {
        self.rank.iter().copied().max()
    }

    pub fn is_feedback(&self, edge_ix: usize) -> bool {
        self.feedback.get(edge_ix).copied().unwrap_or(false)
    }

    pub fn feedback_count(&self) -> usize {
        self.feedback.iter().filter(|&&f| f).count()
    }
}

pub fn assign_layers(g: &LayoutGraph) -> Ranking {
    let n = g.node_count();

    let mut by_id: Vec<usize> = (0..n).collect();
    by_id.sort_by(|&a, &b| g.node_id(a).cmp(&g.node_id(b)));

    // Sources first so that acyclic graphs are entered from the top; anything left over sits on
    // a cycle with no way in.
    let sources: Vec<usize> = {
        let mut is_source = vec![false; n];
        for ix in g.sources() {
            is_source[ix] = true;
        }
        by_id.iter().copied().filter(|&ix| is_source[ix]).collect()
    };
    let roots = sources.iter().chain(by_id.iter()).copied();

    let out_sorted: Vec<Vec<usize>> = (0..n)
        .map(|v| {
            let mut edges = g.out_edges_ix(v).to_vec();
            edges.sort_by(|&a, &b| cmp_edges_by_head(g, a, b));
            edges
        })
        .collect();

    let mut mark = vec![Mark::Unvisited; n];
    let mut discovery = vec![usize::MAX; n];
    let mut feedback = vec![false; g.edge_count()];
    let mut postorder: Vec<usize> = Vec::with_capacity(n);
    let mut next_discovery = 0usize;

    for root in roots {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        mark[root] = Mark::Active;
        discovery[root] = next_discovery;
        next_discovery += 1;

        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(&(v, cursor)) = stack.last() {
            let Some(&e) = out_sorted[v].get(cursor) else {
                mark[v] = Mark::Done;
                postorder.push(v);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let Some((_, w)) = g.edge_endpoints(e) else {
                continue;
            };
            match mark[w] {
                Mark::Active => feedback[e] = true,
                Mark::Unvisited => {
                    mark[w] = Mark::Active;
                    discovery[w] = next_discovery;
                    next_discovery += 1;
                    stack.push((w, 0));
                }
                Mark::Done => {}
            }
        }
    }

    // Reverse post-order is a topological order of the graph without its feedback edges.
    let mut rank = vec![0usize; n];
    for &v in postorder.iter().rev() {
        rank[v] = g
            .in_edges_ix(v)
            .iter()
            .filter(|&&e| !feedback[e])
            .filter_map(|&e| g.edge_endpoints(e))
            .map(|(u, _)| rank[u] + 1)
            .max()
            .unwrap_or(0);
    }

    let mut seeds: Vec<usize> = (0..n).collect();
    seeds.sort_by_key(|&v| discovery[v]);

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut isolated: Vec<usize> = Vec::new();
    for mut comp in alg::components(g, &seeds) {
        if comp.len() == 1 && g.is_isolated(comp[0]) {
            isolated.push(comp[0]);
            continue;
        }
        comp.sort_by_key(|&v| discovery[v]);
        groups.push(comp);
    }
    let isolated_group = if isolated.is_empty() {
        None
    } else {
        groups.push(isolated);
        Some(groups.len() - 1)
    };

    let mut group_of = vec![0usize; n];
    for (gi, group) in groups.iter().enumerate() {
        for &v in group {
            group_of[v] = gi;
        }
    }

    let mut back_edges: Vec<usize> = (0..g.edge_count()).filter(|&e| feedback[e]).collect();
    back_edges.sort_by(|&a, &b| cmp_edges_by_discovery(g, &discovery, a, b));
    let mut lane: Vec<Option<usize>> = vec![None; g.edge_count()];
    let mut lane_count = vec![0usize; groups.len()];
    for e in back_edges {
        let Some((u, _)) = g.edge_endpoints(e) else {
            continue;
        };
        let count = &mut lane_count[group_of[u]];
        lane[e] = Some(*count);
        *count += 1;
    }

    let ranking = Ranking {
        rank,
        discovery,
        feedback,
        groups,
        group_of,
        isolated_group,
        lane,
        lane_count,
    };
    tracing::debug!(
        nodes = n,
        feedback_edges = ranking.feedback_count(),
        max_rank = ?ranking.max_rank(),
        groups = ranking.groups.len(),
        "assigned layers"
    );
    ranking
}

fn cmp_edges_by_head(g: &LayoutGraph, a: usize, b: usize) -> Ordering {
    let head = |e: usize| g.edge_endpoints(e).and_then(|(_, w)| g.node_id(w));
    let id = |e: usize| g.edge_label_by_ix(e).map(|l| l.id.as_str());
    head(a).cmp(&head(b)).then_with(|| id(a).cmp(&id(b)))
}

fn cmp_edges_by_discovery(g: &LayoutGraph, discovery: &[usize], a: usize, b: usize) -> Ordering {
    let key = |e: usize| {
        let (u, v) = g.edge_endpoints(e).unwrap_or((0, 0));
        let id = g.edge_label_by_ix(e).map(|l| l.id.as_str());
        (discovery[u], discovery[v], id)
    };
    key(a).cmp(&key(b))
}
