//! The `Graph` container.
//!
//! Layout phases walk successors and predecessors many times per call, so both adjacency
//! directions are kept as per-node lists of edge indices and updated on every insert.

use hashbrown::Equivalent;
use rustc_hash::FxBuildHasher;
use std::hash::{Hash, Hasher};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy)]
pub struct GraphOptions {
    /// Keep named edges between the same ordered pair apart. When unset, names are dropped and
    /// a second edge between the pair replaces the first one's label.
    pub multigraph: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self { multigraph: true }
    }
}

#[derive(Debug, Clone)]
struct Node<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct Edge<E> {
    tail: usize,
    head: usize,
    label: E,
}

/// Identity of an edge in `edge_index`: endpoint indices plus the optional name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    tail: usize,
    head: usize,
    name: Option<String>,
}

/// Borrowed form of [`Slot`] for lookups without allocating.
#[derive(Clone, Copy)]
struct SlotRef<'a> {
    tail: usize,
    head: usize,
    name: Option<&'a str>,
}

// Both forms hash the same fields in the same order so borrowed lookups land in the same bucket.
impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ref().hash(state);
    }
}

impl Hash for SlotRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tail.hash(state);
        self.head.hash(state);
        self.name.hash(state);
    }
}

impl Equivalent<Slot> for SlotRef<'_> {
    fn equivalent(&self, key: &Slot) -> bool {
        self.tail == key.tail && self.head == key.head && self.name == key.name.as_deref()
    }
}

impl Slot {
    fn as_ref(&self) -> SlotRef<'_> {
        SlotRef {
            tail: self.tail,
            head: self.head,
            name: self.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    options: GraphOptions,

    nodes: Vec<Node<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<Edge<E>>,
    edge_index: HashMap<Slot, usize>,

    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E> Graph<N, E> {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn with_capacity(options: GraphOptions, nodes: usize, edges: usize) -> Self {
        let mut g = Self::new(options);
        g.nodes.reserve(nodes);
        g.node_index.reserve(nodes);
        g.edges.reserve(edges);
        g.edge_index.reserve(edges);
        g.out_adj.reserve(nodes);
        g.in_adj.reserve(nodes);
        g
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts a node or replaces the label of an existing one. Returns its index.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> usize {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix].label = label;
            return ix;
        }
        let ix = self.nodes.len();
        self.node_index.insert(id.clone(), ix);
        self.nodes.push(Node { id, label });
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        ix
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_ix(id).map(|ix| &self.nodes[ix].label)
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    pub fn node_label_by_ix(&self, ix: usize) -> Option<&N> {
        self.nodes.get(ix).map(|n| &n.label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(usize, &str, &N),
    {
        for (ix, n) in self.nodes.iter().enumerate() {
            f(ix, &n.id, &n.label);
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &str, &mut N),
    {
        for (ix, n) in self.nodes.iter_mut().enumerate() {
            f(ix, &n.id, &mut n.label);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `(tail_ix, head_ix)` of an edge.
    pub fn edge_endpoints(&self, edge_ix: usize) -> Option<(usize, usize)> {
        self.edges.get(edge_ix).map(|e| (e.tail, e.head))
    }

    pub fn edge_label_by_ix(&self, edge_ix: usize) -> Option<&E> {
        self.edges.get(edge_ix).map(|e| &e.label)
    }

    pub fn edge_ix(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        let slot = SlotRef {
            tail: self.node_ix(v)?,
            head: self.node_ix(w)?,
            name: if self.options.multigraph { name } else { None },
        };
        self.edge_index.get(&slot).copied()
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_ix(v, w, name).is_some()
    }

    /// Out-edge indices of `v_ix`, in insertion order.
    pub fn out_edges_ix(&self, v_ix: usize) -> &[usize] {
        self.out_adj.get(v_ix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// In-edge indices of `v_ix`, in insertion order.
    pub fn in_edges_ix(&self, v_ix: usize) -> &[usize] {
        self.in_adj.get(v_ix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn successors_ix(&self, v_ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_edges_ix(v_ix).iter().map(|&e| self.edges[e].head)
    }

    pub fn predecessors_ix(&self, v_ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_edges_ix(v_ix).iter().map(|&e| self.edges[e].tail)
    }

    /// Nodes with no incoming edges other than self-loops, in insertion order.
    pub fn sources(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&ix| self.predecessors_ix(ix).all(|u| u == ix))
            .collect()
    }

    /// True when the node has no incident edges at all.
    pub fn is_isolated(&self, v_ix: usize) -> bool {
        self.out_edges_ix(v_ix).is_empty() && self.in_edges_ix(v_ix).is_empty()
    }
}

impl<N: Default, E> Graph<N, E> {
    fn ensure_node(&mut self, id: String) -> usize {
        match self.node_ix(&id) {
            Some(ix) => ix,
            None => self.set_node(id, N::default()),
        }
    }

    /// Inserts an edge (creating missing endpoints with default labels) or replaces the label
    /// of the edge with the same endpoints and name. Returns the edge index.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: E,
    ) -> usize {
        let tail = self.ensure_node(v.into());
        let head = self.ensure_node(w.into());
        let name = name.filter(|_| self.options.multigraph).map(Into::into);
        let slot = Slot { tail, head, name };

        if let Some(&ix) = self.edge_index.get(&slot) {
            self.edges[ix].label = label;
            return ix;
        }

        let ix = self.edges.len();
        self.edges.push(Edge { tail, head, label });
        self.edge_index.insert(slot, ix);
        self.out_adj[tail].push(ix);
        self.in_adj[head].push(ix);
        ix
    }
}
