//! Borrowed adjacency-list view read by the solver.

/// A directed graph that hands out **borrowed** out-neighbor slices.
///
/// Nodes are `0..node_count()`. The solver reads every node's neighbors once per pass,
/// so implementations should not allocate in `neighbors_ref`.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
    fn is_dangling(&self, node: usize) -> bool {
        self.out_degree(node) == 0
    }
}

impl GraphRef for [Vec<usize>] {
    fn node_count(&self) -> usize {
        self.len()
    }
    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl GraphRef for Vec<Vec<usize>> {
    fn node_count(&self) -> usize {
        self.len()
    }
    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.as_slice().neighbors_ref(node)
    }
}

/// Adjacency list borrowed from the caller: `self.0[u]` holds the targets of `u`.
#[derive(Debug, Clone, Copy)]
pub struct AdjacencyList<'a>(pub &'a [Vec<usize>]);

impl<'a> GraphRef for AdjacencyList<'a> {
    fn node_count(&self) -> usize {
        self.0.len()
    }
    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.0.neighbors_ref(node)
    }
}
