//! Read-only graph views consumed by the layout engine.
//!
//! The engine only needs four capabilities from a graph: its size, the
//! undirected neighbor set of a node, the parent set of a node and a
//! directed edge test. [`IntGraph`] is a small bit-set graph for callers
//! that do not already have one; any `petgraph::Graph` works as well.

use fixedbitset::FixedBitSet;
use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::{Directed, Direction};

/// Capability interface the layout engine requires from a graph.
///
/// Node identity is positional: nodes are `0..node_count()`.
pub trait GraphAdapter {
    fn node_count(&self) -> usize;

    /// Nodes adjacent to `node` in either direction, excluding `node` itself.
    fn neighbors(&self, node: usize) -> FixedBitSet;

    /// Nodes with an edge pointing at `node`.
    fn parents(&self, node: usize) -> FixedBitSet;

    /// Whether a directed edge `from -> to` exists.
    fn has_edge(&self, from: usize, to: usize) -> bool;
}

/// Directed graph stored as per-node child and parent bit sets.
#[derive(Debug, Clone, Default)]
pub struct IntGraph {
    children: Vec<FixedBitSet>,
    parents: Vec<FixedBitSet>,
}

impl IntGraph {
    /// Create a graph with `count` nodes and no edges.
    pub fn with_nodes(count: usize) -> Self {
        Self {
            children: vec![FixedBitSet::with_capacity(count); count],
            parents: vec![FixedBitSet::with_capacity(count); count],
        }
    }

    /// Build a graph from directed `(parent, child)` pairs, sized to the
    /// largest index mentioned.
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Self {
        let count = pairs
            .iter()
            .map(|&(a, b)| a.max(b) + 1)
            .max()
            .unwrap_or(0);
        let mut graph = Self::with_nodes(count);
        for &(a, b) in pairs {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Add a directed edge, growing the graph if either index is new.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        let needed = from.max(to) + 1;
        if needed > self.children.len() {
            self.grow(needed);
        }
        self.children[from].insert(to);
        self.parents[to].insert(from);
    }

    pub fn children(&self, node: usize) -> &FixedBitSet {
        &self.children[node]
    }

    pub fn edge_count(&self) -> usize {
        self.children.iter().map(|c| c.count_ones(..)).sum()
    }

    fn grow(&mut self, count: usize) {
        for set in self.children.iter_mut().chain(self.parents.iter_mut()) {
            set.grow(count);
        }
        self.children.resize(count, FixedBitSet::with_capacity(count));
        self.parents.resize(count, FixedBitSet::with_capacity(count));
    }
}

impl GraphAdapter for IntGraph {
    fn node_count(&self) -> usize {
        self.children.len()
    }

    fn neighbors(&self, node: usize) -> FixedBitSet {
        let mut set = self.children[node].clone();
        set.union_with(&self.parents[node]);
        set.set(node, false);
        set
    }

    fn parents(&self, node: usize) -> FixedBitSet {
        self.parents[node].clone()
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.children[from].contains(to)
    }
}

impl<N, E, Ix: IndexType> GraphAdapter for Graph<N, E, Directed, Ix> {
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn neighbors(&self, node: usize) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(Graph::node_count(self));
        for n in self.neighbors_undirected(NodeIndex::new(node)) {
            if n.index() != node {
                set.insert(n.index());
            }
        }
        set
    }

    fn parents(&self, node: usize) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(Graph::node_count(self));
        for n in self.neighbors_directed(NodeIndex::new(node), Direction::Incoming) {
            set.insert(n.index());
        }
        set
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.contains_edge(NodeIndex::new(from), NodeIndex::new(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones(set: &FixedBitSet) -> Vec<usize> {
        set.ones().collect()
    }

    #[test]
    fn test_from_pairs_sizes_to_largest_index() {
        let graph = IntGraph::from_pairs(&[(0, 1), (1, 4)]);
        assert_eq!(GraphAdapter::node_count(&graph), 5);
        assert_eq!(graph.edge_count(), 2);
        assert!(ones(&GraphAdapter::neighbors(&graph, 3)).is_empty());
    }

    #[test]
    fn test_neighbors_are_undirected() {
        let graph = IntGraph::from_pairs(&[(0, 1), (2, 1)]);
        assert_eq!(ones(&GraphAdapter::neighbors(&graph, 1)), vec![0, 2]);
        assert_eq!(ones(&GraphAdapter::parents(&graph, 1)), vec![0, 2]);
        assert!(ones(&GraphAdapter::parents(&graph, 0)).is_empty());
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
    }

    #[test]
    fn test_self_loop_not_a_neighbor() {
        let graph = IntGraph::from_pairs(&[(0, 0), (0, 1)]);
        assert_eq!(ones(&GraphAdapter::neighbors(&graph, 0)), vec![1]);
    }

    #[test]
    fn test_add_edge_grows() {
        let mut graph = IntGraph::with_nodes(2);
        graph.add_edge(0, 1);
        graph.add_edge(1, 5);
        assert_eq!(GraphAdapter::node_count(&graph), 6);
        assert_eq!(ones(&GraphAdapter::neighbors(&graph, 1)), vec![0, 5]);
        assert_eq!(ones(graph.children(0)), vec![1]);
    }

    #[test]
    fn test_petgraph_matches_int_graph() {
        let pairs = [(0usize, 1usize), (0, 2), (2, 3), (3, 0)];
        let int_graph = IntGraph::from_pairs(&pairs);

        let mut pg: Graph<(), ()> = Graph::new();
        let nodes: Vec<_> = (0..4).map(|_| pg.add_node(())).collect();
        for &(a, b) in &pairs {
            pg.add_edge(nodes[a], nodes[b], ());
        }

        assert_eq!(GraphAdapter::node_count(&pg), 4);
        for i in 0..4 {
            assert_eq!(
                ones(&GraphAdapter::neighbors(&pg, i)),
                ones(&GraphAdapter::neighbors(&int_graph, i))
            );
            assert_eq!(
                ones(&GraphAdapter::parents(&pg, i)),
                ones(&GraphAdapter::parents(&int_graph, i))
            );
            for j in 0..4 {
                assert_eq!(
                    GraphAdapter::has_edge(&pg, i, j),
                    GraphAdapter::has_edge(&int_graph, i, j)
                );
            }
        }
    }
}
