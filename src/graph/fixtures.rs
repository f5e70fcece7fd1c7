//! Small hand-built graphs used by the driver binary and the tests.
//!
//! The hub graphs are clusters of leaves around a few high-degree nodes,
//! joined by short chains, which is the shape the layout heuristics were
//! tuned against.

use super::adapter::IntGraph;

/// A single edge `0 -> 1`.
pub fn pair() -> IntGraph {
    IntGraph::from_pairs(&[(0, 1)])
}

/// The chain `0 -> 1 -> 2`.
pub fn triple() -> IntGraph {
    IntGraph::from_pairs(&[(0, 1), (1, 2)])
}

/// Hub `0` with three leaves.
pub fn star() -> IntGraph {
    IntGraph::from_pairs(&[(0, 1), (0, 2), (0, 3)])
}

/// Two hubs (0 and 11) joined through node 6.
pub fn two_hubs() -> IntGraph {
    IntGraph::from_pairs(&TWO_HUBS)
}

/// Three hubs (0, 11 and 13) in a chain.
pub fn three_hubs() -> IntGraph {
    IntGraph::from_pairs(&THREE_HUBS)
}

/// [`three_hubs`] with the chain closed back onto the first hub.
pub fn three_hubs_connected() -> IntGraph {
    let mut graph = three_hubs();
    graph.add_edge(19, 3);
    graph
}

/// [`three_hubs_connected`] with an extra cross link and a long tail.
pub fn three_hubs_connected_more() -> IntGraph {
    let mut graph = three_hubs_connected();
    for (a, b) in [(19, 10), (20, 11), (21, 11), (21, 22), (22, 23), (23, 24), (24, 25)] {
        graph.add_edge(a, b);
    }
    graph
}

const TWO_HUBS: [(usize, usize); 11] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (2, 6),
    (6, 11),
    (7, 11),
    (8, 11),
    (9, 11),
    (10, 11),
];

const THREE_HUBS: [(usize, usize); 19] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (2, 6),
    (6, 11),
    (7, 11),
    (8, 11),
    (9, 11),
    (10, 11),
    (10, 12),
    (12, 13),
    (13, 14),
    (13, 15),
    (13, 16),
    (13, 17),
    (17, 18),
    (18, 19),
];
