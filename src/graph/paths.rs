//! Enumeration of simple undirected paths between two nodes.
//!
//! The search walks adjacency in either direction and never revisits a node
//! already on the current path. Each ordered `(node, neighbor)` step is taken
//! at most once per search, which keeps the walk linear in the number of
//! edges. This means some simple paths in dense graphs are never reported,
//! and relatedness values depend on exactly this behavior.

use fixedbitset::FixedBitSet;
use std::cmp::Ordering;

/// A path as the sequence of node indices it visits, endpoints included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UndirectedPath {
    nodes: Vec<usize>,
}

impl UndirectedPath {
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of edges along the path.
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }
}

impl From<Vec<usize>> for UndirectedPath {
    fn from(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }
}

/// Shorter paths first, ties broken by node sequence.
impl Ord for UndirectedPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nodes
            .len()
            .cmp(&other.nodes.len())
            .then_with(|| self.nodes.cmp(&other.nodes))
    }
}

impl PartialOrd for UndirectedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All paths from `src` to `dst` over the given neighbor sets, sorted.
///
/// A direct edge is reported as the two-node path. When `limit` is set, the
/// search stops as soon as that many paths have been found.
pub fn paths_between(
    neighbors: &[FixedBitSet],
    src: usize,
    dst: usize,
    limit: Option<usize>,
) -> Vec<UndirectedPath> {
    search_paths(neighbors, src, dst, limit).paths
}

/// Outcome of one path search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSet {
    /// Shortest first
    pub paths: Vec<UndirectedPath>,
    /// The limit stopped the search while steps were still untried
    pub truncated: bool,
}

/// Like [`paths_between`], also reporting whether the limit cut it short.
pub fn search_paths(
    neighbors: &[FixedBitSet],
    src: usize,
    dst: usize,
    limit: Option<usize>,
) -> PathSet {
    if src == dst {
        return PathSet::default();
    }

    let size = neighbors.len();
    let mut search = PathSearch {
        neighbors,
        target: dst,
        size,
        seen: FixedBitSet::with_capacity(size * size),
        paths: Vec::new(),
        limit,
        truncated: false,
    };

    // Seed the direct edge so the step (src, dst) is never consumed elsewhere
    if neighbors[src].contains(dst) {
        search.mark(src, dst);
        if search.is_full() {
            search.truncated = true;
        } else {
            search.paths.push(UndirectedPath::from(vec![src, dst]));
        }
    }
    search.expand(src, vec![src]);

    let mut paths = search.paths;
    paths.sort();
    PathSet {
        paths,
        truncated: search.truncated,
    }
}

struct PathSearch<'a> {
    neighbors: &'a [FixedBitSet],
    target: usize,
    size: usize,
    /// Ordered (node, neighbor) steps already taken in this search
    seen: FixedBitSet,
    paths: Vec<UndirectedPath>,
    limit: Option<usize>,
    truncated: bool,
}

impl PathSearch<'_> {
    fn key(&self, from: usize, to: usize) -> usize {
        from * self.size + to
    }

    fn is_taken(&self, from: usize, to: usize) -> bool {
        self.seen.contains(self.key(from, to))
    }

    fn mark(&mut self, from: usize, to: usize) {
        let key = self.key(from, to);
        self.seen.insert(key);
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.paths.len() >= limit)
    }

    fn expand(&mut self, node: usize, base: Vec<usize>) {
        let neighbors = self.neighbors;
        for next in neighbors[node].ones() {
            if self.is_taken(node, next) {
                continue;
            }
            if self.is_full() {
                self.truncated = true;
                return;
            }
            self.mark(node, next);
            if next == self.target {
                let mut found = base.clone();
                found.push(next);
                self.paths.push(UndirectedPath::from(found));
            } else if !base.contains(&next) {
                let mut extended = base.clone();
                extended.push(next);
                self.expand(next, extended);
            }
        }
    }
}
