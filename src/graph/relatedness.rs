//! Pairwise relatedness derived from undirected paths.
//!
//! Each path of `L` edges between two nodes contributes `curve(L)`, so a
//! direct edge is worth 1, a two-step path 0.5 and so on. The matrix is
//! computed once per layout and never changes afterward.

use super::paths::search_paths;
use fixedbitset::FixedBitSet;
use std::collections::BTreeSet;

/// Diminishing-returns weight of a path with `edges` edges.
pub fn curve(edges: usize) -> f64 {
    if edges == 0 {
        return 1.0;
    }
    1.0 / edges as f64
}

/// Dense N×N relatedness matrix with its off-diagonal extremes.
#[derive(Debug, Clone, PartialEq)]
pub struct Relatedness {
    size: usize,
    values: Vec<f64>,
    min: f64,
    max: f64,
    /// Pairs whose path search was cut short by the limit
    truncated_pairs: usize,
}

impl Relatedness {
    /// Enumerate paths between every ordered pair and accumulate their weights.
    ///
    /// Cost grows quickly with graph density; `path_limit` bounds the number
    /// of paths counted per pair.
    pub fn compute(neighbors: &[FixedBitSet], path_limit: Option<usize>) -> Self {
        let size = neighbors.len();
        let mut values = vec![0.0; size * size];
        let mut truncated = 0usize;

        for a in 0..size {
            for b in 0..size {
                if a == b {
                    continue;
                }
                let found = search_paths(neighbors, a, b, path_limit);
                if found.truncated {
                    truncated += 1;
                }
                let paths = found.paths;
                let value: f64 = paths.iter().map(|p| curve(p.edge_count())).sum();
                tracing::trace!(a, b, value, paths = paths.len(), "relatedness");
                values[a * size + b] = value;
            }
        }

        if truncated > 0 {
            tracing::warn!(
                pairs = truncated,
                limit = ?path_limit,
                "path enumeration hit the limit, relatedness is partial"
            );
        }

        let (min, max) = off_diagonal_extremes(&values, size);
        Self {
            size,
            values,
            min,
            max,
            truncated_pairs: truncated,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Relatedness of `a` to `b`. The diagonal is always zero.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[a * self.size + b]
    }

    pub fn row(&self, a: usize) -> &[f64] {
        &self.values[a * self.size..(a + 1) * self.size]
    }

    /// Smallest off-diagonal value (0 for single-node graphs).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest off-diagonal value (0 for single-node graphs).
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of ordered pairs whose value is partial because of the path
    /// limit.
    pub fn truncated_pairs(&self) -> usize {
        self.truncated_pairs
    }
}

fn off_diagonal_extremes(values: &[f64], size: usize) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for a in 0..size {
        for b in 0..size {
            if a != b {
                let v = values[a * size + b];
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    if min > max {
        return (0.0, 0.0);
    }
    (min, max)
}

/// Degree values that count as hubs: the top third of the distinct degrees
/// present, and never fewer than the top two.
pub fn hub_degrees(degrees: &[usize]) -> BTreeSet<usize> {
    let distinct: BTreeSet<usize> = degrees.iter().copied().collect();
    let take = (distinct.len() / 3).max(2);
    distinct.iter().rev().take(take).copied().collect()
}
