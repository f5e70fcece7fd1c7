//! Best-effort untangling of crossing edges.
//!
//! For each pair of edges that cross and share no endpoint, the endpoint
//! closest to the crossing is nudged away from the other edge's line. Only
//! long edges are touched, and a gate (random in the engine) decides which
//! crossings are handled in a given tick so that the pass does not fight
//! the main forces.

use super::types::Point;

/// A planned move of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nudge {
    pub node: usize,
    pub to: Point,
}

/// Intersection of segments `a1-a2` and `b1-b2`, if they cross.
/// Parallel and collinear segments never intersect here.
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let r = (a2.x - a1.x, a2.y - a1.y);
    let s = (b2.x - b1.x, b2.y - b1.y);
    let denom = cross(r, s);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let offset = (b1.x - a1.x, b1.y - a1.y);
    let t = cross(offset, s) / denom;
    let u = cross(offset, r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(a1.x + r.0 * t, a1.y + r.1 * t))
    } else {
        None
    }
}

fn cross(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

/// Plan nudges for crossing edges, visiting edge pairs in index order.
///
/// `gate` is asked once per crossing and the crossing is skipped when it
/// returns false.
pub fn plan_nudges(
    xs: &[f64],
    ys: &[f64],
    edges: &[(usize, usize)],
    nudge: f64,
    min_length: f64,
    mut gate: impl FnMut() -> bool,
) -> Vec<Nudge> {
    let at = |node: usize| Point::new(xs[node], ys[node]);
    let mut nudges = Vec::new();

    for (index, &first) in edges.iter().enumerate() {
        for &second in &edges[index + 1..] {
            let (a, b) = first;
            let (c, d) = second;
            if a == c || a == d || b == c || b == d {
                continue;
            }
            let Some(hit) = segment_intersection(at(a), at(b), at(c), at(d)) else {
                continue;
            };
            if !gate() {
                continue;
            }

            // Endpoint nearest the crossing, with the edge it belongs to and
            // the edge it crosses
            let mut nearest = (a, first, second);
            let mut nearest_dist = at(a).distance(hit);
            for (node, own, other) in [(b, first, second), (c, second, first), (d, second, first)] {
                let dist = at(node).distance(hit);
                if dist < nearest_dist {
                    nearest = (node, own, other);
                    nearest_dist = dist;
                }
            }

            let (node, own, other) = nearest;
            if at(own.0).distance(at(own.1)) <= min_length {
                continue;
            }
            if let Some(to) = away_from_line(at(node), at(other.0), at(other.1), nudge) {
                nudges.push(Nudge { node, to });
            }
        }
    }

    nudges
}

/// Shift `p` by `amount` perpendicular to the line through `l1` and `l2`,
/// on the side it already lies on.
fn away_from_line(p: Point, l1: Point, l2: Point, amount: f64) -> Option<Point> {
    let len = l1.distance(l2);
    if !(len > 0.0) {
        return None;
    }
    let dir = ((l2.x - l1.x) / len, (l2.y - l1.y) / len);
    let normal = (-dir.1, dir.0);
    let side = if cross(dir, (p.x - l1.x, p.y - l1.y)) < 0.0 { -1.0 } else { 1.0 };
    let to = Point::new(p.x + normal.0 * side * amount, p.y + normal.1 * side * amount);
    to.is_finite().then_some(to)
}
