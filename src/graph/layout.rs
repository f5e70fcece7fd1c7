//! Relatedness-driven force-directed layout.
//!
//! Every tick visits each ordered node pair `(i, j)` and picks forces by
//! degree, relatedness and parent/child role:
//! - Leaves and single-parent nodes snap toward their parent
//! - Isolated nodes are parked on a circle around the canvas center
//! - Low-degree nodes are drawn toward related, much higher-degree nodes
//! - Weakly related nodes and hubs push each other apart
//!
//! Positions are updated in place as pairs are visited. No update ever
//! commits a NaN or infinite coordinate.

use super::adapter::GraphAdapter;
use super::crossing;
use super::force::{Damping, Force, Strength};
use super::paths::{paths_between, UndirectedPath};
use super::relatedness::{hub_degrees, Relatedness};
use super::types::{EdgePosition, NodePosition, Point, TickStats};
use crate::error::{Error, Result};
use crate::settings::LayoutSettings;
use fixedbitset::FixedBitSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

pub struct ForceLayout {
    settings: LayoutSettings,
    damping: Damping,
    /// Undirected adjacency, snapshotted at construction
    neighbors: Vec<FixedBitSet>,
    parents: Vec<FixedBitSet>,
    degrees: Vec<usize>,
    /// One entry per adjacent pair, oriented along the directed edge
    edges: Vec<(usize, usize)>,
    hubs: BTreeSet<usize>,
    relatedness: Relatedness,
    xs: Vec<f64>,
    ys: Vec<f64>,
    stats: TickStats,
    ticks: u64,
    rng: StdRng,
}

impl ForceLayout {
    /// Lay out `graph` on a `width` × `height` canvas with default settings
    /// and random initial positions.
    pub fn new<G: GraphAdapter + ?Sized>(graph: &G, width: f64, height: f64) -> Result<Self> {
        let settings = LayoutSettings {
            canvas_width: width,
            canvas_height: height,
            ..LayoutSettings::default()
        };
        Self::with_settings(graph, settings, StdRng::from_entropy())
    }

    /// Like [`ForceLayout::new`], with reproducible initial positions.
    pub fn with_seed<G: GraphAdapter + ?Sized>(
        graph: &G,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self> {
        let settings = LayoutSettings {
            canvas_width: width,
            canvas_height: height,
            ..LayoutSettings::default()
        };
        Self::with_settings(graph, settings, StdRng::seed_from_u64(seed))
    }

    /// Build from settings, seeding from `settings.seed` when present.
    pub fn from_settings<G: GraphAdapter + ?Sized>(
        graph: &G,
        settings: LayoutSettings,
    ) -> Result<Self> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_settings(graph, settings, rng)
    }

    /// Build with explicit settings and random source.
    ///
    /// Relatedness is computed here, once; its cost grows quickly with graph
    /// density (see [`LayoutSettings::path_limit`]).
    pub fn with_settings<G: GraphAdapter + ?Sized>(
        graph: &G,
        settings: LayoutSettings,
        mut rng: StdRng,
    ) -> Result<Self> {
        let size = graph.node_count();
        if size == 0 {
            return Err(Error::EmptyGraph);
        }
        let (width, height) = (settings.canvas_width, settings.canvas_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::CanvasSize { width, height });
        }

        let snapshot = |mut set: FixedBitSet| {
            set.grow(size);
            set
        };
        let neighbors: Vec<FixedBitSet> = (0..size).map(|i| snapshot(graph.neighbors(i))).collect();
        let parents: Vec<FixedBitSet> = (0..size).map(|i| snapshot(graph.parents(i))).collect();
        let degrees: Vec<usize> = neighbors.iter().map(|n| n.count_ones(..)).collect();

        let mut edges = Vec::new();
        for (a, adjacent) in neighbors.iter().enumerate() {
            for b in adjacent.ones().filter(|&b| b > a) {
                if graph.has_edge(a, b) {
                    edges.push((a, b));
                } else {
                    edges.push((b, a));
                }
            }
        }

        let hubs = hub_degrees(&degrees);
        let relatedness = Relatedness::compute(&neighbors, settings.path_limit);

        // Random initial positions around the canvas center
        let (center_x, center_y) = (width / 2.0, height / 2.0);
        let xs = (0..size).map(|_| perturb(&mut rng, center_x, width)).collect();
        let ys = (0..size).map(|_| perturb(&mut rng, center_y, height)).collect();

        tracing::info!(
            nodes = size,
            edges = edges.len(),
            hub_degrees = ?hubs,
            min_relatedness = relatedness.min(),
            max_relatedness = relatedness.max(),
            "layout initialized"
        );

        Ok(Self {
            damping: Damping::new(settings.damping),
            settings,
            neighbors,
            parents,
            degrees,
            edges,
            hubs,
            relatedness,
            xs,
            ys,
            stats: TickStats::default(),
            ticks: 0,
            rng,
        })
    }

    /// Advance the simulation by one tick.
    pub fn iterate(&mut self) {
        self.stats = TickStats::default();
        self.ticks += 1;

        let size = self.node_count();
        for i in 0..size {
            for j in 0..size {
                if i == j {
                    continue;
                }

                // Structural placement moves j and ends this pair
                let placement = self.placement_force(i, j);
                if !placement.is_none() {
                    self.commit(j, &placement);
                    continue;
                }

                let force = self.pair_force(i, j);
                self.commit(i, &force);
            }
        }

        if self.settings.resolve_crossings {
            self.resolve_crossings();
        }

        tracing::debug!(
            tick = self.ticks,
            max_displacement = self.stats.max_displacement,
            updates = self.stats.updates,
            "tick complete"
        );
    }

    /// Snapping of children toward `i` and parking of isolated nodes.
    /// Returns [`Force::None`] when neither applies to `j`.
    fn placement_force(&self, i: usize, j: usize) -> Force {
        let jcard = self.degrees[j];
        let s = &self.settings;
        let mut force = Force::None;

        let sole_neighbor = jcard == 1 && self.neighbors[j].contains(i);
        let sole_parent = jcard == 2
            && self.parents[j].count_ones(..) == 1
            && self.parents[j].contains(i);
        if sole_neighbor || sole_parent {
            force = Force::attraction(self.position(i), s.snap_horizon, 1.0, 0.0, s.attraction_rate);
        }

        if jcard == 0 {
            let center = self.canvas_center();
            let angle = ((i * j) % 360) as f64;
            let spot = center.polar(angle, s.canvas_width * s.isolated_orbit_factor);
            force = Force::place(spot).and(Force::simple(center, Strength::NoDropoff.negate()));
        }

        force
    }

    /// The force `j` exerts on `i` when no structural placement applies.
    fn pair_force(&self, i: usize, j: usize) -> Force {
        let s = &self.settings;
        let icard = self.degrees[i];
        let jcard = self.degrees[j];
        let rel = self.relatedness.get(i, j);
        let min_rel = self.relatedness.min();
        let pos_j = self.position(j);
        let mut force = Force::None;

        if icard < jcard && jcard - icard > s.degree_gap {
            // Drawn toward a much better connected, related node
            if rel > s.related_threshold {
                let horizon = s.snap_horizon.max(s.horizon_per_degree * (icard as f64 + 1.0));
                force = force.and(Force::attraction(
                    pos_j,
                    horizon,
                    rel,
                    min_rel,
                    s.attraction_rate,
                ));
                if !self.neighbors[j].is_disjoint(&self.neighbors[i]) {
                    force = force.and(Force::rotational(
                        pos_j,
                        Strength::InverseSquare.negate(),
                        s.rotation_max_angle,
                    ));
                }
            }
        } else if rel <= min_rel * s.weak_relation_factor {
            force = self.repulsion(pos_j, s.far_repulsion_radius).and(force);
        }

        if self.hubs.contains(&icard) && self.hubs.contains(&jcard) {
            // Hubs push each other apart hard
            let factor = if rel > 1.0 {
                rel * s.hub_repulsion_factor
            } else {
                s.hub_repulsion_factor * (1.0 / rel)
            };
            let strength = Strength::Linear
                .multiply(factor)
                .negate()
                .bound(s.hub_repulsion_bound);
            force = Force::simple(pos_j, strength).and(force);
        } else {
            force = self.repulsion(pos_j, s.near_repulsion_radius).or(force);
        }

        force
    }

    fn repulsion(&self, center: Point, threshold: f64) -> Force {
        Force::repulsion(
            center,
            threshold,
            self.settings.repulsion_angle_step,
            self.settings.repulsion_push,
        )
    }

    fn commit(&mut self, node: usize, force: &Force) {
        let next = force.apply(self.position(node), &self.damping);
        self.update(node, next);
    }

    /// Write a new position, keeping the old value of any non-finite axis.
    pub(crate) fn update(&mut self, node: usize, next: Point) {
        if next.x.is_finite() {
            self.stats.record_x(self.xs[node], next.x);
            self.xs[node] = next.x;
        }
        if next.y.is_finite() {
            self.stats.record_y(self.ys[node], next.y);
            self.ys[node] = next.y;
        }
    }

    fn resolve_crossings(&mut self) {
        let s = &self.settings;
        let (nudge, min_length) = (s.crossing_nudge, s.crossing_min_length);
        let rng = &mut self.rng;
        let nudges = crossing::plan_nudges(
            &self.xs,
            &self.ys,
            &self.edges,
            nudge,
            min_length,
            || rng.gen_ratio(1, 7),
        );
        for n in nudges {
            self.update(n.node, n.to);
        }
    }

    // Positions

    pub fn x(&self, node: usize) -> f64 {
        self.xs[node]
    }

    pub fn y(&self, node: usize) -> f64 {
        self.ys[node]
    }

    pub fn position(&self, node: usize) -> Point {
        Point::new(self.xs[node], self.ys[node])
    }

    /// Override a node's position, e.g. after the user drags it. Non-finite
    /// coordinates are ignored.
    pub fn set_position(&mut self, node: usize, x: f64, y: f64) {
        if x.is_finite() {
            self.xs[node] = x;
        }
        if y.is_finite() {
            self.ys[node] = y;
        }
    }

    /// Every node's current position, in index order.
    pub fn positions(&self) -> impl Iterator<Item = NodePosition> + '_ {
        (0..self.node_count()).map(move |node| NodePosition {
            node,
            x: self.xs[node],
            y: self.ys[node],
        })
    }

    /// Current endpoints of every adjacency.
    pub fn edges(&self) -> impl Iterator<Item = EdgePosition> + '_ {
        self.edges.iter().map(move |&(source, target)| EdgePosition {
            source,
            source_x: self.xs[source],
            source_y: self.ys[source],
            target,
            target_x: self.xs[target],
            target_y: self.ys[target],
        })
    }

    /// First node whose position satisfies `predicate`.
    pub fn find_node(&self, mut predicate: impl FnMut(usize, f64, f64) -> bool) -> Option<usize> {
        (0..self.node_count()).find(|&node| predicate(node, self.xs[node], self.ys[node]))
    }

    /// First node within `radius` of `(x, y)`.
    pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        self.find_node(|_, nx, ny| (nx - x).hypot(ny - y) <= radius)
    }

    /// Position relative to the top-left corner of the last tick's bounds.
    pub fn normalized(&self, node: usize) -> Point {
        let min_x = if self.stats.min_x.is_finite() { self.stats.min_x } else { 0.0 };
        let min_y = if self.stats.min_y.is_finite() { self.stats.min_y } else { 0.0 };
        Point::new(self.xs[node] - min_x, self.ys[node] - min_y)
    }

    /// Size of the last tick's bounds, falling back to the canvas size on
    /// an axis with no spread.
    pub fn extent(&self) -> (f64, f64) {
        let width = self
            .stats
            .width()
            .filter(|w| *w > 0.0)
            .unwrap_or(self.settings.canvas_width);
        let height = self
            .stats
            .height()
            .filter(|h| *h > 0.0)
            .unwrap_or(self.settings.canvas_height);
        (width, height)
    }

    // Statistics for the last tick

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    pub fn min_x(&self) -> f64 {
        self.stats.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.stats.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.stats.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.stats.max_y
    }

    pub fn max_displacement(&self) -> f64 {
        self.stats.max_displacement
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Static graph data

    pub fn node_count(&self) -> usize {
        self.xs.len()
    }

    pub fn cardinality(&self, node: usize) -> usize {
        self.degrees[node]
    }

    pub fn is_hub(&self, node: usize) -> bool {
        self.hubs.contains(&self.degrees[node])
    }

    pub fn hub_degrees(&self) -> &BTreeSet<usize> {
        &self.hubs
    }

    pub fn relatedness(&self) -> &Relatedness {
        &self.relatedness
    }

    /// Simple undirected paths between two nodes, shortest first.
    pub fn paths_between(&self, src: usize, dst: usize) -> Vec<UndirectedPath> {
        paths_between(&self.neighbors, src, dst, self.settings.path_limit)
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn canvas_center(&self) -> Point {
        Point::new(self.settings.canvas_width / 2.0, self.settings.canvas_height / 2.0)
    }
}

/// A random offset of up to half of `span` either side of `center`.
fn perturb(rng: &mut StdRng, center: f64, span: f64) -> f64 {
    let amount: f64 = rng.gen();
    let dir = if rng.gen::<bool>() { 1.0 } else { -1.0 };
    center + (span / 2.0) * amount * dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adapter::IntGraph;
    use crate::graph::fixtures;

    fn seeded(graph: &IntGraph, settings: LayoutSettings) -> ForceLayout {
        ForceLayout::with_settings(graph, settings, StdRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn test_empty_graph_rejected() {
        let graph = IntGraph::with_nodes(0);
        assert!(matches!(
            ForceLayout::new(&graph, 800.0, 600.0),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn test_bad_canvas_rejected() {
        let graph = fixtures::pair();
        assert!(matches!(
            ForceLayout::new(&graph, 0.0, 600.0),
            Err(Error::CanvasSize { .. })
        ));
        assert!(matches!(
            ForceLayout::new(&graph, 800.0, f64::NAN),
            Err(Error::CanvasSize { .. })
        ));
    }

    #[test]
    fn test_initial_positions_within_canvas() {
        let layout = ForceLayout::with_seed(&fixtures::two_hubs(), 800.0, 600.0, 3).unwrap();
        for p in layout.positions() {
            assert!((0.0..=800.0).contains(&p.x), "{p:?}");
            assert!((0.0..=600.0).contains(&p.y), "{p:?}");
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let graph = fixtures::three_hubs();
        let mut a = ForceLayout::with_seed(&graph, 1536.0, 1024.0, 99).unwrap();
        let mut b = ForceLayout::with_seed(&graph, 1536.0, 1024.0, 99).unwrap();
        for _ in 0..10 {
            a.iterate();
            b.iterate();
        }
        let pa: Vec<_> = a.positions().collect();
        let pb: Vec<_> = b.positions().collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_star_degrees_and_hubs() {
        let layout = ForceLayout::with_seed(&fixtures::star(), 1536.0, 1024.0, 1).unwrap();
        assert_eq!(layout.cardinality(0), 3);
        assert_eq!(layout.cardinality(1), 1);
        assert!((0..4).all(|n| layout.is_hub(n)));
        assert_eq!(layout.relatedness().get(1, 2), 0.5);
        assert_eq!(layout.paths_between(1, 2).len(), 1);
    }

    #[test]
    fn test_snapping_pulls_leaf_in() {
        let mut layout = ForceLayout::with_seed(&fixtures::pair(), 1536.0, 1024.0, 5).unwrap();
        layout.set_position(0, 100.0, 100.0);
        layout.set_position(1, 500.0, 100.0);
        let before = layout.position(0).distance(layout.position(1));
        layout.iterate();
        let after = layout.position(0).distance(layout.position(1));
        assert!(after < before, "{after} !< {before}");
    }

    #[test]
    fn test_snapping_inside_horizon_leaves_pair_alone() {
        let mut layout = ForceLayout::with_seed(&fixtures::pair(), 1536.0, 1024.0, 5).unwrap();
        layout.set_position(0, 100.0, 100.0);
        layout.set_position(1, 130.0, 100.0);
        layout.iterate();
        assert_eq!(layout.position(0), Point::new(100.0, 100.0));
        assert_eq!(layout.position(1), Point::new(130.0, 100.0));
        assert_eq!(layout.max_displacement(), 0.0);
    }

    #[test]
    fn test_max_displacement_matches_moves() {
        // In a single-edge graph each node is moved exactly once per tick
        let mut layout = ForceLayout::with_seed(&fixtures::pair(), 1536.0, 1024.0, 8).unwrap();
        layout.set_position(0, 0.0, 0.0);
        layout.set_position(1, 300.0, 400.0);
        let before: Vec<_> = layout.positions().collect();
        layout.iterate();
        let after: Vec<_> = layout.positions().collect();

        let expected = before
            .iter()
            .zip(&after)
            .flat_map(|(b, a)| [(a.x - b.x).abs(), (a.y - b.y).abs()])
            .fold(0.0, f64::max);
        assert!(expected > 0.0);
        assert_eq!(layout.max_displacement(), expected);
        assert_eq!(layout.stats().updates, 4);
        assert_eq!(layout.ticks(), 1);
    }

    #[test]
    fn test_isolated_node_parked_on_circle() {
        let mut graph = IntGraph::with_nodes(4);
        graph.add_edge(0, 2);
        graph.add_edge(2, 3);

        for seed in 0..20 {
            let mut layout = ForceLayout::with_seed(&graph, 1536.0, 1024.0, seed).unwrap();
            for other in [0, 2, 3] {
                assert_eq!(layout.relatedness().get(1, other), 0.0);
            }

            layout.iterate();

            let center = layout.canvas_center();
            let settings = layout.settings();
            let radius = settings.canvas_width * settings.isolated_orbit_factor;
            let dist = layout.position(1).distance(center);
            assert!(
                (dist - radius).abs() <= settings.repulsion_push + 1e-9,
                "seed {seed}: dist {dist}"
            );
            // Last placement this tick came from node 3: angle (3 * 1) mod 360
            assert!((layout.position(1).angle_from(center) - 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_isolated_nodes_leave_center() {
        let graph = IntGraph::with_nodes(3);
        let mut layout = seeded(&graph, LayoutSettings::default());
        let center = layout.canvas_center();
        for node in 0..3 {
            layout.set_position(node, center.x, center.y);
        }
        layout.iterate();
        for node in 0..3 {
            assert!(layout.position(node).distance(center) > 0.0);
            assert!(layout.position(node).is_finite());
        }
    }

    #[test]
    fn test_damped_moves_are_partial() {
        let settings = LayoutSettings {
            damping: 0.5,
            ..LayoutSettings::default()
        };
        let mut damped = seeded(&fixtures::pair(), settings);
        let mut full = seeded(&fixtures::pair(), LayoutSettings::default());
        for layout in [&mut damped, &mut full] {
            layout.set_position(0, 100.0, 100.0);
            layout.set_position(1, 500.0, 100.0);
        }
        // Node 1 snaps first: a 60 step toward node 0, halved when damped
        damped.iterate();
        full.iterate();
        assert_eq!(full.x(1), 440.0);
        assert_eq!(damped.x(1), 470.0);
    }

    #[test]
    fn test_set_position_ignores_non_finite() {
        let mut layout = ForceLayout::with_seed(&fixtures::triple(), 800.0, 600.0, 2).unwrap();
        layout.set_position(1, 10.0, 20.0);
        layout.set_position(1, f64::NAN, f64::INFINITY);
        assert_eq!((layout.x(1), layout.y(1)), (10.0, 20.0));
    }

    #[test]
    fn test_coincident_nodes_stay_finite() {
        let mut layout = ForceLayout::with_seed(&fixtures::two_hubs(), 800.0, 600.0, 4).unwrap();
        for node in 0..layout.node_count() {
            layout.set_position(node, 400.0, 300.0);
        }
        for _ in 0..20 {
            layout.iterate();
        }
        assert!(layout.positions().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_positions_and_edges_restart() {
        let layout = ForceLayout::with_seed(&fixtures::star(), 800.0, 600.0, 6).unwrap();
        assert_eq!(layout.positions().count(), 4);
        assert_eq!(layout.positions().count(), 4);

        let edges: Vec<_> = layout.edges().collect();
        assert_eq!(edges.len(), 3);
        for e in &edges {
            assert_eq!(e.source, 0);
            assert_eq!((e.source_x, e.source_y), (layout.x(0), layout.y(0)));
            assert_eq!((e.target_x, e.target_y), (layout.x(e.target), layout.y(e.target)));
        }
        assert_eq!(layout.edges().count(), 3);
    }

    #[test]
    fn test_hit_testing() {
        let mut layout = ForceLayout::with_seed(&fixtures::triple(), 800.0, 600.0, 2).unwrap();
        layout.set_position(0, 0.0, 0.0);
        layout.set_position(1, 100.0, 100.0);
        layout.set_position(2, 200.0, 200.0);
        assert_eq!(layout.node_at(102.0, 99.0, 5.0), Some(1));
        assert_eq!(layout.node_at(50.0, 50.0, 5.0), None);
        assert_eq!(layout.find_node(|_, x, _| x > 150.0), Some(2));
    }

    #[test]
    fn test_extent_and_normalized() {
        let mut layout = ForceLayout::with_seed(&fixtures::three_hubs(), 1536.0, 1024.0, 9).unwrap();
        // Nothing committed yet
        assert_eq!(layout.extent(), (1536.0, 1024.0));
        layout.iterate();
        let (w, h) = layout.extent();
        assert!(w > 0.0 && h > 0.0);
        let stats = *layout.stats();
        assert!(stats.min_x <= stats.max_x);
        let n = layout.normalized(0);
        assert_eq!(n.x, layout.x(0) - stats.min_x);
        assert_eq!(n.y, layout.y(0) - stats.min_y);
    }

    #[test]
    fn test_crossing_pass_keeps_positions_finite() {
        let settings = LayoutSettings {
            resolve_crossings: true,
            crossing_min_length: 0.0,
            ..LayoutSettings::default()
        };
        let mut layout = seeded(&fixtures::three_hubs_connected_more(), settings);
        for _ in 0..15 {
            layout.iterate();
        }
        assert!(layout.positions().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_single_parent_snaps_child() {
        // 0 -> 1 -> 2: node 1 has degree 2 and node 0 as its only parent
        let mut layout = ForceLayout::with_seed(&fixtures::triple(), 1536.0, 1024.0, 3).unwrap();
        layout.set_position(0, 100.0, 100.0);
        layout.set_position(1, 400.0, 100.0);
        let parent = layout.position(0);

        let force = layout.placement_force(0, 1);
        assert_eq!(force, Force::attraction(parent, 60.0, 1.0, 0.0, 0.25));
        let moved = force.apply(layout.position(1), &Damping::NONE);
        assert_eq!(moved, Point::new(340.0, 100.0));

        // Node 2 is a child of node 1, not its parent
        assert!(layout.placement_force(2, 1).is_none());
    }

    /// Hub 0 with six neighbors; node 6 also links to node 1.
    fn hub_with_shortcut() -> IntGraph {
        IntGraph::from_pairs(&[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (6, 1)])
    }

    #[test]
    fn test_degree_gap_attraction_with_rotation() {
        let mut layout =
            ForceLayout::with_seed(&hub_with_shortcut(), 1536.0, 1024.0, 3).unwrap();
        layout.set_position(0, 500.0, 500.0);
        layout.set_position(6, 900.0, 500.0);
        let hub = layout.position(0);
        let min_rel = layout.relatedness().min();
        assert_eq!(layout.relatedness().get(6, 0), 1.5);
        assert_eq!(layout.hub_degrees(), &BTreeSet::from([2, 6]));
        assert!(layout.placement_force(6, 0).is_none());

        // Nodes 6 and 0 share neighbor 1, so the pull comes with a rotation;
        // both degrees are hub degrees and rel > 1, so the push is 4 * rel
        let expected = Force::simple(hub, Strength::Linear.multiply(6.0).negate().bound(500.0))
            .and(
                Force::attraction(hub, 60.0, 1.5, min_rel, 0.25).and(Force::rotational(
                    hub,
                    Strength::InverseSquare.negate(),
                    360.0,
                )),
            );
        let force = layout.pair_force(6, 0);
        assert_eq!(force, expected);

        let moved = force.apply(layout.position(6), &Damping::NONE);
        assert!(moved.distance(hub) < 400.0 - 50.0, "{moved:?}");
    }

    #[test]
    fn test_degree_gap_attraction_without_shared_neighbor() {
        let layout = ForceLayout::with_seed(&hub_with_shortcut(), 1536.0, 1024.0, 3).unwrap();
        let hub = layout.position(0);
        let min_rel = layout.relatedness().min();

        // Leaf 2 is not a hub degree, so near repulsion is the alternative
        let expected = Force::repulsion(hub, 25.0, 2.0, 1.0)
            .or(Force::attraction(hub, 60.0, 1.0, min_rel, 0.25));
        assert_eq!(layout.pair_force(2, 0), expected);
    }

    #[test]
    fn test_hub_push_weak_relation() {
        // Leaves of a star: rel 0.5, so the push is 4 / rel
        let layout = ForceLayout::with_seed(&fixtures::star(), 1536.0, 1024.0, 3).unwrap();
        let other = layout.position(2);
        let expected = Force::simple(other, Strength::Linear.multiply(8.0).negate().bound(500.0))
            .and(Force::repulsion(other, 80.0, 2.0, 1.0));
        assert_eq!(layout.pair_force(1, 2), expected);
    }

    #[test]
    fn test_hub_push_unrelated_is_bounded() {
        let graph = IntGraph::from_pairs(&[(0, 1), (2, 3)]);
        let layout = ForceLayout::with_seed(&graph, 1536.0, 1024.0, 3).unwrap();
        assert_eq!(layout.relatedness().get(0, 2), 0.0);
        assert!(layout.placement_force(0, 2).is_none());

        match layout.pair_force(0, 2) {
            Force::And(first, second) => {
                let Force::Simple { target, strength } = first.as_ref() else {
                    panic!("expected a hub push, got {first:?}");
                };
                assert_eq!(*target, layout.position(2));
                for d in [1.0, 100.0, 1e6] {
                    assert_eq!(strength.at(d), -500.0);
                }
                assert!(matches!(
                    second.as_ref(),
                    Force::Repulsion { threshold, .. } if *threshold == 80.0
                ));
            }
            other => panic!("unexpected force {other:?}"),
        }
    }
}
