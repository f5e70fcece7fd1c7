//! Position and statistics types shared by the engine and its callers.

use serde::Serialize;

/// A point on the layout canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle in degrees of this point as seen from `center`.
    pub fn angle_from(&self, center: Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x).to_degrees()
    }

    /// The point at `angle` degrees and `radius` from `self`.
    pub fn polar(&self, angle: f64, radius: f64) -> Point {
        let radians = angle.to_radians();
        Point::new(
            self.x + radius * radians.cos(),
            self.y + radius * radians.sin(),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One node's position, as yielded by [`ForceLayout::positions`].
///
/// [`ForceLayout::positions`]: super::ForceLayout::positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub node: usize,
    pub x: f64,
    pub y: f64,
}

/// Both endpoints of one adjacency, oriented along the directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePosition {
    pub source: usize,
    pub source_x: f64,
    pub source_y: f64,
    pub target: usize,
    pub target_x: f64,
    pub target_y: f64,
}

/// Statistics over the coordinate updates committed during one tick.
///
/// Bounds only cover coordinates that were actually written in the tick, so
/// a node that did not move does not widen them. Before the first update the
/// minimums are `+inf` and the maximums `-inf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickStats {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Largest single-axis change of any committed update
    pub max_displacement: f64,
    /// Number of committed coordinate writes
    pub updates: usize,
}

impl Default for TickStats {
    fn default() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            max_displacement: 0.0,
            updates: 0,
        }
    }
}

impl TickStats {
    pub(crate) fn record_x(&mut self, old: f64, new: f64) {
        self.max_displacement = self.max_displacement.max((new - old).abs());
        self.min_x = self.min_x.min(new);
        self.max_x = self.max_x.max(new);
        self.updates += 1;
    }

    pub(crate) fn record_y(&mut self, old: f64, new: f64) {
        self.max_displacement = self.max_displacement.max((new - old).abs());
        self.min_y = self.min_y.min(new);
        self.max_y = self.max_y.max(new);
        self.updates += 1;
    }

    /// Horizontal span of the tick's updates, if any x was written.
    pub fn width(&self) -> Option<f64> {
        (self.max_x >= self.min_x).then(|| self.max_x - self.min_x)
    }

    /// Vertical span of the tick's updates, if any y was written.
    pub fn height(&self) -> Option<f64> {
        (self.max_y >= self.min_y).then(|| self.max_y - self.min_y)
    }
}
