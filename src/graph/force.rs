//! Composable pseudo-forces.
//!
//! A force maps the current position of a node to a new position, given
//! some anchor point captured when the force was built. Forces are plain
//! values: the engine builds a fresh one for every node pair on every tick,
//! composes them with [`Force::and`] / [`Force::or`], and evaluates the
//! result through a [`Damping`] value.

use super::types::Point;

/// Distance at which the falloff curves have magnitude 1.
pub const UNIT_DISTANCE: f64 = 100.0;

/// Below this distance two points are treated as coincident.
const COINCIDENT: f64 = 1e-9;

/// Signed magnitude as a function of distance.
///
/// Positive values move toward the anchor, negative values away from it.
#[derive(Debug, Clone, PartialEq)]
pub enum Strength {
    /// `UNIT_DISTANCE / d`
    Linear,
    /// `(UNIT_DISTANCE / d)²`
    InverseSquare,
    /// Constant magnitude
    Fixed(f64),
    /// Constant magnitude of 1
    NoDropoff,
    Negate(Box<Strength>),
    Multiply(Box<Strength>, f64),
    Bound(Box<Strength>, f64),
    CubeRoot(Box<Strength>),
}

impl Strength {
    pub fn fixed(value: f64) -> Self {
        Strength::Fixed(value)
    }

    /// Invert the direction.
    pub fn negate(self) -> Self {
        Strength::Negate(Box::new(self))
    }

    pub fn multiply(self, factor: f64) -> Self {
        Strength::Multiply(Box::new(self), factor)
    }

    /// Clamp the magnitude to `max` while keeping the sign.
    pub fn bound(self, max: f64) -> Self {
        Strength::Bound(Box::new(self), max.abs())
    }

    pub fn cuberoot(self) -> Self {
        Strength::CubeRoot(Box::new(self))
    }

    /// Magnitude at `distance`.
    pub fn at(&self, distance: f64) -> f64 {
        match self {
            Strength::Linear => UNIT_DISTANCE / distance,
            Strength::InverseSquare => (UNIT_DISTANCE / distance).powi(2),
            Strength::Fixed(value) => *value,
            Strength::NoDropoff => 1.0,
            Strength::Negate(inner) => -inner.at(distance),
            Strength::Multiply(inner, factor) => inner.at(distance) * factor,
            Strength::Bound(inner, max) => clamp_magnitude(inner.at(distance), *max),
            Strength::CubeRoot(inner) => inner.at(distance).cbrt(),
        }
    }
}

/// Clamp to `[-max, max]`, letting NaN through so the commit guard sees it.
fn clamp_magnitude(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    value.max(-max).min(max)
}

/// Scales a force's raw delta before it is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damping {
    factor: f64,
}

impl Damping {
    /// No damping: the raw result is used as-is.
    pub const NONE: Damping = Damping { factor: 1.0 };

    /// `factor` is clamped to `(0, 1]`; non-finite values disable damping.
    pub fn new(factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::NONE;
        }
        Self {
            factor: factor.min(1.0),
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Move from `from` toward `raw` by the damping fraction.
    pub fn apply(&self, from: Point, raw: Point) -> Point {
        Point::new(
            from.x + (raw.x - from.x) * self.factor,
            from.y + (raw.y - from.y) * self.factor,
        )
    }
}

impl Default for Damping {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Force {
    /// Identity
    None,
    /// Pull toward `target` once farther than `horizon`.
    Attraction {
        target: Point,
        horizon: f64,
        relatedness: f64,
        min_relatedness: f64,
        rate: f64,
    },
    /// Near-field push: inside `threshold`, rotate around `center` by
    /// `angle_step` degrees and step `push` farther out.
    Repulsion {
        center: Point,
        threshold: f64,
        angle_step: f64,
        push: f64,
    },
    /// Rotate around `pivot` by `strength` degrees, capped at `max_angle`.
    Rotational {
        pivot: Point,
        strength: Strength,
        max_angle: f64,
    },
    /// Move along the line to `target` by `strength`.
    Simple { target: Point, strength: Strength },
    /// Jump to `target`.
    Place { target: Point },
    /// Apply the first, then the second to its output.
    And(Box<Force>, Box<Force>),
    /// Apply both to the same input and keep the larger move.
    Or(Box<Force>, Box<Force>),
}

impl Force {
    pub fn attraction(
        target: Point,
        horizon: f64,
        relatedness: f64,
        min_relatedness: f64,
        rate: f64,
    ) -> Self {
        Force::Attraction {
            target,
            horizon,
            relatedness,
            min_relatedness,
            rate,
        }
    }

    pub fn repulsion(center: Point, threshold: f64, angle_step: f64, push: f64) -> Self {
        Force::Repulsion {
            center,
            threshold,
            angle_step,
            push,
        }
    }

    pub fn rotational(pivot: Point, strength: Strength, max_angle: f64) -> Self {
        Force::Rotational {
            pivot,
            strength,
            max_angle: max_angle.abs(),
        }
    }

    pub fn simple(target: Point, strength: Strength) -> Self {
        Force::Simple { target, strength }
    }

    pub fn place(target: Point) -> Self {
        Force::Place { target }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Force::None)
    }

    /// Sequential composition; `None` on either side is dropped.
    pub fn and(self, next: Force) -> Force {
        match (self, next) {
            (Force::None, other) | (other, Force::None) => other,
            (first, second) => Force::And(Box::new(first), Box::new(second)),
        }
    }

    /// Keep whichever of the two produces the larger displacement.
    pub fn or(self, other: Force) -> Force {
        match (self, other) {
            (Force::None, other) | (other, Force::None) => other,
            (first, second) => Force::Or(Box::new(first), Box::new(second)),
        }
    }

    /// Undamped result of applying this force to `p`.
    pub fn accept(&self, p: Point) -> Point {
        match self {
            Force::None => p,
            Force::Attraction {
                target,
                horizon,
                relatedness,
                min_relatedness,
                rate,
            } => {
                let dist = p.distance(*target);
                if !(dist > *horizon) {
                    return p;
                }
                let surplus = (relatedness - min_relatedness).max(0.0);
                let fraction = (rate * (1.0 + surplus)).min(1.0);
                let step = (fraction * (dist - horizon)).min(*horizon);
                toward(p, *target, dist, step)
            }
            Force::Repulsion {
                center,
                threshold,
                angle_step,
                push,
            } => {
                let dist = p.distance(*center);
                if dist < *threshold {
                    center.polar(p.angle_from(*center) + angle_step, dist + push)
                } else {
                    p
                }
            }
            Force::Rotational {
                pivot,
                strength,
                max_angle,
            } => {
                let dist = p.distance(*pivot);
                let angle = clamp_magnitude(strength.at(dist), *max_angle);
                pivot.polar(p.angle_from(*pivot) + angle, dist)
            }
            Force::Simple { target, strength } => {
                let dist = p.distance(*target);
                if dist < COINCIDENT {
                    return p;
                }
                toward(p, *target, dist, strength.at(dist))
            }
            Force::Place { target } => *target,
            Force::And(first, second) => second.accept(first.accept(p)),
            Force::Or(first, second) => {
                let a = first.accept(p);
                let b = second.accept(p);
                if b.distance(p) > a.distance(p) {
                    b
                } else {
                    a
                }
            }
        }
    }

    /// Apply this force to `p` through `damping`.
    pub fn apply(&self, p: Point, damping: &Damping) -> Point {
        damping.apply(p, self.accept(p))
    }
}

/// Step `amount` from `p` toward `target`, which is `dist` away.
fn toward(p: Point, target: Point, dist: f64, amount: f64) -> Point {
    let scale = amount / dist;
    Point::new(
        p.x + (target.x - p.x) * scale,
        p.y + (target.y - p.y) * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_strength_curves() {
        assert!(close(Strength::Linear.at(50.0), 2.0));
        assert!(close(Strength::InverseSquare.at(50.0), 4.0));
        assert!(close(Strength::fixed(7.0).at(1000.0), 7.0));
        assert!(close(Strength::NoDropoff.at(3.0), 1.0));
    }

    #[test]
    fn test_strength_transforms() {
        let s = Strength::Linear.multiply(8.0).negate().bound(500.0);
        assert!(close(s.at(100.0), -8.0));
        assert!(close(s.at(0.5), -500.0));
        assert!(close(s.at(0.0), -500.0));
        assert!(close(Strength::fixed(27.0).cuberoot().at(1.0), 3.0));
        assert!(Strength::fixed(f64::NAN).bound(1.0).at(1.0).is_nan());
    }

    #[test]
    fn test_attraction_inside_horizon_is_noop() {
        let f = Force::attraction(Point::new(0.0, 0.0), 60.0, 1.0, 0.0, 0.25);
        let p = Point::new(30.0, 40.0);
        assert_eq!(f.accept(p), p);
    }

    #[test]
    fn test_attraction_pulls_but_not_past_horizon() {
        let target = Point::new(0.0, 0.0);
        let f = Force::attraction(target, 60.0, 1.0, 0.0, 0.25);
        let p = Point::new(100.0, 0.0);
        let out = f.accept(p);
        // fraction 0.5 of the 40 surplus
        assert!(close(out.x, 80.0));
        assert!(close(out.y, 0.0));

        // A huge relatedness saturates to the full surplus, capped by horizon
        let strong = Force::attraction(target, 60.0, 50.0, 0.0, 0.25);
        assert!(close(strong.accept(Point::new(100.0, 0.0)).x, 60.0));
        assert!(close(strong.accept(Point::new(1000.0, 0.0)).x, 940.0));
    }

    #[test]
    fn test_repulsion_near_field_only() {
        let center = Point::new(0.0, 0.0);
        let f = Force::repulsion(center, 80.0, 2.0, 1.0);

        let far = Point::new(100.0, 0.0);
        assert_eq!(f.accept(far), far);

        let near = Point::new(10.0, 0.0);
        let out = f.accept(near);
        assert!(close(out.distance(center), 11.0));
        assert!(close(out.angle_from(center), 2.0));
    }

    #[test]
    fn test_repulsion_separates_coincident_points() {
        let center = Point::new(5.0, 5.0);
        let out = Force::repulsion(center, 25.0, 2.0, 1.0).accept(center);
        assert!(out.is_finite());
        assert!(close(out.distance(center), 1.0));
    }

    #[test]
    fn test_rotational_keeps_distance() {
        let pivot = Point::new(0.0, 0.0);
        let f = Force::rotational(pivot, Strength::InverseSquare.negate(), 360.0);
        let p = Point::new(100.0, 0.0);
        let out = f.accept(p);
        assert!(close(out.distance(pivot), 100.0));
        assert!(close(out.angle_from(pivot), -1.0));

        let capped = Force::rotational(pivot, Strength::fixed(90.0), 45.0);
        assert!(close(capped.accept(p).angle_from(pivot), 45.0));
    }

    #[test]
    fn test_simple_force_direction() {
        let target = Point::new(0.0, 0.0);
        let p = Point::new(10.0, 0.0);
        assert!(close(Force::simple(target, Strength::fixed(4.0)).accept(p).x, 6.0));
        assert!(close(Force::simple(target, Strength::NoDropoff.negate()).accept(p).x, 11.0));
        assert_eq!(Force::simple(target, Strength::Linear).accept(target), target);
    }

    #[test]
    fn test_composition() {
        let origin = Point::new(0.0, 0.0);
        let p = Point::new(10.0, 0.0);
        let one = Force::simple(origin, Strength::fixed(1.0));
        let three = Force::simple(origin, Strength::fixed(3.0));

        assert!(close(one.clone().and(three.clone()).accept(p).x, 6.0));
        assert!(close(one.clone().or(three.clone()).accept(p).x, 7.0));
        assert!(close(three.or(one.clone()).accept(p).x, 7.0));

        assert_eq!(Force::None.and(one.clone()), one);
        assert_eq!(one.clone().or(Force::None), one);
        assert_eq!(Force::None.accept(p), p);
        assert!(Force::None.and(Force::None).is_none());
    }

    #[test]
    fn test_place_then_push() {
        let center = Point::new(0.0, 0.0);
        let f = Force::place(Point::new(0.0, 50.0))
            .and(Force::simple(center, Strength::NoDropoff.negate()));
        let out = f.accept(Point::new(-3.0, 7.0));
        assert!(close(out.x, 0.0));
        assert!(close(out.y, 51.0));
    }

    #[test]
    fn test_damping() {
        let d = Damping::new(0.5);
        let out = d.apply(Point::new(0.0, 0.0), Point::new(10.0, -4.0));
        assert!(close(out.x, 5.0));
        assert!(close(out.y, -2.0));

        assert_eq!(Damping::new(0.0), Damping::NONE);
        assert_eq!(Damping::new(f64::NAN), Damping::NONE);
        assert!(close(Damping::new(3.0).factor(), 1.0));

        let f = Force::simple(Point::new(0.0, 0.0), Strength::fixed(4.0));
        assert!(close(f.apply(Point::new(10.0, 0.0), &d).x, 8.0));
    }
}
