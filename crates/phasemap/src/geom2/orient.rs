//! Orientation predicate.

use super::types::Point;

/// Twice the signed area of the triangle `p1 p2 p3`.
///
/// Positive for counterclockwise order, negative for clockwise, zero when collinear.
#[inline]
pub fn orientation(p1: Point, p2: Point, p3: Point) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// Sign of `orientation` under a tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// `|value| <= eps` counts as collinear.
    #[inline]
    pub fn classify(value: f64, eps: f64) -> Self {
        if value > eps {
            Orientation::CounterClockwise
        } else if value < -eps {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    #[inline]
    pub fn of(p1: Point, p2: Point, p3: Point, eps: f64) -> Self {
        Self::classify(orientation(p1, p2, p3), eps)
    }
}
