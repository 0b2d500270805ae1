//! Basic 2D types and tolerances shared by the membership and interpolation code.
//!
//! - `GeomCfg`: centralizes epsilons for zero-area and coincidence checks.
//! - `Vertex`: a labeled reference point borrowed from a `LabeledPoints`.

use std::cmp::Ordering;

use nalgebra::Vector2;

/// A point in the composition plane.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// Both epsilons are absolute. `eps_area` compares against doubled signed
/// areas (see `orientation`), `eps_coincide` against Euclidean distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps_area: f64,
    pub eps_coincide: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_area: 1e-12,
            eps_coincide: 1e-12,
        }
    }
}

/// Labeled reference point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex<'a> {
    pub label: &'a str,
    pub point: Point,
}

impl<'a> Vertex<'a> {
    #[inline]
    pub fn new(label: &'a str, point: Point) -> Self {
        Self { label, point }
    }
    #[inline]
    pub fn coincides(&self, q: Point, eps: f64) -> bool {
        (self.point - q).norm() <= eps
    }
}

/// Total order on vertices: x, then y, then label.
///
/// Not the order along a line once collinearity is decided within a tolerance;
/// see `Shape::new`.
pub(crate) fn canonical_cmp(a: &Vertex<'_>, b: &Vertex<'_>) -> Ordering {
    a.point
        .x
        .total_cmp(&b.point.x)
        .then_with(|| a.point.y.total_cmp(&b.point.y))
        .then_with(|| a.label.cmp(b.label))
}

/// `q` lies in the axis-aligned box spanned by `a` and `b`, inflated by `eps`.
#[inline]
pub(crate) fn in_bbox(q: Point, a: Point, b: Point, eps: f64) -> bool {
    q.x >= a.x.min(b.x) - eps
        && q.x <= a.x.max(b.x) + eps
        && q.y >= a.y.min(b.y) - eps
        && q.y <= a.y.max(b.y) + eps
}
