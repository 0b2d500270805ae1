//! Triangle/segment classification of three reference vertices and point membership.
//!
//! Vertices are first put in canonical order (`types::canonical_cmp`); segments
//! are then reordered along their line. A `Shape` built from any permutation of
//! the same three vertices is identical, so every downstream computation is
//! permutation invariant.

use super::orient::{orientation, Orientation};
use super::types::{canonical_cmp, in_bbox, GeomCfg, Point, Vertex};
use crate::error::Result;
use crate::table::LabeledPoints;

/// Three reference vertices, classified by their signed area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape<'a> {
    /// Positive-area triangle. `area` is `orientation(v0, v1, v2)` in canonical order.
    Triangle { vertices: [Vertex<'a>; 3], area: f64 },
    /// Collinear vertices sorted along their line; `vertices[0]` and `vertices[2]` are the extremes.
    Segment { vertices: [Vertex<'a>; 3] },
}

impl<'a> Shape<'a> {
    /// Classify three vertices given in any order.
    pub fn new(mut vertices: [Vertex<'a>; 3], cfg: GeomCfg) -> Self {
        vertices.sort_by(canonical_cmp);
        let area = orientation(vertices[0].point, vertices[1].point, vertices[2].point);
        if area.abs() <= cfg.eps_area {
            Shape::Segment {
                vertices: along_line(vertices),
            }
        } else {
            Shape::Triangle { vertices, area }
        }
    }

    /// Look up `labels` in `points` and classify them.
    pub fn from_labels(points: &LabeledPoints, labels: [&'a str; 3], cfg: GeomCfg) -> Result<Self> {
        let [l0, l1, l2] = labels;
        let vertices = [
            Vertex::new(l0, points.get(l0)?),
            Vertex::new(l1, points.get(l1)?),
            Vertex::new(l2, points.get(l2)?),
        ];
        Ok(Self::new(vertices, cfg))
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex<'a>; 3] {
        match self {
            Shape::Triangle { vertices, .. } | Shape::Segment { vertices } => vertices,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Shape::Segment { .. })
    }

    /// Closed membership: edges and vertices count as inside.
    pub fn contains(&self, q: Point, cfg: GeomCfg) -> bool {
        match self {
            Shape::Triangle { vertices: v, .. } => {
                let mut ccw = false;
                let mut cw = false;
                for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                    let (a, b) = (v[i].point, v[j].point);
                    match side_of_line(q, a, b, cfg.eps_coincide) {
                        Orientation::CounterClockwise => ccw = true,
                        Orientation::Clockwise => cw = true,
                        // On the edge's line: only the edge itself belongs to the triangle.
                        Orientation::Collinear => {
                            if !in_bbox(q, a, b, cfg.eps_coincide) {
                                return false;
                            }
                        }
                    }
                }
                !(ccw && cw)
            }
            Shape::Segment { vertices: v } => {
                let (a, b) = (v[0].point, v[2].point);
                Orientation::of(q, a, b, cfg.eps_area) == Orientation::Collinear
                    && in_bbox(q, a, b, cfg.eps_coincide)
            }
        }
    }
}

/// Reorder canonically sorted, nearly collinear vertices along their line.
///
/// The farthest-apart pair are the extremes. A coordinate sort is not enough:
/// rounding noise in x on a near-vertical line reorders it.
fn along_line(v: [Vertex<'_>; 3]) -> [Vertex<'_>; 3] {
    let d2 = |i: usize, j: usize| (v[i].point - v[j].point).norm_squared();
    let mut ends = (0, 2);
    for (i, j) in [(0, 1), (1, 2)] {
        if d2(i, j) > d2(ends.0, ends.1) {
            ends = (i, j);
        }
    }
    let origin = v[ends.0].point;
    let dir = v[ends.1].point - origin;
    let mut sorted = v;
    sorted.sort_by(|a, b| {
        let ta = (a.point - origin).dot(&dir);
        let tb = (b.point - origin).dot(&dir);
        ta.total_cmp(&tb).then_with(|| canonical_cmp(a, b))
    });
    sorted
}

/// Side of `q` relative to the line through `a` and `b`, with `eps` a distance from that line.
#[inline]
fn side_of_line(q: Point, a: Point, b: Point, eps: f64) -> Orientation {
    let len = (b - a).norm();
    if len == 0.0 {
        return Orientation::Collinear;
    }
    Orientation::classify(orientation(q, a, b) / len, eps)
}

/// Whether `q` lies in the (possibly degenerate) triangle spanned by `labels`.
///
/// The result does not depend on the order of `labels`. Fails if a label is
/// missing from `points`.
pub fn is_in_triangle(
    points: &LabeledPoints,
    labels: [&str; 3],
    q: Point,
    cfg: GeomCfg,
) -> Result<bool> {
    Ok(Shape::from_labels(points, labels, cfg)?.contains(q, cfg))
}
