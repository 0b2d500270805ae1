//! Expected value at a query point from three tabulated reference vertices.
//!
//! - Triangle: barycentric weights from sub-triangle signed areas.
//! - Segment: piecewise-linear along the sorted vertices, clamped to the
//!   extremes' values outside the span.

use super::orient::orientation;
use super::shape::Shape;
use super::types::{GeomCfg, Point, Vertex};
use crate::error::Result;
use crate::table::{LabeledPoints, ValueTable};

impl<'a> Shape<'a> {
    /// Interpolated value at `q`.
    ///
    /// Pre: `q` is inside the shape (see `contains`). For a triangle, an outside
    /// `q` yields the barycentric extrapolation.
    pub fn interpolate(&self, values: &ValueTable, q: Point, cfg: GeomCfg) -> Result<f64> {
        let v = self.vertices();
        let vals = [
            values.get(v[0].label)?,
            values.get(v[1].label)?,
            values.get(v[2].label)?,
        ];
        if let Some(i) = v.iter().position(|x| x.coincides(q, cfg.eps_coincide)) {
            return Ok(vals[i]);
        }
        match *self {
            Shape::Triangle { vertices: v, area } => {
                let w = barycentric(&v, area, q);
                Ok(w[0] * vals[0] + w[1] * vals[1] + w[2] * vals[2])
            }
            Shape::Segment { vertices: v } => Ok(along_segment(&v, vals, q, cfg)),
        }
    }
}

/// Barycentric weights of `q`; they sum to 1 up to rounding.
#[inline]
fn barycentric(v: &[Vertex<'_>; 3], area: f64, q: Point) -> [f64; 3] {
    let (a, b, c) = (v[0].point, v[1].point, v[2].point);
    [
        orientation(q, b, c) / area,
        orientation(a, q, c) / area,
        orientation(a, b, q) / area,
    ]
}

fn along_segment(v: &[Vertex<'_>; 3], vals: [f64; 3], q: Point, cfg: GeomCfg) -> f64 {
    let origin = v[0].point;
    let dir = v[2].point - origin;
    let len2 = dir.norm_squared();
    if len2 <= cfg.eps_coincide * cfg.eps_coincide {
        // All three vertices coincide.
        return (vals[0] + vals[1] + vals[2]) / 3.0;
    }
    let param = |p: Point| (p - origin).dot(&dir) / len2;
    let t = param(q);
    if t <= 0.0 {
        return vals[0];
    }
    if t >= 1.0 {
        return vals[2];
    }
    let knots = [0.0, param(v[1].point).clamp(0.0, 1.0), 1.0];
    let (lo, hi) = if t <= knots[1] { (0, 1) } else { (1, 2) };
    let span = knots[hi] - knots[lo];
    if span <= 0.0 {
        return vals[hi];
    }
    let f = (t - knots[lo]) / span;
    vals[lo] + f * (vals[hi] - vals[lo])
}

/// Expected value at `q` inside the (possibly degenerate) triangle spanned by `labels`.
///
/// Independent of the order of `labels`. Fails if a label is missing from
/// `points` or `values`.
pub fn expected_value(
    values: &ValueTable,
    points: &LabeledPoints,
    labels: [&str; 3],
    q: Point,
    cfg: GeomCfg,
) -> Result<f64> {
    Shape::from_labels(points, labels, cfg)?.interpolate(values, q, cfg)
}
