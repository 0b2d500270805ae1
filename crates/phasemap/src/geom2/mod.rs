//! 2D point classification and interpolation over three labeled reference points.
//!
//! Purpose
//! - Decide whether a query point lies in the triangle spanned by three labeled
//!   reference points (closed: edges and vertices included).
//! - Interpolate a tabulated scalar (e.g. formation energy) at that point.
//!
//! Degenerate input
//! - Three collinear reference points form a `Shape::Segment`, not a triangle.
//!   Membership then means lying on the segment between the extremes, and
//!   interpolation runs along the segment with clamping at its ends.
//!
//! Code cross-refs: `Shape`, `GeomCfg`, `orientation`, `table::{LabeledPoints, ValueTable}`

mod interp;
mod orient;
pub mod rand;
mod shape;
mod types;

pub use interp::expected_value;
pub use orient::{orientation, Orientation};
pub use shape::{is_in_triangle, Shape};
pub use types::{GeomCfg, Point, Vertex};

#[cfg(test)]
mod tests;
