//! Helpers for phase-diagram style analysis of computed materials data.
//!
//! - `geom2`: point-in-triangle tests and interpolation of tabulated values
//!   (e.g. formation energies) over three labeled reference compositions.
//! - `table`: label-keyed coordinates and values with explicit not-found errors.
//! - `composition`: split chemical formulas into elements and counts.
//! - `scaling`: standardization of regression inputs and targets.

pub mod composition;
pub mod error;
pub mod geom2;
pub mod scaling;
pub mod table;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};
pub use geom2::{expected_value, is_in_triangle, orientation, GeomCfg, Point, Shape};
pub use table::{LabeledPoints, ValueTable};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::composition::{composition_concentration, parse_formula, Component, Composition};
    pub use crate::geom2::rand::{sample_points, ReplayToken};
    pub use crate::geom2::{
        expected_value, is_in_triangle, orientation, GeomCfg, Orientation, Point, Shape, Vertex,
    };
    pub use crate::scaling::{xy_scaler, y_descaler, ScaledSets, StandardScaler};
    pub use crate::table::{LabeledPoints, ValueTable};
    pub use nalgebra::Vector2 as Vec2;
}
