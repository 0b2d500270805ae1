//! Standardization `z = (x - u) / s` for regression inputs and targets.
//!
//! Samples are rows, features are columns. `s` is the population standard
//! deviation; a constant column gets `s = 1` so it maps to zeros.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Per-feature mean and scale, fitted on a training set.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardScaler {
    mean: DVector<f64>,
    scale: DVector<f64>,
}

impl StandardScaler {
    pub fn fit(x: &DMatrix<f64>) -> Result<Self> {
        let n = x.nrows();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        let mean = DVector::from_iterator(x.ncols(), x.column_iter().map(|c| c.mean()));
        let scale = DVector::from_iterator(
            x.ncols(),
            x.column_iter().zip(mean.iter()).map(|(c, &u)| {
                let var = c.iter().map(|v| (v - u) * (v - u)).sum::<f64>() / n as f64;
                let s = var.sqrt();
                // Rounding noise on a constant column must not blow up the output.
                if s <= 10.0 * f64::EPSILON * u.abs().max(1.0) {
                    1.0
                } else {
                    s
                }
            }),
        );
        Ok(Self { mean, scale })
    }

    /// Fit on a single feature.
    pub fn fit_vector(y: &DVector<f64>) -> Result<Self> {
        Self::fit(&as_column(y))
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &DVector<f64> {
        &self.scale
    }

    pub fn transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        self.check(x.ncols())?;
        let mut out = x.clone();
        for (j, mut col) in out.column_iter_mut().enumerate() {
            col.apply(|v| *v = (*v - self.mean[j]) / self.scale[j]);
        }
        Ok(out)
    }

    pub fn inverse_transform(&self, z: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        self.check(z.ncols())?;
        let mut out = z.clone();
        for (j, mut col) in out.column_iter_mut().enumerate() {
            col.apply(|v| *v = *v * self.scale[j] + self.mean[j]);
        }
        Ok(out)
    }

    pub fn transform_vector(&self, y: &DVector<f64>) -> Result<DVector<f64>> {
        Ok(DVector::from_column_slice(
            self.transform(&as_column(y))?.as_slice(),
        ))
    }

    pub fn inverse_transform_vector(&self, z: &DVector<f64>) -> Result<DVector<f64>> {
        Ok(DVector::from_column_slice(
            self.inverse_transform(&as_column(z))?.as_slice(),
        ))
    }

    fn check(&self, found: usize) -> Result<()> {
        if found != self.n_features() {
            return Err(Error::ShapeMismatch {
                expected: self.n_features(),
                found,
            });
        }
        Ok(())
    }
}

fn as_column(v: &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_column_slice(v.len(), 1, v.as_slice())
}

/// Standardized train/test inputs and train targets, plus the target scaler.
#[derive(Clone, Debug)]
pub struct ScaledSets {
    pub x_train: DMatrix<f64>,
    pub x_test: DMatrix<f64>,
    pub y_train: DVector<f64>,
    pub y_scaler: StandardScaler,
}

/// Fit scalers on `x_train` and `y_train`; apply them to the train and test sets.
pub fn xy_scaler(
    x_train: &DMatrix<f64>,
    x_test: &DMatrix<f64>,
    y_train: &DVector<f64>,
) -> Result<ScaledSets> {
    let x_scaler = StandardScaler::fit(x_train)?;
    let y_scaler = StandardScaler::fit_vector(y_train)?;
    Ok(ScaledSets {
        x_train: x_scaler.transform(x_train)?,
        x_test: x_scaler.transform(x_test)?,
        y_train: y_scaler.transform_vector(y_train)?,
        y_scaler,
    })
}

/// Map each standardized prediction vector back to target units.
pub fn y_descaler(ys: &[DVector<f64>], y_scaler: &StandardScaler) -> Result<Vec<DVector<f64>>> {
    ys.iter()
        .map(|y| y_scaler.inverse_transform_vector(y))
        .collect()
}
