//! Label-keyed inputs: reference coordinates and tabulated values.
//!
//! Both maps fail loudly on an unknown label (`Error::MissingLabel`); nothing
//! is defaulted.

use std::collections::HashMap;

use nalgebra::Vector2;

use crate::error::{Error, Result, TableKind};

/// Ordered labels paired 1:1 with 2D points.
///
/// Invariants:
/// - `labels.len() == points.len()`.
/// - Labels are unique.
#[derive(Clone, Debug, Default)]
pub struct LabeledPoints {
    labels: Vec<String>,
    points: Vec<Vector2<f64>>,
    index: HashMap<String, usize>,
}

impl LabeledPoints {
    /// Pair index-aligned `labels` and `points`.
    pub fn new(labels: Vec<String>, points: Vec<Vector2<f64>>) -> Result<Self> {
        if labels.len() != points.len() {
            return Err(Error::LengthMismatch {
                labels: labels.len(),
                points: points.len(),
            });
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(Error::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self {
            labels,
            points,
            index,
        })
    }

    /// Build from `(label, (x, y))` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        let (labels, points): (Vec<String>, Vec<Vector2<f64>>) = pairs
            .into_iter()
            .map(|(l, (x, y))| (l.into(), Vector2::new(x, y)))
            .unzip();
        Self::new(labels, points)
    }

    /// Coordinates of `label`.
    pub fn get(&self, label: &str) -> Result<Vector2<f64>> {
        self.index
            .get(label)
            .map(|&i| self.points[i])
            .ok_or_else(|| Error::missing(label, TableKind::Coordinates))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vector2<f64>)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.points.iter().copied())
    }
}

/// Scalar values (e.g. formation energies) keyed by label.
#[derive(Clone, Debug, Default)]
pub struct ValueTable {
    values: HashMap<String, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `label`; returns the previous value.
    pub fn insert(&mut self, label: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(label.into(), value)
    }

    pub fn get(&self, label: &str) -> Result<f64> {
        self.values
            .get(label)
            .copied()
            .ok_or_else(|| Error::missing(label, TableKind::Values))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(l, v)| (l.into(), v)).collect(),
        }
    }
}
