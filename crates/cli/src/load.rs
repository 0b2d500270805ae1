//! CSV inputs: reference coordinates (`label,x,y`), value tables (`label,<column>`),
//! and batch queries (`l1,l2,l3,x,y`).

use anyhow::{Context, Result};
use phasemap::{LabeledPoints, Point, ValueTable};
use polars::prelude::*;
use std::path::Path;

pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "csv_loaded"
    );
    Ok(df)
}

fn strings(df: &DataFrame, col: &str) -> Result<Vec<String>> {
    let s = df
        .column(col)
        .with_context(|| format!("missing column `{col}`"))?
        .cast(&DataType::String)?;
    s.str()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(str::to_string)
                .with_context(|| format!("null in column `{col}` at row {row}"))
        })
        .collect()
}

fn floats(df: &DataFrame, col: &str) -> Result<Vec<f64>> {
    let s = df
        .column(col)
        .with_context(|| format!("missing column `{col}`"))?
        .cast(&DataType::Float64)?;
    s.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("null in column `{col}` at row {row}")))
        .collect()
}

/// Reference coordinates from a `label,x,y` CSV.
pub fn load_points(path: &Path) -> Result<LabeledPoints> {
    let df = read_csv(path)?;
    let labels = strings(&df, "label")?;
    let xs = floats(&df, "x")?;
    let ys = floats(&df, "y")?;
    let points = xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y)).collect();
    LabeledPoints::new(labels, points).with_context(|| format!("coordinates in {}", path.display()))
}

/// Values of `column` keyed by the `label` column.
pub fn load_values(path: &Path, column: &str) -> Result<ValueTable> {
    let df = read_csv(path)?;
    let labels = strings(&df, "label")?;
    let values = floats(&df, column).with_context(|| format!("values in {}", path.display()))?;
    Ok(labels.into_iter().zip(values).collect())
}

/// One batch query row.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRow {
    pub labels: [String; 3],
    pub at: Point,
}

pub fn load_queries(path: &Path) -> Result<Vec<QueryRow>> {
    let df = read_csv(path)?;
    let l1 = strings(&df, "l1")?;
    let l2 = strings(&df, "l2")?;
    let l3 = strings(&df, "l3")?;
    let xs = floats(&df, "x")?;
    let ys = floats(&df, "y")?;
    Ok(l1
        .into_iter()
        .zip(l2)
        .zip(l3)
        .zip(xs.into_iter().zip(ys))
        .map(|(((a, b), c), (x, y))| QueryRow {
            labels: [a, b, c],
            at: Point::new(x, y),
        })
        .collect())
}
