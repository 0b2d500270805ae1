use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use phasemap::composition::composition_concentration;
use phasemap::{GeomCfg, LabeledPoints, Point, Shape, ValueTable};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod load;
mod provenance;

#[derive(Parser)]
#[command(name = "phasemap")]
#[command(about = "Point-in-triangle tests and value interpolation over labeled compositions")]
struct Cmd {
    /// Zero-area tolerance for orientation tests
    #[arg(long, global = true)]
    eps_area: Option<f64>,
    /// Distance under which a query point snaps to a vertex
    #[arg(long, global = true)]
    eps_coincide: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

impl Cmd {
    fn geom_cfg(&self) -> GeomCfg {
        let mut cfg = GeomCfg::default();
        if let Some(eps) = self.eps_area {
            cfg.eps_area = eps;
        }
        if let Some(eps) = self.eps_coincide {
            cfg.eps_coincide = eps;
        }
        cfg
    }
}

#[derive(Subcommand)]
enum Action {
    /// Is a point inside the triangle spanned by three labeled references?
    Contains {
        /// CSV with columns label,x,y
        #[arg(long)]
        coords: PathBuf,
        #[arg(long, num_args = 3, value_names = ["L1", "L2", "L3"])]
        labels: Vec<String>,
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        at: Vec<f64>,
    },
    /// Expected value at a point from three labeled references
    Interpolate {
        #[arg(long)]
        coords: PathBuf,
        /// CSV with a label column and the value column
        #[arg(long)]
        values: PathBuf,
        #[arg(long, default_value = "formation_energy")]
        column: String,
        #[arg(long, num_args = 3, value_names = ["L1", "L2", "L3"])]
        labels: Vec<String>,
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        at: Vec<f64>,
        /// Also write the result (and a provenance sidecar) here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Evaluate every row of a l1,l2,l3,x,y CSV; writes .parquet or .csv
    Batch {
        #[arg(long)]
        coords: PathBuf,
        #[arg(long)]
        values: PathBuf,
        #[arg(long, default_value = "formation_energy")]
        column: String,
        #[arg(long)]
        queries: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Split a chemical formula into elements and counts
    Composition { formula: String },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = cmd.geom_cfg();
    match cmd.action {
        Action::Contains { coords, labels, at } => contains(&coords, &labels, &at, cfg),
        Action::Interpolate {
            coords,
            values,
            column,
            labels,
            at,
            out,
        } => interpolate(&coords, &values, &column, &labels, &at, out.as_deref(), cfg),
        Action::Batch {
            coords,
            values,
            column,
            queries,
            out,
        } => batch(&coords, &values, &column, &queries, &out, cfg),
        Action::Composition { formula } => composition(&formula),
        Action::Report => report(),
    }
}

#[derive(Debug, Serialize)]
struct QueryResult {
    labels: [String; 3],
    at: [f64; 2],
    shape: &'static str,
    inside: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

fn triple(labels: &[String]) -> Result<[&str; 3]> {
    match labels {
        [a, b, c] => Ok([a.as_str(), b.as_str(), c.as_str()]),
        _ => bail!("expected 3 labels, got {}", labels.len()),
    }
}

fn point(at: &[f64]) -> Result<Point> {
    match at {
        [x, y] => Ok(Point::new(*x, *y)),
        _ => bail!("expected 2 coordinates, got {}", at.len()),
    }
}

/// Classify and, when `values` is given and the point is inside, interpolate.
fn evaluate(
    points: &LabeledPoints,
    values: Option<&ValueTable>,
    labels: [&str; 3],
    q: Point,
    cfg: GeomCfg,
) -> Result<QueryResult> {
    let shape = Shape::from_labels(points, labels, cfg)?;
    let inside = shape.contains(q, cfg);
    let value = match values {
        Some(table) if inside => Some(shape.interpolate(table, q, cfg)?),
        Some(_) => {
            tracing::warn!(?labels, x = q.x, y = q.y, "query_outside_shape");
            None
        }
        None => None,
    };
    Ok(QueryResult {
        labels: labels.map(str::to_string),
        at: [q.x, q.y],
        shape: if shape.is_degenerate() {
            "segment"
        } else {
            "triangle"
        },
        inside,
        value,
    })
}

fn contains(coords: &Path, labels: &[String], at: &[f64], cfg: GeomCfg) -> Result<()> {
    let points = load::load_points(coords)?;
    let res = evaluate(&points, None, triple(labels)?, point(at)?, cfg)?;
    tracing::info!(inside = res.inside, shape = res.shape, "contains");
    println!("{}", serde_json::to_string_pretty(&res)?);
    Ok(())
}

fn interpolate(
    coords: &Path,
    values: &Path,
    column: &str,
    labels: &[String],
    at: &[f64],
    out: Option<&Path>,
    cfg: GeomCfg,
) -> Result<()> {
    let points = load::load_points(coords)?;
    let table = load::load_values(values, column)?;
    let res = evaluate(&points, Some(&table), triple(labels)?, point(at)?, cfg)?;
    tracing::info!(inside = res.inside, value = ?res.value, "interpolate");
    let doc = serde_json::to_string_pretty(&res)?;
    println!("{doc}");

    if let Some(out) = out {
        create_parent(out)?;
        std::fs::write(out, &doc).with_context(|| format!("writing {}", out.display()))?;
        let payload = provenance::Payload::new(serde_json::json!({
            "command": "interpolate",
            "column": column,
            "labels": labels,
            "at": at,
            "eps_area": cfg.eps_area,
            "eps_coincide": cfg.eps_coincide,
        }))
        .with_inputs([coords, values]);
        let prov = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "written");
    }
    Ok(())
}

fn batch_frame(
    points: &LabeledPoints,
    table: &ValueTable,
    rows: &[load::QueryRow],
    cfg: GeomCfg,
) -> Result<DataFrame> {
    let mut results = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let labels = [
            row.labels[0].as_str(),
            row.labels[1].as_str(),
            row.labels[2].as_str(),
        ];
        let res = evaluate(points, Some(table), labels, row.at, cfg)
            .with_context(|| format!("query row {i}"))?;
        results.push(res);
    }
    let column = |k: usize| results.iter().map(|r| r.labels[k].clone()).collect::<Vec<_>>();
    let df = df!(
        "l1" => column(0),
        "l2" => column(1),
        "l3" => column(2),
        "x" => results.iter().map(|r| r.at[0]).collect::<Vec<_>>(),
        "y" => results.iter().map(|r| r.at[1]).collect::<Vec<_>>(),
        "shape" => results.iter().map(|r| r.shape).collect::<Vec<_>>(),
        "inside" => results.iter().map(|r| r.inside).collect::<Vec<_>>(),
        "value" => results.iter().map(|r| r.value).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

fn batch(
    coords: &Path,
    values: &Path,
    column: &str,
    queries: &Path,
    out: &Path,
    cfg: GeomCfg,
) -> Result<()> {
    let points = load::load_points(coords)?;
    let table = load::load_values(values, column)?;
    let rows = load::load_queries(queries)?;
    let mut df = batch_frame(&points, &table, &rows, cfg)?;
    let inside = df
        .column("inside")?
        .bool()?
        .into_iter()
        .filter(|v| *v == Some(true))
        .count();
    tracing::info!(rows = df.height(), inside, "batch");

    let ext = out.extension().and_then(|e| e.to_str());
    if !matches!(ext, Some("parquet" | "csv")) {
        bail!("unsupported output extension {ext:?}; use .parquet or .csv");
    }
    create_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if ext == Some("parquet") {
        ParquetWriter::new(file).finish(&mut df)?;
    } else {
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
    }
    let payload = provenance::Payload::new(serde_json::json!({
        "command": "batch",
        "column": column,
        "rows": rows.len(),
        "eps_area": cfg.eps_area,
        "eps_coincide": cfg.eps_coincide,
    }))
    .with_inputs([coords, values, queries]);
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn composition(formula: &str) -> Result<()> {
    let (composition, concentration) = composition_concentration(formula)?;
    tracing::info!(formula, "composition");
    let obj = serde_json::json!({
        "formula": formula,
        "composition": composition,
        "concentration": concentration,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(serde_json::json!({}), &[], &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn create_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
