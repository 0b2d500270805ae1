//! Sample compositions inside a hull facet and print interpolated formation energies.
//!
//! Usage:
//!   cargo run -p phasemap --example hull_sampling -- [n]

use phasemap::prelude::*;

fn main() -> Result<(), phasemap::Error> {
    let n = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8usize);
    let points = LabeledPoints::from_pairs([
        ("GaN", (0.1, 0.1)),
        ("AlN", (0.6, 0.1)),
        ("InN", (0.1, 0.6)),
    ])?;
    let energies: ValueTable = [("GaN", -3.0), ("AlN", -8.0), ("InN", -9.0)]
        .into_iter()
        .collect();
    let cfg = GeomCfg::default();
    let labels = ["GaN", "AlN", "InN"];
    let shape = Shape::from_labels(&points, labels, cfg)?;
    for q in sample_points(&shape, n, ReplayToken { seed: 2025, index: 0 }) {
        let e = shape.interpolate(&energies, q, cfg)?;
        println!("x={:.4} y={:.4} E={:.4}", q.x, q.y, e);
    }
    Ok(())
}
