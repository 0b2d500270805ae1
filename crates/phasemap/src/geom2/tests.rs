use super::rand::{sample_points, ReplayToken};
use super::*;
use crate::error::{Error, TableKind};
use crate::table::{LabeledPoints, ValueTable};
use nalgebra::vector;
use proptest::prelude::*;

const ABC: [&str; 3] = ["a", "b", "c"];
const PERMS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

fn abc_points(coords: [(f64, f64); 3]) -> LabeledPoints {
    LabeledPoints::from_pairs(ABC.into_iter().zip(coords)).unwrap()
}

fn abc_values(vals: [f64; 3]) -> ValueTable {
    ABC.into_iter().zip(vals).collect()
}

fn permuted(p: [usize; 3]) -> [&'static str; 3] {
    [ABC[p[0]], ABC[p[1]], ABC[p[2]]]
}

fn inside(coords: [(f64, f64); 3], q: (f64, f64)) -> bool {
    let pts = abc_points(coords);
    let q = vector![q.0, q.1];
    let first = is_in_triangle(&pts, ABC, q, GeomCfg::default()).unwrap();
    for p in PERMS {
        assert_eq!(
            is_in_triangle(&pts, permuted(p), q, GeomCfg::default()).unwrap(),
            first,
            "membership changed under permutation {p:?}"
        );
    }
    first
}

fn value(coords: [(f64, f64); 3], vals: [f64; 3], labels: [&str; 3], q: (f64, f64)) -> f64 {
    expected_value(
        &abc_values(vals),
        &abc_points(coords),
        labels,
        vector![q.0, q.1],
        GeomCfg::default(),
    )
    .unwrap()
}

const NORMAL: [(f64, f64); 3] = [(0.3, 0.2), (0.2, 0.1), (0.25, 0.7)];
const NARROW: [(f64, f64); 3] = [(0.3, 0.2), (0.2, 0.1), (0.3, 0.4)];
const LINE_1: [(f64, f64); 3] = [(0.3, 0.2), (0.2, 0.1), (0.5, 0.4)];
const LINE_2: [(f64, f64); 3] = [(0.2, 0.1), (0.3, 0.2), (0.5, 0.4)];
const LINE_3: [(f64, f64); 3] = [(0.3, 0.2), (0.5, 0.4), (0.2, 0.1)];

#[test]
fn normal_triangle_membership() {
    assert!(inside(NORMAL, (0.25, 0.4))); // interior
    assert!(inside(NORMAL, (0.25, 0.15))); // edge
    assert!(inside(NORMAL, (0.3, 0.2))); // vertex
    assert!(!inside(NORMAL, (0.3, 0.4)));
}

#[test]
fn narrow_triangle_membership() {
    assert!(inside(NARROW, (0.25, 0.2)));
    assert!(inside(NARROW, (0.25, 0.15)));
    assert!(inside(NARROW, (0.3, 0.2)));
    assert!(!inside(NARROW, (0.6, 0.5)));
}

#[test]
fn collinear_membership_for_every_layout() {
    for coords in [LINE_1, LINE_2, LINE_3] {
        assert!(Shape::from_labels(&abc_points(coords), ABC, GeomCfg::default())
            .unwrap()
            .is_degenerate());
        // on the segment
        assert!(inside(coords, (0.25, 0.15)));
        // off the line
        assert!(!inside(coords, (0.3, 0.4)));
        // on the line, beyond the extremes
        assert!(!inside(coords, (0.6, 0.5)));
        assert!(!inside(coords, (0.1, 0.0)));
    }
}

#[test]
fn edge_line_beyond_edge_is_outside() {
    let tri = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
    assert!(inside(tri, (0.5, 0.0)));
    assert!(inside(tri, (0.5, 0.5)));
    assert!(!inside(tri, (2.0, 0.0)));
    assert!(!inside(tri, (-1.0, 2.0)));
}

#[test]
fn coincident_vertices_contain_only_that_point() {
    let dot = [(0.4, 0.4), (0.4, 0.4), (0.4, 0.4)];
    assert!(inside(dot, (0.4, 0.4)));
    assert!(!inside(dot, (0.4, 0.5)));
    assert!((value(dot, [1.0, 2.0, 3.0], ABC, (0.4, 0.4)) - 1.0).abs() < 1e-15);
}

#[test]
fn near_vertical_segment_with_rounding_noise() {
    // b.x is 0.30000000000000004, so a plain x sort puts b last.
    let coords = [(0.3, 0.1), (0.1 + 0.2, 0.5), (0.3, 0.9)];
    let shape = Shape::from_labels(&abc_points(coords), ABC, GeomCfg::default()).unwrap();
    assert!(shape.is_degenerate());
    let order: Vec<_> = shape.vertices().iter().map(|v| v.label).collect();
    assert_eq!(order, ["a", "b", "c"]);

    assert!(inside(coords, (0.3, 0.7)));
    assert!(inside(coords, (0.3, 0.2)));
    assert!(!inside(coords, (0.3, 0.95)));
    assert!(!inside(coords, (0.3, 0.05)));

    let vals = [1.0, 2.0, 3.0];
    for p in PERMS {
        let e = value(coords, vals, permuted(p), (0.3, 0.7));
        assert!((e - 2.5).abs() < 1e-12, "perm {p:?} got {e}");
    }
    assert_eq!(value(coords, vals, ABC, (0.3, 0.95)), 3.0);
    assert_eq!(value(coords, vals, ABC, (0.3, 0.05)), 1.0);
}

#[test]
fn thin_triangle_keeps_interior_points() {
    // The short edge has length 1e-7, so orientations against it are tiny.
    let thin = [(0.0, 0.0), (1e-7, 0.0), (0.5, 1.0)];
    assert!(!Shape::from_labels(&abc_points(thin), ABC, GeomCfg::default())
        .unwrap()
        .is_degenerate());
    assert!(inside(thin, (0.55e-6, 1e-6)));
    assert!(inside(thin, (0.5e-7, 0.0)));
    assert!(!inside(thin, (0.45e-6, 1e-6)));
    assert!(!inside(thin, (0.65e-6, 1e-6)));
    assert!(!inside(thin, (0.5e-7, -1e-6)));
}

#[test]
fn barycentric_on_right_triangle() {
    let coords = [(0.1, 0.1), (0.6, 0.1), (0.1, 0.6)];
    let e = value(coords, [-3.0, -8.0, -9.0], ABC, (0.35, 0.35));
    assert!((e + 8.5).abs() < 1e-12, "got {e}");
    // centroid averages the three values
    let g = value(coords, [-3.0, -8.0, -9.0], ABC, (0.8 / 3.0, 0.8 / 3.0));
    assert!((g + 20.0 / 3.0).abs() < 1e-12, "got {g}");
}

#[test]
fn collinear_interpolation_uses_bracketing_vertices() {
    // a=(0.3,0.2) sits between b=(0.2,0.1) and c=(0.5,0.4); q is halfway between b and a.
    for vals in [
        [1.0, 2.0, 2.0],
        [1.0, 2.0, 1.0],
        [1.0, 2.0, 3.0],
        [1.0, 2.0, 1.5],
        [1.0, 2.0, 0.5],
    ] {
        let e = value(LINE_1, vals, ABC, (0.25, 0.15));
        assert!((e - 1.5).abs() < 1e-12, "vals {vals:?} got {e}");
    }
    let vals = [1.0, 2.0, 0.5];
    for labels in [["a", "c", "b"], ["c", "b", "a"]] {
        let e = value(LINE_1, vals, labels, (0.25, 0.15));
        assert!((e - 1.5).abs() < 1e-12);
    }
    // halfway between a and c
    let e = value(LINE_1, vals, ABC, (0.4, 0.3));
    assert!((e - 0.75).abs() < 1e-12, "got {e}");
}

#[test]
fn collinear_interpolation_clamps_outside_span() {
    let coords = [(0.2, 0.1), (0.5, 0.4), (0.3, 0.2)];
    let vals = [1.0, 2.0, 2.0];
    let e = value(coords, vals, ABC, (0.25, 0.15));
    assert!((e - 1.5).abs() < 1e-12, "got {e}");
    assert_eq!(value(coords, vals, ABC, (0.6, 0.5)), 2.0);
    assert_eq!(value(coords, vals, ABC, (0.1, 0.0)), 1.0);
}

#[test]
fn vertex_values_are_exact() {
    for coords in [NORMAL, NARROW, LINE_1] {
        let vals = [-0.1234567, 3.3, -7.77];
        for (i, &(x, y)) in coords.iter().enumerate() {
            for p in PERMS {
                assert_eq!(value(coords, vals, permuted(p), (x, y)), vals[i]);
            }
        }
    }
}

#[test]
fn middle_vertex_value_returned_on_coincidence() {
    assert_eq!(value(LINE_1, [42.0, 2.0, 3.0], ABC, (0.3, 0.2)), 42.0);
}

#[test]
fn missing_labels_surface() {
    let pts = abc_points(NORMAL);
    let q = vector![0.25, 0.4];
    let err = is_in_triangle(&pts, ["a", "b", "z"], q, GeomCfg::default()).unwrap_err();
    assert_eq!(
        err,
        Error::MissingLabel {
            label: "z".into(),
            table: TableKind::Coordinates
        }
    );
    let vals: ValueTable = [("a", 1.0), ("b", 2.0)].into_iter().collect();
    let err = expected_value(&vals, &pts, ABC, q, GeomCfg::default()).unwrap_err();
    assert_eq!(
        err,
        Error::MissingLabel {
            label: "c".into(),
            table: TableKind::Values
        }
    );
}

#[test]
fn sampled_points_are_members() {
    let pts = abc_points(NARROW);
    let cfg = GeomCfg::default();
    for coords in [NORMAL, NARROW, LINE_2] {
        let pts_k = abc_points(coords);
        let shape = Shape::from_labels(&pts_k, ABC, cfg).unwrap();
        let tok = ReplayToken { seed: 7, index: 0 };
        let draws = sample_points(&shape, 64, tok);
        assert_eq!(draws, sample_points(&shape, 64, tok));
        for q in draws {
            assert!(shape.contains(q, cfg), "{q:?} not in {coords:?}");
        }
    }
    let shape = Shape::from_labels(&pts, ABC, cfg).unwrap();
    let a = sample_points(&shape, 4, ReplayToken { seed: 7, index: 0 });
    let b = sample_points(&shape, 4, ReplayToken { seed: 7, index: 1 });
    assert_ne!(a, b);
}

fn coord() -> impl Strategy<Value = f64> {
    (0i32..=1000).prop_map(|k| k as f64 / 1000.0)
}

fn point() -> impl Strategy<Value = (f64, f64)> {
    (coord(), coord())
}

proptest! {
    #[test]
    fn permutation_invariance(
        a in point(), b in point(), c in point(), q in point(),
        vals in prop::array::uniform3(-10.0f64..10.0),
    ) {
        let coords = [a, b, c];
        let pts = abc_points(coords);
        let table = abc_values(vals);
        let qv = vector![q.0, q.1];
        let cfg = GeomCfg::default();
        let member = is_in_triangle(&pts, ABC, qv, cfg).unwrap();
        let e = expected_value(&table, &pts, ABC, qv, cfg).unwrap();
        for p in PERMS {
            prop_assert_eq!(is_in_triangle(&pts, permuted(p), qv, cfg).unwrap(), member);
            let ep = expected_value(&table, &pts, permuted(p), qv, cfg).unwrap();
            prop_assert_eq!(ep, e);
        }
    }

    #[test]
    fn affine_fields_are_reproduced(
        a in point(), b in point(), c in point(),
        w in prop::array::uniform3(0.0f64..1.0),
        slope in prop::array::uniform3(-5.0f64..5.0),
    ) {
        let cfg = GeomCfg::default();
        let pts = abc_points([a, b, c]);
        let shape = Shape::from_labels(&pts, ABC, cfg).unwrap();
        prop_assume!(!shape.is_degenerate());
        let total = w[0] + w[1] + w[2];
        prop_assume!(total > 1e-6);
        let [pa, pb, pc] = [a, b, c].map(|(x, y)| vector![x, y]);
        let q = (pa * w[0] + pb * w[1] + pc * w[2]) / total;
        let f = |p: Point| slope[0] * p.x + slope[1] * p.y + slope[2];
        let table = abc_values([f(pa), f(pb), f(pc)]);
        prop_assert!(shape.contains(q, cfg));
        let e = shape.interpolate(&table, q, cfg).unwrap();
        prop_assert!((e - f(q)).abs() < 1e-6, "expected {} got {}", f(q), e);
    }

    #[test]
    fn collinear_points_beyond_extremes_are_outside(
        t in prop::array::uniform3(0.0f64..1.0),
        beyond in 0.01f64..1.0,
    ) {
        let origin = vector![0.1, 0.2];
        let dir = vector![0.5, 0.3];
        let coords = t.map(|s| {
            let p = origin + dir * s;
            (p.x, p.y)
        });
        let pts = abc_points(coords);
        let cfg = GeomCfg::default();
        let shape = Shape::from_labels(&pts, ABC, cfg).unwrap();
        prop_assert!(shape.is_degenerate());
        let hi = t.iter().cloned().fold(f64::MIN, f64::max);
        let lo = t.iter().cloned().fold(f64::MAX, f64::min);
        prop_assert!(!shape.contains(origin + dir * (hi + beyond), cfg));
        prop_assert!(!shape.contains(origin + dir * (lo - beyond), cfg));
        prop_assert!(shape.contains(origin + dir * ((lo + hi) / 2.0), cfg));
    }
}
