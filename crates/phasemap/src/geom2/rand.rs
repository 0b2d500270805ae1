//! Reproducible query points inside a `Shape` (uniform on the triangle or segment).
//!
//! Used to probe interpolation over a region, e.g. sampling compositions inside a
//! hull facet. Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::shape::Shape;
use super::types::Point;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One uniform point in `shape`.
pub fn sample_point<R: Rng>(shape: &Shape<'_>, rng: &mut R) -> Point {
    let v = shape.vertices();
    match shape {
        Shape::Triangle { .. } => {
            // Square-root parametrization keeps the density uniform over the area.
            let r1: f64 = rng.gen::<f64>().sqrt();
            let r2: f64 = rng.gen();
            v[0].point * (1.0 - r1) + v[1].point * (r1 * (1.0 - r2)) + v[2].point * (r1 * r2)
        }
        Shape::Segment { .. } => {
            let t: f64 = rng.gen();
            v[0].point + (v[2].point - v[0].point) * t
        }
    }
}

/// `n` uniform points in `shape`, reproducible from `tok`.
pub fn sample_points(shape: &Shape<'_>, n: usize, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    (0..n).map(|_| sample_point(shape, &mut rng)).collect()
}
