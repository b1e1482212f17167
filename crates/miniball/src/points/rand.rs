//! Random point sets for tests, benchmarks and the CLI driver.
//!
//! Determinism: callers pass the RNG, so a seeded `StdRng` reproduces the same set.

use super::ArrayPointSet;
use rand::Rng;

/// Relative slack applied to boundary samples so they are only "almost" on the sphere,
/// which makes the instance harder than an exactly co-spherical one.
const BOUNDARY_WIGGLE: f64 = 1e-2;

/// `n` points with coordinates uniform in `[0, 1)`.
pub fn random_point_set<R: Rng + ?Sized>(d: usize, n: usize, rng: &mut R) -> ArrayPointSet {
    let mut pts = ArrayPointSet::new(d, n);
    for i in 0..n {
        for j in 0..d {
            pts.set(i, j, rng.gen::<f64>());
        }
    }
    pts
}

/// `n` points with coordinates uniform in `[-1, 1]`.
///
/// With `boundary`, every point is rescaled to lie at distance `1/(1 + δ)` from the origin,
/// `δ ∈ [0, 1e-2)` drawn per point.
pub fn random_ball_points<R: Rng + ?Sized>(
    d: usize,
    n: usize,
    boundary: bool,
    rng: &mut R,
) -> ArrayPointSet {
    let mut pts = ArrayPointSet::new(d, n);
    let mut coords = vec![0.0f64; d];
    for i in 0..n {
        loop {
            let mut len: f64 = 0.0;
            for c in coords.iter_mut() {
                *c = rng.gen_range(-1.0..=1.0);
                len += *c * *c;
            }
            if !boundary {
                break;
            }
            let norm = len.sqrt();
            // zero vectors have no direction to push outwards; resample
            if norm > 0.0 {
                let scale = 1.0 / (norm + BOUNDARY_WIGGLE * rng.gen::<f64>() * norm);
                coords.iter_mut().for_each(|c| *c *= scale);
                break;
            }
        }
        for (j, c) in coords.iter().enumerate() {
            pts.set(i, j, *c);
        }
    }
    pts
}
