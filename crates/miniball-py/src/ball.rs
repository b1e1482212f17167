//! Miniball bindings (kept separate so `lib.rs` stays tiny).

use crate::common::{map_point_set_err, points_from_py_rows};
use miniball::api::{random_ball_points, Miniball, MiniballCfg};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// `(center, radius, squared_radius)` of the smallest ball enclosing `points`,
/// or `None` for an empty list.
#[pyfunction]
#[pyo3(name = "miniball")]
pub fn smallest_ball(points: Vec<Vec<f64>>) -> PyResult<Option<(Vec<f64>, f64, f64)>> {
    miniball::miniball_of_rows(&points).map_err(map_point_set_err)
}

/// Like `miniball`, but with an iteration cap and the support point indices.
///
/// Returns `(center, radius, squared_radius, support)`.
#[pyfunction]
#[pyo3(signature = (points, max_iterations=None))]
pub fn miniball_with_support(
    points: Vec<Vec<f64>>,
    max_iterations: Option<usize>,
) -> PyResult<Option<(Vec<f64>, f64, f64, Vec<usize>)>> {
    let pts = points_from_py_rows(&points)?;
    let cfg = MiniballCfg {
        max_iterations,
        ..MiniballCfg::default()
    };
    let mb = Miniball::with_cfg(&pts, cfg)
        .map_err(|err| PyRuntimeError::new_err(err.to_string()))?;
    if mb.is_empty() {
        return Ok(None);
    }
    Ok(Some((
        mb.center().to_vec(),
        mb.radius(),
        mb.squared_radius(),
        mb.support(),
    )))
}

/// Quality report of the computed ball:
/// `(qr_inconsistency, min_convex_coefficient, max_overlength, max_underlength)`.
#[pyfunction]
pub fn miniball_quality(points: Vec<Vec<f64>>) -> PyResult<(f64, f64, f64, f64)> {
    let pts = points_from_py_rows(&points)?;
    let mb = Miniball::new(&pts);
    if mb.is_empty() {
        return Err(PyValueError::new_err("empty point set has no miniball"));
    }
    let q = mb.verify();
    Ok((
        q.qr_inconsistency(),
        q.min_convex_coefficient(),
        q.max_overlength(),
        q.max_underlength(),
    ))
}

/// `n` seeded random points in `[-1, 1]^d`, optionally pushed onto the unit sphere.
#[pyfunction]
#[pyo3(signature = (n, d, seed, boundary=false))]
pub fn random_points(n: usize, d: usize, seed: u64, boundary: bool) -> PyResult<Vec<Vec<f64>>> {
    if d == 0 {
        return Err(PyValueError::new_err("dimension must be at least 1"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let pts = random_ball_points(d, n, boundary, &mut rng);
    Ok((0..n).map(|i| pts.point(i).to_vec()).collect())
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(smallest_ball, m)?)?;
    m.add_function(wrap_pyfunction!(miniball_with_support, m)?)?;
    m.add_function(wrap_pyfunction!(miniball_quality, m)?)?;
    m.add_function(wrap_pyfunction!(random_points, m)?)?;
    Ok(())
}
