//! PyO3 bindings for the `miniball` crate.
//!
//! Notes
//! - Keep bindings thin: points cross the boundary as lists of rows, results as tuples.
//! - An empty point set yields `None` rather than raising.

use pyo3::prelude::*;

mod ball;
mod common;

#[pymodule]
fn miniball_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", miniball::VERSION)?;
    ball::register(m)?;
    Ok(())
}
