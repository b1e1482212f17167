use miniball::api::{ArrayPointSet, PointSetError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub fn points_from_py_rows(rows: &[Vec<f64>]) -> PyResult<ArrayPointSet> {
    ArrayPointSet::from_rows(rows).map_err(map_point_set_err)
}

pub fn map_point_set_err(err: PointSetError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
