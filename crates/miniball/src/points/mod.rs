//! Point sets: the narrow read-only capability consumed by the solver.
//!
//! Purpose
//! - `PointSet` exposes exactly what the algorithm needs (size, dimension, coordinate
//!   lookup) so alternative storage can be swapped in without touching the core.
//! - `ArrayPointSet` is the dense row-major default; `DMatrix<f64>` (points as rows)
//!   works out of the box as well.
//!
//! Point sets are assumed immutable for the lifetime of a computation.
//!
//! Code cross-refs: `subspan::AffineSubspan`, `ball::Miniball`, `io::{parse_points,write_points}`.

pub mod io;
pub mod rand;

use nalgebra::DMatrix;
use std::fmt;

pub use io::{parse_points, read_points, write_points, FormatError};
pub use self::rand::{random_ball_points, random_point_set};

/// Read access to `size()` points with `dimension()` Euclidean coordinates each.
pub trait PointSet {
    /// Number of points.
    fn size(&self) -> usize;
    /// Dimension of the ambient space.
    fn dimension(&self) -> usize;
    /// The `j`-th coordinate of the `i`-th point.
    fn coord(&self, i: usize, j: usize) -> f64;
}

impl<T: PointSet + ?Sized> PointSet for &T {
    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }
    #[inline]
    fn dimension(&self) -> usize {
        (**self).dimension()
    }
    #[inline]
    fn coord(&self, i: usize, j: usize) -> f64 {
        (**self).coord(i, j)
    }
}

/// Rows are points, columns are coordinates.
impl PointSet for DMatrix<f64> {
    #[inline]
    fn size(&self) -> usize {
        self.nrows()
    }
    #[inline]
    fn dimension(&self) -> usize {
        self.ncols()
    }
    #[inline]
    fn coord(&self, i: usize, j: usize) -> f64 {
        self[(i, j)]
    }
}

/// Errors when assembling a point set from caller data.
#[derive(Debug, Clone, PartialEq)]
pub enum PointSetError {
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    NonFinite {
        row: usize,
        col: usize,
    },
}

impl fmt::Display for PointSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} coordinates, expected {expected}"),
            Self::NonFinite { row, col } => {
                write!(f, "coordinate ({row}, {col}) is not finite")
            }
        }
    }
}

impl std::error::Error for PointSetError {}

/// `n` points in dimension `d`, stored row-major in one contiguous buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayPointSet {
    d: usize,
    n: usize,
    c: Vec<f64>,
}

impl ArrayPointSet {
    /// `n` points of dimension `d`, all at the origin.
    pub fn new(d: usize, n: usize) -> Self {
        Self {
            d,
            n,
            c: vec![0.0; n * d],
        }
    }

    /// Wrap a row-major buffer of `n` points. Pre: `c.len() == n * d`.
    pub(crate) fn from_row_major(d: usize, n: usize, c: Vec<f64>) -> Self {
        debug_assert_eq!(Some(c.len()), n.checked_mul(d));
        Self { d, n, c }
    }

    /// Build from explicit rows. All rows must have the same length and finite entries.
    /// An empty slice yields an empty point set of dimension 0.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, PointSetError> {
        let d = rows.first().map_or(0, Vec::len);
        let mut c = Vec::with_capacity(rows.len() * d);
        for (row, coords) in rows.iter().enumerate() {
            if coords.len() != d {
                return Err(PointSetError::RaggedRow {
                    row,
                    expected: d,
                    found: coords.len(),
                });
            }
            if let Some(col) = coords.iter().position(|x| !x.is_finite()) {
                return Err(PointSetError::NonFinite { row, col });
            }
            c.extend_from_slice(coords);
        }
        Ok(Self {
            d,
            n: rows.len(),
            c,
        })
    }

    /// Sets the `j`-th coordinate of the `i`-th point.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        debug_assert!(i < self.n && j < self.d);
        self.c[i * self.d + j] = v;
    }

    /// Coordinates of point `i` as a slice.
    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.c[i * self.d..(i + 1) * self.d]
    }
}

impl PointSet for ArrayPointSet {
    #[inline]
    fn size(&self) -> usize {
        self.n
    }
    #[inline]
    fn dimension(&self) -> usize {
        self.d
    }
    #[inline]
    fn coord(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.n && j < self.d);
        self.c[i * self.d + j]
    }
}

impl fmt::Display for ArrayPointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for i in 0..self.n {
            f.write_str("[")?;
            for (j, x) in self.point(i).iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{x}")?;
            }
            f.write_str("]")?;
            if i + 1 < self.n {
                f.write_str(", ")?;
            }
        }
        f.write_str("}")
    }
}

/// Squared Euclidean distance between point `i` of `pts` and `x`.
#[inline]
pub(crate) fn squared_distance<P: PointSet + ?Sized>(pts: &P, i: usize, x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(j, xj)| {
            let d = pts.coord(i, j) - xj;
            d * d
        })
        .sum()
}
