//! Smallest enclosing ball ("miniball") of a finite point set in `R^d`.
//!
//! Purpose
//! - Compute the unique ball of minimal radius containing all points, exactly and robustly
//!   in arbitrary dimension, via the iterative walk-and-drop algorithm of Fischer, Gärtner
//!   and Kutz ("Fast smallest-enclosing-ball computation in high dimensions", ESA 2003).
//! - Report post-hoc quality figures (`Quality`) for tests and diagnostics.
//!
//! Structure
//! - `cfg`: tolerance, iteration cap, verbosity.
//! - `solver`: the main loop; owns the `AffineSubspan` of the current support.
//! - `miniball`: the immutable result holder returned to callers.
//! - `quality`: verification report.
//!
//! Code cross-refs: `subspan::AffineSubspan`, `points::PointSet`.

mod cfg;
mod miniball;
mod quality;
mod solver;

pub use cfg::{MiniballCfg, Verbosity, EPS};
pub use miniball::Miniball;
pub use quality::Quality;

use std::fmt;

/// Failure of a configured miniball run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiniballError {
    /// `MiniballCfg::max_iterations` was exhausted before the center reached `conv(support)`.
    NotConverged { iterations: usize },
}

impl fmt::Display for MiniballError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConverged { iterations } => {
                write!(f, "miniball did not converge within {iterations} iterations")
            }
        }
    }
}

impl std::error::Error for MiniballError {}

#[cfg(test)]
mod tests;
