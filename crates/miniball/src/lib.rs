//! Smallest enclosing balls of point sets in arbitrary dimension.
//!
//! Layout
//! - `points`: the `PointSet` capability, dense storage, text I/O, random sets.
//! - `subspan`: incremental QR factorization of the affine hull of the support.
//! - `ball`: the miniball solver, its configuration and quality report.
//!
//! ```
//! use miniball::prelude::*;
//!
//! let pts = ArrayPointSet::from_rows(&[vec![1.0, 2.0], vec![5.0, 2.0]]).unwrap();
//! let mb = Miniball::new(&pts);
//! assert!((mb.radius() - 2.0).abs() < 1e-12);
//! ```

pub mod api;
pub mod ball;
pub mod points;
pub mod subspan;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use ball::{Miniball, MiniballCfg, MiniballError, Quality, Verbosity};
pub use points::{ArrayPointSet, PointSet};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::ball::{Miniball, MiniballCfg, MiniballError, Quality, Verbosity};
    pub use crate::points::{
        parse_points, random_ball_points, random_point_set, read_points, write_points,
        ArrayPointSet, FormatError, PointSet, PointSetError,
    };
}

/// Miniball of `rows` (one point per row) as `(center, radius, squared_radius)`, or `None`
/// for an empty input. Convenience entry point for bindings.
pub fn miniball_of_rows(
    rows: &[Vec<f64>],
) -> Result<Option<(Vec<f64>, f64, f64)>, points::PointSetError> {
    let pts = ArrayPointSet::from_rows(rows)?;
    let mb = Miniball::new(&pts);
    if mb.is_empty() {
        return Ok(None);
    }
    Ok(Some((mb.center().to_vec(), mb.radius(), mb.squared_radius())))
}
