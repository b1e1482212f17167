//! Curated surface for downstream crates (CLI, bindings).
//!
//! Prefer these re-exports over reaching into submodules; internals such as the solver
//! loop stay private.

pub use crate::ball::{Miniball, MiniballCfg, MiniballError, Quality, Verbosity, EPS};
pub use crate::points::{
    parse_points, random_ball_points, random_point_set, read_points, write_points,
    ArrayPointSet, FormatError, PointSet, PointSetError,
};
pub use crate::subspan::AffineSubspan;
