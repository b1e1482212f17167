//! Solver configuration: tolerance, optional iteration cap, and diagnostics verbosity.
//!
//! Policy
//! - Defaults reproduce the reference behaviour: relative tolerance `1e-14`, no iteration
//!   cap, silent. Diagnostics are a per-solver setting, never process-wide state.

/// Relative tolerance (w.r.t. the current radius) for "center lies in the affine hull"
/// and "point does not approach the boundary".
pub const EPS: f64 = 1e-14;

/// How much the solver reports through `tracing` while it runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Silent,
    /// Support rank changes and termination.
    Info,
    /// Additionally every iteration, radius update and stopper.
    Debug,
}

/// Miniball solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct MiniballCfg {
    pub eps: f64,
    /// Give up with [`MiniballError::NotConverged`](super::MiniballError::NotConverged)
    /// after this many iterations. `None` runs until convergence.
    pub max_iterations: Option<usize>,
    pub verbosity: Verbosity,
}

impl Default for MiniballCfg {
    fn default() -> Self {
        Self {
            eps: EPS,
            max_iterations: None,
            verbosity: Verbosity::Silent,
        }
    }
}

impl MiniballCfg {
    #[inline]
    pub(crate) fn logs(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }
}
