//! Verification figures for a computed miniball.

use std::fmt;

/// How well a computed ball matches the theory. All fields are read-only snapshots;
/// computing the report never changes the solver state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quality {
    qr_inconsistency: f64,
    min_convex_coefficient: f64,
    max_overlength: f64,
    max_underlength: f64,
    iterations: usize,
    support_size: usize,
}

impl Quality {
    pub(crate) fn new(
        qr_inconsistency: f64,
        min_convex_coefficient: f64,
        max_overlength: f64,
        max_underlength: f64,
        iterations: usize,
        support_size: usize,
    ) -> Self {
        Self {
            qr_inconsistency,
            min_convex_coefficient,
            max_overlength,
            max_underlength,
            iterations,
            support_size,
        }
    }

    /// Deviation of the support's affine self-representation from the identity.
    /// Zero in theory, nonzero through rounding.
    #[inline]
    pub fn qr_inconsistency(&self) -> f64 {
        self.qr_inconsistency
    }

    /// Smallest affine coefficient of the center w.r.t. the support (capped at 1).
    /// Non-negative in theory; slightly negative values come from rounding.
    #[inline]
    pub fn min_convex_coefficient(&self) -> f64 {
        self.min_convex_coefficient
    }

    /// Largest distance of an input point *outside* the ball, relative to the radius.
    /// Zero iff all points are enclosed.
    #[inline]
    pub fn max_overlength(&self) -> f64 {
        self.max_overlength
    }

    /// Largest distance of a support point *inside* the ball, relative to the radius.
    /// Nonzero means the ball encloses but is not minimal.
    #[inline]
    pub fn max_underlength(&self) -> f64 {
        self.max_underlength
    }

    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[inline]
    pub fn support_size(&self) -> usize {
        self.support_size
    }

    /// Multi-line report for terminal output.
    pub fn console_fmt(&self) -> String {
        format!(
            "Solution quality:\n  \
             QR inconsistency      : {}\n  \
             min convex coefficient: {}\n  \
             max overlength        : {}\n  \
             max underlength       : {}\n  \
             iterations            : {}\n  \
             support size          : {}\n",
            self.qr_inconsistency,
            self.min_convex_coefficient,
            self.max_overlength,
            self.max_underlength,
            self.iterations,
            self.support_size,
        )
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quality [qr_inconsistency={}, min_convex_coefficient={}, max_overlength={}, \
             max_underlength={}, iterations={}, support_size={}]",
            self.qr_inconsistency,
            self.min_convex_coefficient,
            self.max_overlength,
            self.max_underlength,
            self.iterations,
            self.support_size
        )
    }
}
