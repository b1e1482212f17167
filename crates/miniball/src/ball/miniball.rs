use std::fmt;

use super::cfg::MiniballCfg;
use super::quality::Quality;
use super::solver::Solver;
use super::MiniballError;
use crate::points::{squared_distance, PointSet};

/// The smallest enclosing ball of a point set, computed on construction.
///
/// The point set is borrowed for the lifetime of the instance and must not change; the
/// result does not track later edits. An empty point set yields an empty miniball, for
/// which center and radius are undefined.
pub struct Miniball<'a, P: PointSet + ?Sized> {
    points: &'a P,
    solver: Option<Solver<'a, P>>,
}

impl<'a, P: PointSet + ?Sized> Miniball<'a, P> {
    /// Computes the miniball with the default configuration (no iteration cap).
    pub fn new(points: &'a P) -> Self {
        match Self::with_cfg(points, MiniballCfg::default()) {
            Ok(mb) => mb,
            Err(_) => unreachable!("an uncapped run always converges or never returns"),
        }
    }

    /// Computes the miniball with an explicit configuration.
    pub fn with_cfg(points: &'a P, cfg: MiniballCfg) -> Result<Self, MiniballError> {
        if points.size() == 0 {
            return Ok(Self {
                points,
                solver: None,
            });
        }
        let mut solver = Solver::init(points, cfg);
        solver.run()?;
        Ok(Self {
            points,
            solver: Some(solver),
        })
    }

    #[inline]
    fn solved(&self) -> &Solver<'a, P> {
        match &self.solver {
            Some(s) => s,
            None => panic!("the miniball of an empty point set has no center or radius"),
        }
    }

    /// Whether the point set was empty (the only case with an empty miniball).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solver.is_none()
    }

    /// Number of input points.
    #[inline]
    pub fn size(&self) -> usize {
        self.points.size()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.points.dimension()
    }

    /// Pre: `!is_empty()`.
    #[inline]
    pub fn center(&self) -> &[f64] {
        self.solved().center.as_slice()
    }

    /// Pre: `!is_empty()`.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.solved().radius
    }

    /// Equals `radius() * radius()`. Pre: `!is_empty()`.
    #[inline]
    pub fn squared_radius(&self) -> f64 {
        self.solved().squared_radius
    }

    /// Iterations of the main loop (0 for an empty point set).
    #[inline]
    pub fn iterations(&self) -> usize {
        self.solver.as_ref().map_or(0, |s| s.iteration)
    }

    /// Size of the final support (0 for an empty point set).
    #[inline]
    pub fn support_size(&self) -> usize {
        self.solver.as_ref().map_or(0, |s| s.support.size())
    }

    /// Indices (into the point set) of the points that support the ball, i.e. an affinely
    /// independent subset on the boundary whose convex hull contains the center.
    pub fn support(&self) -> Vec<usize> {
        self.solver
            .as_ref()
            .map_or_else(Vec::new, |s| s.support.members().to_vec())
    }

    /// Verifies the computed ball. Meant for tests and diagnostics: O(n·d + d³).
    ///
    /// Pre: `!is_empty()`.
    pub fn verify(&self) -> Quality {
        let s = self.solved();
        let support = &s.support;
        let center = s.center.as_slice();
        let radius = s.radius;

        // center in the convex hull?
        let lambdas = support.affine_coefficients(center);
        let min_lambda = lambdas.iter().copied().fold(1.0, f64::min);

        // all points in the ball, all support points on its boundary?
        let mut max_overlength: f64 = 0.0;
        let mut min_underlength: f64 = 0.0;
        for k in 0..self.points.size() {
            let dist = squared_distance(self.points, k, center).sqrt();
            let ball_error = dist - radius;
            max_overlength = max_overlength.max(ball_error);
            if support.is_member(k) {
                min_underlength = min_underlength.min(ball_error);
            }
        }

        // relative to the radius unless that is zero
        let rel = if radius > 0.0 { radius } else { 1.0 };
        Quality::new(
            support.representation_error(),
            min_lambda,
            max_overlength / rel,
            (min_underlength / rel).abs(),
            s.iteration,
            support.size(),
        )
    }
}

impl<P: PointSet + ?Sized> fmt::Display for Miniball<'_, P> {
    /// Includes the quality report, so this is as expensive as [`Miniball::verify`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Miniball [")?;
        if self.is_empty() {
            f.write_str("empty")?;
        } else {
            f.write_str("center=(")?;
            for (i, x) in self.center().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{x}")?;
            }
            write!(
                f,
                "), radius={}, squared_radius={}, quality={}",
                self.radius(),
                self.squared_radius(),
                self.verify()
            )?;
        }
        f.write_str("]")
    }
}
