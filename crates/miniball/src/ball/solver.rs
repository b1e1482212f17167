//! The iterative miniball loop.
//!
//! Invariant: the ball `B(center, radius)` contains the whole point set and has every
//! support point on its boundary.
//!
//! Each iteration computes the point of `aff(support)` closest to the center and walks
//! towards it as far as possible, i.e. until some point outside the support ("stopper")
//! touches the boundary and must join the support. Whenever the center lies in
//! `aff(support)` a point with non-positive affine coefficient is dropped; when no such
//! point exists the center lies in `conv(support)` and the ball is optimal.

use nalgebra::DVector;

use super::cfg::{MiniballCfg, Verbosity};
use super::MiniballError;
use crate::points::{squared_distance, PointSet};
use crate::subspan::AffineSubspan;

/// A point closer than `SPAN_SLACK · eps · radius` to `aff(support)` is treated as lying
/// in it. Exact members come back with QR round-off of a few `eps · radius`.
const SPAN_SLACK: f64 = 100.0;

pub(crate) struct Solver<'a, P: PointSet + ?Sized> {
    points: &'a P,
    cfg: MiniballCfg,
    dim: usize,
    pub(crate) iteration: usize,
    pub(crate) center: DVector<f64>,
    pub(crate) squared_radius: f64,
    pub(crate) radius: f64,
    pub(crate) support: AffineSubspan<'a, P>,
    center_to_aff: DVector<f64>,
    center_to_point: DVector<f64>,
    dist_to_aff: f64,
    dist_to_aff_square: f64,
    lambdas: Vec<f64>,
    point: Vec<f64>,
    point_to_aff: DVector<f64>,
}

impl<'a, P: PointSet + ?Sized> Solver<'a, P> {
    /// Center at the first point, support = one farthest point (the last one on ties).
    /// The ball contains all points and has at most twice the optimal radius.
    ///
    /// Pre: `points.size() > 0`.
    pub(crate) fn init(points: &'a P, cfg: MiniballCfg) -> Self {
        assert!(points.size() > 0, "cannot initialize a ball on an empty point set");
        let dim = points.dimension();
        let center = DVector::from_fn(dim, |i, _| points.coord(0, i));

        let mut squared_radius = 0.0;
        let mut farthest = 0;
        for j in 1..points.size() {
            let dist = squared_distance(points, j, center.as_slice());
            if dist >= squared_radius {
                squared_radius = dist;
                farthest = j;
            }
        }

        Self {
            points,
            cfg,
            dim,
            iteration: 0,
            center,
            squared_radius,
            radius: squared_radius.sqrt(),
            support: AffineSubspan::new(points, farthest),
            center_to_aff: DVector::zeros(dim),
            center_to_point: DVector::zeros(dim),
            dist_to_aff: 0.0,
            dist_to_aff_square: 0.0,
            lambdas: vec![0.0; dim + 1],
            point: vec![0.0; dim],
            point_to_aff: DVector::zeros(dim),
        }
    }

    pub(crate) fn run(&mut self) -> Result<(), MiniballError> {
        loop {
            self.iteration += 1;
            if let Some(max) = self.cfg.max_iterations {
                if self.iteration > max {
                    return Err(MiniballError::NotConverged { iterations: max });
                }
            }
            if self.cfg.logs(Verbosity::Debug) {
                tracing::debug!(
                    iteration = self.iteration,
                    support = self.support.size(),
                    "iteration"
                );
            }

            // Walking direction, unless we are (numerically) in the hull already or the
            // support is full: then try to drop a point first.
            self.compute_dist_to_aff();
            while self.dist_to_aff <= self.cfg.eps * self.radius
                || self.support.size() == self.dim + 1
            {
                if !self.successful_drop() {
                    self.log_done();
                    return Ok(());
                }
                self.compute_dist_to_aff();
            }

            let (scale, stopper) = self.find_stop_fraction();
            match stopper {
                Some(j) => {
                    self.center.axpy(scale, &self.center_to_aff, 1.0);
                    self.update_radius();
                    self.support.add(j);
                    self.log_rank();
                }
                None => {
                    // Nothing in the way: step onto aff(support). The distance is now zero
                    // in theory, but don't wait for the next iteration to notice.
                    self.center += &self.center_to_aff;
                    self.update_radius();
                    if !self.successful_drop() {
                        self.log_done();
                        return Ok(());
                    }
                }
            }
        }
    }

    fn compute_dist_to_aff(&mut self) {
        self.dist_to_aff_square = self
            .support
            .shortest_vector_to_span(self.center.as_slice(), &mut self.center_to_aff);
        self.dist_to_aff = self.dist_to_aff_square.sqrt();
    }

    fn update_radius(&mut self) {
        let any = self.support.any_member();
        self.squared_radius = squared_distance(self.points, any, self.center.as_slice());
        self.radius = self.squared_radius.sqrt();
        if self.cfg.logs(Verbosity::Debug) {
            tracing::debug!(radius = self.radius, "radius updated");
        }
    }

    /// Drop the support point with the most negative (non-positive) coefficient in the
    /// affine representation of the center. Returns false, leaving the support alone,
    /// when all coefficients are positive, i.e. the center lies in `conv(support)`.
    ///
    /// Pre: center lies in `aff(support)`.
    fn successful_drop(&mut self) -> bool {
        self.support
            .find_affine_coefficients(self.center.as_slice(), &mut self.lambdas);

        let mut smallest = 0;
        let mut minimum = 1.0;
        for (i, &l) in self.lambdas[..self.support.size()].iter().enumerate() {
            if l < minimum {
                minimum = l;
                smallest = i;
            }
        }

        if minimum <= 0.0 {
            if self.cfg.logs(Verbosity::Debug) {
                tracing::debug!(
                    point = self.support.global_index(smallest),
                    lambda = minimum,
                    "dropping support point"
                );
            }
            self.support.remove(smallest);
            self.log_rank();
            return true;
        }
        false
    }

    /// How far (as a fraction of `center_to_aff`) the center can move before a point
    /// outside the support reaches the shrinking boundary, and which point that is.
    /// `(1.0, None)` if the full step is safe.
    fn find_stop_fraction(&mut self) -> (f64, Option<usize>) {
        let mut scale = 1.0;
        let mut stopper = None;

        for j in 0..self.points.size() {
            if self.support.is_member(j) {
                continue;
            }
            for i in 0..self.dim {
                self.center_to_point[i] = self.points.coord(j, i) - self.center[i];
            }
            let dir_point_prod = self.center_to_aff.dot(&self.center_to_point);

            // Points that do not approach the boundary along the walk stay enclosed.
            let approach = self.dist_to_aff_square - dir_point_prod;
            if approach < self.cfg.eps * self.radius * self.dist_to_aff {
                continue;
            }

            // |p - (c + t·v)|² = R'² with R'² = R² - 2t|v|² + t²|v|², solved for t.
            let bound =
                (self.squared_radius - self.center_to_point.norm_squared()) / 2.0 / approach;

            // Zero is a valid bound: co-spherical points already sit on the boundary.
            if bound < scale {
                // A point of aff(support), e.g. a duplicate of a member, keeps its distance
                // to the boundary along the walk. Adding it would make R singular and the
                // next drop would remove it again, forever.
                if self.lies_in_support_span(j) {
                    if self.cfg.logs(Verbosity::Debug) {
                        tracing::debug!(point = j, bound, "skipping stopper in aff(support)");
                    }
                    continue;
                }
                if self.cfg.logs(Verbosity::Debug) {
                    tracing::debug!(stopper = j, bound, scale, "found stopper");
                }
                scale = bound;
                stopper = Some(j);
            }
        }

        (scale, stopper)
    }

    fn lies_in_support_span(&mut self, j: usize) -> bool {
        for (i, x) in self.point.iter_mut().enumerate() {
            *x = self.points.coord(j, i);
        }
        let sq = self
            .support
            .shortest_vector_to_span(&self.point, &mut self.point_to_aff);
        let tol = SPAN_SLACK * self.cfg.eps * self.radius;
        sq <= tol * tol
    }

    fn log_rank(&self) {
        if self.cfg.logs(Verbosity::Info) {
            tracing::info!(rank = self.support.rank(), "support rank");
        }
    }

    fn log_done(&self) {
        if self.cfg.logs(Verbosity::Info) {
            tracing::info!(
                iterations = self.iteration,
                radius = self.radius,
                support = self.support.size(),
                "done"
            );
        }
    }
}
