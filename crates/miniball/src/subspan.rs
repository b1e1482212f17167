//! Affine hull of a non-empty set of affinely independent points.
//!
//! Purpose
//! - Track `aff(M)` for a support set `M` of at most `dim + 1` points while points are
//!   inserted and removed one at a time, in `O(dim²)` per update.
//! - Answer the two queries the solver needs: the shortest vector from a point to
//!   `aff(M)`, and the affine coefficients of a point that lies in `aff(M)`.
//!
//! Representation
//! - `M` is a set of indices into a fixed point set `S`. `members[rank]` is the *origin*;
//!   the displacements `S[members[i]] - origin` for `i < rank` form the columns of `A = QR`.
//! - `Q` is `dim × dim` orthogonal; `R` is upper triangular on its first `rank` logical
//!   columns. Logical column `i` of `R` lives in physical column `cols[i]`, so deleting a
//!   column relinks slots instead of moving data.
//! - Every structural change is followed by Givens rotations only, so `Q` stays orthogonal
//!   no matter how many updates accumulate.
//!
//! References
//! - Golub & Van Loan, "Matrix Computations" (2nd ed.), §5.1.8 (Givens) and §12.6 (QR updating).
//! - Code cross-refs: `ball::Miniball` (sole owner of an instance during a run).

use nalgebra::{DMatrix, DVector};

use crate::points::PointSet;

/// Coefficients `(c, s)` of a plane rotation with `c·a + s·b = ±hypot(a, b)` and
/// `c·b - s·a = 0`. Signs are not normalized; callers must not rely on them.
#[inline]
fn givens(a: f64, b: f64) -> (f64, f64) {
    if b == 0.0 {
        (1.0, 0.0)
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = 1.0 / (1.0 + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = 1.0 / (1.0 + t * t).sqrt();
        (c, c * t)
    }
}

/// `aff(M)` for a subset `M` of a borrowed point set, kept as an incremental QR factorization.
pub struct AffineSubspan<'a, P: PointSet + ?Sized> {
    points: &'a P,
    dim: usize,
    /// `membership[i]` iff `S[i] ∈ M`.
    membership: Vec<bool>,
    /// `members[i]` is the index into `S` of the `i`-th point of `M`;
    /// `members[rank]` is the origin.
    members: Vec<usize>,
    q: DMatrix<f64>,
    r: DMatrix<f64>,
    /// Logical column → physical column of `r`.
    cols: Vec<usize>,
    // scratch for column insertion and rank-1 updates
    u: DVector<f64>,
    w: DVector<f64>,
    rank: usize,
}

impl<'a, P: PointSet + ?Sized> AffineSubspan<'a, P> {
    /// `aff({S[k]})`. `S` must not change while the instance is alive.
    pub fn new(points: &'a P, k: usize) -> Self {
        let dim = points.dimension();
        assert!(k < points.size(), "initial member {k} out of range");
        let mut membership = vec![false; points.size()];
        membership[k] = true;
        let mut members = vec![0; dim + 1];
        members[0] = k;
        Self {
            points,
            dim,
            membership,
            members,
            q: DMatrix::identity(dim, dim),
            r: DMatrix::zeros(dim, dim),
            cols: (0..dim).collect(),
            u: DVector::zeros(dim),
            w: DVector::zeros(dim),
            rank: 0,
        }
    }

    /// Ambient dimension (not the rank).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// `|M|`, between 1 and `dim + 1`.
    #[inline]
    pub fn size(&self) -> usize {
        self.rank + 1
    }

    /// `|M| - 1`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether `S[i] ∈ M`. O(1).
    #[inline]
    pub fn is_member(&self, i: usize) -> bool {
        self.membership[i]
    }

    /// Global index of some member of `M` (the origin).
    #[inline]
    pub fn any_member(&self) -> usize {
        self.origin()
    }

    /// Global index of the `i`-th member of `M`. The order is internal and only changes on
    /// [`add`](Self::add) and [`remove`](Self::remove).
    #[inline]
    pub fn global_index(&self, i: usize) -> usize {
        assert!(i < self.size(), "local index {i} out of range");
        self.members[i]
    }

    /// Global indices of all members, in local order.
    pub fn members(&self) -> &[usize] {
        &self.members[..self.size()]
    }

    #[inline]
    fn origin(&self) -> usize {
        self.members[self.rank]
    }

    #[inline]
    fn coord(&self, i: usize, j: usize) -> f64 {
        self.points.coord(i, j)
    }

    /// Rotate columns `k` and `k + 1` of `Q` by `(c, s)`.
    #[inline]
    fn rotate_q(&mut self, k: usize, c: f64, s: f64) {
        for i in 0..self.dim {
            let a = self.q[(i, k)];
            let b = self.q[(i, k + 1)];
            self.q[(i, k)] = c * a + s * b;
            self.q[(i, k + 1)] = c * b - s * a;
        }
    }

    /// Rotate rows `k` and `k + 1` of the logical `R`-columns `from..rank`.
    #[inline]
    fn rotate_r_rows(&mut self, k: usize, from: usize, c: f64, s: f64) {
        for j in from..self.rank {
            let col = self.cols[j];
            let a = self.r[(k, col)];
            let b = self.r[(k + 1, col)];
            self.r[(k, col)] = c * a + s * b;
            self.r[(k + 1, col)] = c * b - s * a;
        }
    }

    /// Append `u` as logical column `rank` of `A = QR` and restore triangularity.
    /// Works with the old `rank`; the caller increments it afterwards.
    fn append_column(&mut self) {
        debug_assert!(self.rank < self.dim);
        let col = self.cols[self.rank];

        // new column = Q^T u
        for i in 0..self.dim {
            self.r[(i, col)] = self.q.column(i).dot(&self.u);
        }

        // zero entries dim-1 down to rank+1, each with the help of the entry above it
        for j in (self.rank + 1..self.dim).rev() {
            let (c, s) = givens(self.r[(j - 1, col)], self.r[(j, col)]);
            self.r[(j - 1, col)] = c * self.r[(j - 1, col)] + s * self.r[(j, col)];
            self.r[(j, col)] = 0.0;
            self.rotate_q(j - 1, c, s);
        }
    }

    /// Insert `S[index]` into `M`. O(dim²).
    ///
    /// Pre: `!is_member(index)` and `size() <= dim`, and `S[index] ∉ aff(M)`.
    pub fn add(&mut self, index: usize) {
        assert!(!self.is_member(index), "point {index} is already a member");
        assert!(self.rank < self.dim, "subspan already has full rank");

        let o = self.origin();
        for i in 0..self.dim {
            self.u[i] = self.coord(index, i) - self.coord(o, i);
        }
        self.append_column();

        // the new point takes slot `rank`, the origin moves up by one
        self.membership[index] = true;
        self.members[self.rank + 1] = self.members[self.rank];
        self.members[self.rank] = index;
        self.rank += 1;
    }

    /// Remove the `local`-th member of `M`. O(dim²).
    ///
    /// Pre: `size() > 1`.
    pub fn remove(&mut self, local: usize) {
        assert!(self.size() > 1, "cannot remove the last member");
        assert!(local < self.size(), "local index {local} out of range");

        let removed = self.members[local];
        self.membership[removed] = false;

        if local == self.rank {
            // The origin goes. The right-most other member becomes the new origin, so every
            // remaining column p - o_old turns into p - o_new = (p - o_old) + (o_old - o_new).
            let o = self.origin();
            let next = self.members[self.rank - 1];
            for i in 0..self.dim {
                self.u[i] = self.coord(o, i) - self.coord(next, i);
            }
            self.rank -= 1;
            self.special_rank_1_update();
        } else {
            // Delete a column: shift later slots left and recycle the freed physical column.
            let freed = self.cols[local];
            for j in local + 1..self.rank {
                self.cols[j - 1] = self.cols[j];
                self.members[j - 1] = self.members[j];
            }
            self.members[self.rank - 1] = self.members[self.rank];
            self.rank -= 1;
            self.cols[self.rank] = freed;
            self.hessenberg_clear(local);
        }
    }

    /// Given `R` in upper Hessenberg form whose subdiagonal entries before `pos` are already
    /// zero, clear the remaining ones.
    fn hessenberg_clear(&mut self, pos: usize) {
        for k in pos..self.rank {
            let col = self.cols[k];
            let (c, s) = givens(self.r[(k, col)], self.r[(k + 1, col)]);
            self.r[(k, col)] = c * self.r[(k, col)] + s * self.r[(k + 1, col)];
            self.r[(k + 1, col)] = 0.0;
            self.rotate_r_rows(k, k + 1, c, s);
            self.rotate_q(k, c, s);
        }
    }

    /// Update `A = QR` to `A + u·[1, …, 1] = Q'R'` over the active columns.
    fn special_rank_1_update(&mut self) {
        // w = Q^T u
        for i in 0..self.dim {
            self.w[i] = self.q.column(i).dot(&self.u);
        }

        // Rotate w down to a multiple of e_1, recording the rotations in R and Q.
        // Each step turns a zero subdiagonal entry of R into a nonzero one, leaving R
        // upper Hessenberg.
        for k in (1..self.dim).rev() {
            let (c, s) = givens(self.w[k - 1], self.w[k]);
            self.w[k - 1] = c * self.w[k - 1] + s * self.w[k];

            if k - 1 < self.rank {
                // first affected column has an implicit zero in row k
                let col = self.cols[k - 1];
                self.r[(k, col)] = -s * self.r[(k - 1, col)];
                self.r[(k - 1, col)] *= c;
            }
            self.rotate_r_rows(k - 1, k, c, s);
            self.rotate_q(k - 1, c, s);
        }

        // Only w[0] survived, so adding w·[1, …, 1] touches row 0 alone.
        for j in 0..self.rank {
            let col = self.cols[j];
            self.r[(0, col)] += self.w[0];
        }

        self.hessenberg_clear(0);
    }

    /// Vector `w` from `p` to its nearest point in `aff(M)`; returns `|w|²`. O(dim·rank).
    pub fn shortest_vector_to_span(&self, p: &[f64], w: &mut DVector<f64>) -> f64 {
        debug_assert_eq!(p.len(), self.dim);
        let o = self.origin();
        for i in 0..self.dim {
            w[i] = self.coord(o, i) - p[i];
        }

        // remove the components along the first `rank` columns of Q
        for j in 0..self.rank {
            let qj = self.q.column(j);
            let scale = qj.dot(w);
            w.axpy(-scale, &qj, 1.0);
        }

        w.norm_squared()
    }

    /// The `size()` coefficients `λ` with `Σλ = 1` and `p = Σ λ_i·S[global_index(i)]`.
    ///
    /// Pre: `p ∈ aff(M)`; `lambdas.len() >= size()`. O(dim·rank).
    pub fn find_affine_coefficients(&self, p: &[f64], lambdas: &mut [f64]) {
        debug_assert_eq!(p.len(), self.dim);
        debug_assert!(lambdas.len() >= self.size());
        let o = self.origin();

        // p - origin = Σ_{i<rank} λ_i (S[i] - origin), so solve R λ = Q^T (p - origin)
        // by back-substitution; the origin's coefficient is whatever makes the sum one.
        let mut origin_lambda = 1.0;
        for j in (0..self.rank).rev() {
            let mut wj = 0.0;
            for i in 0..self.dim {
                wj += self.q[(i, j)] * (p[i] - self.coord(o, i));
            }
            for k in j + 1..self.rank {
                wj -= lambdas[k] * self.r[(j, self.cols[k])];
            }
            let lj = wj / self.r[(j, self.cols[j])];
            lambdas[j] = lj;
            origin_lambda -= lj;
        }
        lambdas[self.rank] = origin_lambda;
    }

    /// Convenience wrapper around [`find_affine_coefficients`](Self::find_affine_coefficients).
    pub fn affine_coefficients(&self, p: &[f64]) -> Vec<f64> {
        let mut lambdas = vec![0.0; self.size()];
        self.find_affine_coefficients(p, &mut lambdas);
        lambdas
    }

    /// Largest deviation when each member is written in terms of `M`: its own coefficient
    /// should be 1, all others 0. Diagnostics only; allocates.
    pub fn representation_error(&self) -> f64 {
        let mut lambdas = vec![0.0; self.size()];
        let mut pt = vec![0.0; self.dim];
        let mut max: f64 = 0.0;

        for j in 0..self.size() {
            let g = self.global_index(j);
            for (i, x) in pt.iter_mut().enumerate() {
                *x = self.coord(g, i);
            }
            self.find_affine_coefficients(&pt, &mut lambdas);
            for (i, l) in lambdas.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                max = max.max((l - expected).abs());
            }
        }
        max
    }
}
