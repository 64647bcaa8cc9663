//! Quadratic and least squares costs

use super::SmoothObjective;
use crate::linop::{Adjoint, LinearOperator};
use ndarray::prelude::*;
use ndarray::NdFloat;
use ndarray_linalg::Scalar;

/// $`f(x) = \frac12 x^HQx - b^Hx`$ for a self-adjoint operator $`Q`$
///
/// With $`Q \succ 0`$ the minimizer solves $`Qx = b`$.
pub struct Quadratic<Q, S> {
    q: Q,
    b: Array1<S>,
}

impl<Q, S> Quadratic<Q, S> {
    pub fn new(q: Q, b: Array1<S>) -> Quadratic<Q, S> {
        Quadratic { q, b }
    }

    pub fn dim(&self) -> usize {
        self.b.len()
    }
}

impl<Q, S> SmoothObjective<S> for Quadratic<Q, S>
where
    S: NdFloat + Scalar,
    Q: LinearOperator<Elem = S>,
{
    fn evaluate(&self, x: ArrayView1<S>) -> (S, Array1<S>) {
        let qx = self.q.apply(&x);
        let half = S::one() / (S::one() + S::one());
        let value = half * x.dot(&qx) - self.b.dot(&x);
        (value, qx - &self.b)
    }
}

/// $`f(x) = \frac12 \|Ax-y\|_2^2 + \frac{\beta}{2}\|x\|_2^2`$
///
/// The smooth half of an elastic net problem; pair it with the L1
/// proximal operator for the non-smooth half.
pub struct LeastSquares<S> {
    a: Array2<S>,
    y: Array1<S>,
    ridge: S,
}

impl<S: NdFloat> LeastSquares<S> {
    pub fn new(a: Array2<S>, y: Array1<S>) -> LeastSquares<S> {
        LeastSquares {
            a,
            y,
            ridge: S::zero(),
        }
    }

    /// Add a ridge penalty of weight `ridge` ($`\beta`$ above)
    pub fn with_ridge(mut self, ridge: S) -> Self {
        self.ridge = ridge;
        self
    }

    pub fn dim(&self) -> usize {
        self.a.ncols()
    }
}

impl<S: NdFloat> SmoothObjective<S> for LeastSquares<S> {
    fn evaluate(&self, x: ArrayView1<S>) -> (S, Array1<S>) {
        let r = self.a.dot(&x) - &self.y;
        let half = S::one() / (S::one() + S::one());
        let value = half * (r.dot(&r) + self.ridge * x.dot(&x));
        let mut grad = self.a.adj().dot(&r);
        grad.scaled_add(self.ridge, &x);
        (value, grad)
    }
}
