//! Smooth Minimization
//!
//! For minimizing a "smooth" objective function, $`f`$, with an
//! $`L`$-Lipschitz continuos gradient, i.e.
//! ```math
//! \| \nabla f(x) - \nabla f(z) \|_2 \leq L \| x - z \|_2
//! ```
//! Objectives are supplied through [`SmoothObjective`], which returns the
//! value and the gradient at a point in one call. Any closure of the form
//! `Fn(ArrayView1<S>) -> (S, Array1<S>)` is a smooth objective.
//!
//! The solver here, [`Lbfgs`], serves as the inner solver of the
//! ADMM driver in [`crate::prox`], but is usable on its own.

mod lbfgs;
pub use lbfgs::*;
mod quadratic;
pub use quadratic::*;

use ndarray::prelude::*;

/// A differentiable cost $`f`$ evaluated as the pair $`(f(x), \nabla f(x))`$
///
/// Implementations must be pure in `x`: evaluating the same point twice gives
/// the same pair, regardless of what was evaluated in between.
pub trait SmoothObjective<S> {
    fn evaluate(&self, x: ArrayView1<S>) -> (S, Array1<S>);

    /// Objective value only
    fn value(&self, x: ArrayView1<S>) -> S {
        self.evaluate(x).0
    }
}

impl<S, F> SmoothObjective<S> for F
where
    F: Fn(ArrayView1<S>) -> (S, Array1<S>),
{
    #[inline]
    fn evaluate(&self, x: ArrayView1<S>) -> (S, Array1<S>) {
        self(x)
    }
}

/// Do nothing function for optional user callback (returns false)
#[allow(clippy::needless_pass_by_value)]
pub fn nop<T, D>(_x: ArrayView<T, D>, _itr: usize) -> bool {
    false
}
