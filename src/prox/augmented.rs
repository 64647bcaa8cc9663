//! Augmented Lagrangian of the ADMM $`x`$-update

use crate::smooth::SmoothObjective;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// The smooth objective seen by the inner solver during one outer iteration
///
/// ```math
/// L_\rho(x) = f(x) + u^H(x - z) + \frac{\rho}{2}\|x - z\|_2^2, \qquad
/// \nabla L_\rho(x) = \nabla f(x) + u + \rho(x - z)
/// ```
/// with $`u`$ the dual variable. `u` and `z` are borrowed, so they
/// are read at every evaluation and can not be changed while the inner
/// solver runs.
pub struct AugmentedObjective<'a, F: ?Sized, S> {
    f: &'a F,
    u: ArrayView1<'a, S>,
    z: ArrayView1<'a, S>,
    rho: S,
}

impl<'a, F, S> AugmentedObjective<'a, F, S>
where
    F: SmoothObjective<S> + ?Sized,
    S: NdFloat,
{
    pub fn new(f: &'a F, u: ArrayView1<'a, S>, z: ArrayView1<'a, S>, rho: S) -> Self {
        AugmentedObjective { f, u, z, rho }
    }

    /// $`u - \rho z`$, the part of $`\nabla L_\rho`$ that changes between
    /// outer iterations
    pub fn correction(&self) -> Array1<S> {
        let mut c = self.u.to_owned();
        c.scaled_add(-self.rho, &self.z);
        c
    }

    /// $`L_\rho(x) - f(x)`$
    pub fn coupling(&self, x: ArrayView1<S>) -> S {
        let r = &x - &self.z;
        let half = S::one() / (S::one() + S::one());
        self.u.dot(&r) + half * self.rho * r.dot(&r)
    }
}

impl<'a, F, S> SmoothObjective<S> for AugmentedObjective<'a, F, S>
where
    F: SmoothObjective<S> + ?Sized,
    S: NdFloat,
{
    fn evaluate(&self, x: ArrayView1<S>) -> (S, Array1<S>) {
        let (value, mut grad) = self.f.evaluate(x);
        let value = value + self.coupling(x);
        grad += &self.u;
        grad.scaled_add(self.rho, &x);
        grad.scaled_add(-self.rho, &self.z);
        (value, grad)
    }
}
