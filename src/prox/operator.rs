//! Proximal operators of constraints and regularizers

use crate::error::{real, ConfigError, Result};
use ndarray::prelude::*;
use ndarray::{Data, DataMut, NdFloat};

/// The non-smooth half $`g`$ of a composite objective, by its proximal map
///
/// ```math
/// \mathrm{prox}_{g/\rho}(v) = \mathrm{arg}\!\min_x \; g(x) + \frac{\rho}{2}\|x - v\|_2^2
/// ```
/// For the indicator of a convex set this is the Euclidean projection onto
/// the set, independent of $`\rho`$. Only [`ProximalOperator::L1`] depends
/// on $`\rho`$.
///
/// Use the checked constructors ([`box_bounds`](Self::box_bounds),
/// [`hyperplane`](Self::hyperplane), [`l1`](Self::l1)); an operator built
/// directly from its variant is checked again when handed to
/// [`Admm::new`](super::Admm::new).
#[derive(Clone, Debug, PartialEq)]
pub enum ProximalOperator<S> {
    /// $`g = 0`$, the problem is unconstrained
    NoOp,
    /// $`x_i \geq 0`$
    NonNegative,
    /// $`\ell_i \leq x_i \leq u_i`$
    Box { lower: Array1<S>, upper: Array1<S> },
    /// $`a^Hx = b`$
    Hyperplane { normal: Array1<S>, offset: S },
    /// $`g(x) = \lambda \|x\|_1`$
    L1 { lambda: S },
}

impl<S: NdFloat> ProximalOperator<S> {
    pub fn box_bounds(lower: Array1<S>, upper: Array1<S>) -> Result<Self> {
        let n = lower.len();
        let op = ProximalOperator::Box { lower, upper };
        op.check(n)?;
        Ok(op)
    }

    pub fn hyperplane(normal: Array1<S>, offset: S) -> Result<Self> {
        let n = normal.len();
        let op = ProximalOperator::Hyperplane { normal, offset };
        op.check(n)?;
        Ok(op)
    }

    pub fn l1(lambda: S) -> Result<Self> {
        let op = ProximalOperator::L1 { lambda };
        op.check(0)?;
        Ok(op)
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, ProximalOperator::NoOp)
    }

    /// Dimension fixed by the operator's parameters, if any
    pub fn dim(&self) -> Option<usize> {
        match self {
            ProximalOperator::Box { lower, .. } => Some(lower.len()),
            ProximalOperator::Hyperplane { normal, .. } => Some(normal.len()),
            _ => None,
        }
    }

    /// Validate the parameters for use on vectors of length `n`
    pub fn check(&self, n: usize) -> Result<()> {
        match self {
            ProximalOperator::NoOp | ProximalOperator::NonNegative => Ok(()),
            ProximalOperator::Box { lower, upper } => {
                dimension(n, lower.len())?;
                dimension(n, upper.len())?;
                for (index, (&l, &u)) in lower.iter().zip(upper.iter()).enumerate() {
                    if !(l <= u) {
                        return Err(ConfigError::InvertedBounds {
                            index,
                            lower: real(l),
                            upper: real(u),
                        });
                    }
                }
                Ok(())
            }
            ProximalOperator::Hyperplane { normal, .. } => {
                dimension(n, normal.len())?;
                if !(normal.dot(normal) > S::zero()) {
                    return Err(ConfigError::ZeroNormal);
                }
                Ok(())
            }
            ProximalOperator::L1 { lambda } => {
                if !(*lambda >= S::zero()) {
                    return Err(ConfigError::NegativeWeight(real(*lambda)));
                }
                Ok(())
            }
        }
    }

    /// Apply operator out-place
    pub fn apply<D>(&self, v: &ArrayBase<D, Ix1>, rho: S) -> Array1<S>
    where
        D: Data<Elem = S>,
    {
        let mut out = v.to_owned();
        self.apply_mut(&mut out, rho);
        out
    }

    /// Apply operator in-place
    pub fn apply_mut<D>(&self, v: &mut ArrayBase<D, Ix1>, rho: S)
    where
        D: DataMut<Elem = S>,
    {
        match self {
            ProximalOperator::NoOp => {}
            ProximalOperator::NonNegative => v.mapv_inplace(|x| x.max(S::zero())),
            ProximalOperator::Box { lower, upper } => {
                for ((x, &l), &u) in v.iter_mut().zip(lower.iter()).zip(upper.iter()) {
                    *x = x.max(l).min(u);
                }
            }
            ProximalOperator::Hyperplane { normal, offset } => {
                let scale = (normal.dot(&v.view()) - *offset) / normal.dot(normal);
                v.scaled_add(-scale, normal);
            }
            ProximalOperator::L1 { lambda } => {
                let t = *lambda / rho;
                v.mapv_inplace(|x| x.signum() * (x.abs() - t).max(S::zero()));
            }
        }
    }

    /// Evaluate $`g(z)`$
    ///
    /// Indicators are $`0`$ on their set and $`+\infty`$ off it, with
    /// membership tested to within $`\sqrt{\epsilon}`$.
    pub fn penalty<D>(&self, z: &ArrayBase<D, Ix1>) -> S
    where
        D: Data<Elem = S>,
    {
        let tol = S::epsilon().sqrt();
        let feasible = match self {
            ProximalOperator::NoOp => true,
            ProximalOperator::NonNegative => z.iter().all(|&x| x >= -tol),
            ProximalOperator::Box { lower, upper } => z
                .iter()
                .zip(lower.iter().zip(upper.iter()))
                .all(|(&x, (&l, &u))| x >= l - tol && x <= u + tol),
            ProximalOperator::Hyperplane { normal, offset } => {
                let scale = S::one() + normal.dot(normal).sqrt() * z.dot(z).sqrt();
                (normal.dot(z) - *offset).abs() <= tol * scale
            }
            ProximalOperator::L1 { lambda } => {
                return *lambda * z.fold(S::zero(), |acc, x| acc + x.abs());
            }
        };
        if feasible {
            S::zero()
        } else {
            S::infinity()
        }
    }
}

fn dimension(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ConfigError::DimensionMismatch { expected, found })
    }
}
