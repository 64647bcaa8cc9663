//! Drivers pre-wired for the common constraint kinds

use super::{Admm, AdmmConfig, ProximalOperator};
use crate::error::Result;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// The constraint or regularizer $`g`$ to build an [`Admm`] driver for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintKind {
    Unconstrained,
    NonNegative,
    /// $`0 \leq x_i \leq 1`$
    UnitBox,
    /// $`\sum_i x_i = 1`$
    SumToOne,
    /// $`\lambda\|x\|_1`$ with $`\lambda`$ the weight
    L1,
}

impl<S: NdFloat> ProximalOperator<S> {
    /// Operator for `kind` in dimension `n`; `weight` is only read by
    /// [`ConstraintKind::L1`]
    pub fn for_kind(kind: ConstraintKind, n: usize, weight: S) -> Result<Self> {
        match kind {
            ConstraintKind::Unconstrained => Ok(ProximalOperator::NoOp),
            ConstraintKind::NonNegative => Ok(ProximalOperator::NonNegative),
            ConstraintKind::UnitBox => {
                ProximalOperator::box_bounds(Array1::zeros(n), Array1::ones(n))
            }
            ConstraintKind::SumToOne => ProximalOperator::hyperplane(Array1::ones(n), S::one()),
            ConstraintKind::L1 => ProximalOperator::l1(weight),
        }
    }
}

/// Build an [`Admm`] driver for `kind` in dimension `n`
pub fn admm<S: NdFloat>(
    n: usize,
    kind: ConstraintKind,
    weight: S,
    config: AdmmConfig<S>,
) -> Result<Admm<S>> {
    let operator = ProximalOperator::for_kind(kind, n, weight)?;
    Admm::new(n, operator, config)
}
