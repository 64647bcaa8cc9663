//! Configuration errors
//!
//! Everything that can be wrong with a problem setup is rejected when the
//! operator or driver is built. Running out of iterations is not an error;
//! see [`OptimizationState::converged`](crate::prox::OptimizationState).

use ndarray::NdFloat;
use thiserror::Error;

/// Invalid operator or driver configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("lower bound {lower} exceeds upper bound {upper} at index {index}")]
    InvertedBounds {
        index: usize,
        lower: f64,
        upper: f64,
    },

    #[error("hyperplane normal vector must not be zero")]
    ZeroNormal,

    #[error("regularization weight must be non-negative, got {0}")]
    NegativeWeight(f64),

    #[error("penalty parameter rho must be positive, got {0}")]
    NonPositivePenalty(f64),

    #[error("absolute tolerance must be positive, got {0}")]
    NonPositiveTolerance(f64),

    #[error("relative tolerance must be non-negative, got {0}")]
    NegativeRelativeTolerance(f64),

    #[error("over-relaxation factor must lie in (0, 2), got {0}")]
    RelaxationOutOfRange(f64),

    #[error("{what} must be at least 1")]
    EmptyBudget { what: &'static str },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Widen a scalar for error reporting
pub(crate) fn real<S: NdFloat>(v: S) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}
