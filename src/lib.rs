//! The `ndarray-admm` crate minimizes composite objectives
//! $`f(x) + g(x)`$ of an `ndarray`, where $`f`$ is smooth and $`g`$ is a
//! constraint or regularizer known through its proximal operator.
//!
//! It includes:
//! - ADMM with cold-restarted or warm-resumed inner solves
//! - Proximal operators for non-negativity, boxes, hyperplanes and the L1 norm
//! - L-BFGS for the smooth subproblems
//! - Quadratic and least squares costs over abstract linear operators
//!
//! ```
//! # extern crate intel_mkl_src;
//! use ndarray::prelude::*;
//! use ndarray_admm::prox::{admm, AdmmConfig, ConstraintKind};
//! use ndarray_admm::smooth::Quadratic;
//!
//! // minimize |x - b|^2 / 2 over the non-negative orthant
//! let f = Quadratic::new(Array2::<f64>::eye(3), array![1., -2., 0.5]);
//! let driver = admm(3, ConstraintKind::NonNegative, 0., AdmmConfig::new()).unwrap();
//! let state = driver.minimize(&f);
//! assert!(state.converged);
//! assert!((state.z[0] - 1.).abs() < 1e-3);
//! assert_eq!(state.z[1], 0.);
//! ```
//!
//! Solvers log through the `log` facade: per-iteration residuals at
//! `trace`, termination at `debug`, and an exhausted iteration cap at `warn`.

#![cfg_attr(all(rustc_nightly, test), feature(test))]
#[cfg(all(rustc_nightly, test))]
extern crate test;

#[cfg(test)]
extern crate intel_mkl_src;

pub mod error;
pub mod linop;
pub mod prox;
pub mod smooth;

pub use error::ConfigError;
