//! Minimization for Composite Functions consisting of
//! L-smooth _f_ and non-smooth prox-friendly _g_
//!
//! This includes common objective functions such as the LASSO
//! as well as smooth constrained methods, as a projection is
//! the proximal operator of a constraint set.
//!
//! [`Admm`] splits $`f(x) + g(x)`$ into a smooth subproblem, handed to
//! [`Lbfgs`](crate::smooth::Lbfgs) through an [`AugmentedObjective`], and a
//! [`ProximalOperator`] step. [`admm`] builds a driver for one of the
//! usual [`ConstraintKind`]s.

mod operator;
pub use operator::*;

mod augmented;
pub use augmented::AugmentedObjective;

mod admm;
pub use self::admm::*;

mod factory;
pub use factory::*;
