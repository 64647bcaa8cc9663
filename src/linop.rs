//! Abstract Linear Operators and Adjoints
//! building upon ndarray_linalg::operator
//!
//! Smooth test objectives such as [`Quadratic`](crate::smooth::Quadratic)
//! take any [`LinearOperator`] as their curvature, so a dense matrix, a
//! [`Diagonal`] or a [`Gram`] product can be used interchangeably.

use ndarray::prelude::*;
use ndarray::{Data, DataMut, DataOwned, NdFloat};
pub use ndarray_linalg::diagonal::Diagonal;
pub use ndarray_linalg::operator::LinearOperator;
use ndarray_linalg::Scalar;
use num_traits::Float;

pub trait Adjoint<'a> {
    type Output;
    fn adj(&'a self) -> Self::Output;
}

impl<'a, A, S> Adjoint<'a> for ArrayBase<S, Ix2>
where
    A: 'a + Float,
    S: Data<Elem = A>,
{
    type Output = ArrayView<'a, A, Ix2>;

    fn adj(&'a self) -> Self::Output {
        self.t()
    }
}

impl<'a, A, Sa> Adjoint<'a> for Diagonal<Sa>
where
    A: 'a + Float,
    Sa: 'a + Data<Elem = A>,
{
    type Output = &'a Diagonal<Sa>;

    fn adj(&'a self) -> Self::Output {
        self
    }
}

/// The normal operator $`A^HA`$ of a dense matrix $`A`$
///
/// Applied as $`A^H(Ax)`$, so the (possibly much larger) product is never
/// formed. This is the Hessian of the least squares cost
/// $`\frac12 \|Ax-y\|_2^2`$.
pub struct Gram<A> {
    a: Array2<A>,
}

impl<A> Gram<A> {
    #[must_use]
    pub fn new(a: Array2<A>) -> Gram<A> {
        Gram { a }
    }

    /// Dimension of the space the operator acts on (columns of $`A`$)
    pub fn dim(&self) -> usize {
        self.a.ncols()
    }
}

impl<'a, A: 'a> Adjoint<'a> for Gram<A> {
    type Output = &'a Gram<A>;

    /// Self-adjoint
    fn adj(&'a self) -> Self::Output {
        self
    }
}

impl<A> LinearOperator for Gram<A>
where
    A: NdFloat + Scalar,
{
    type Elem = A;

    /// Apply operator out-place
    #[inline]
    fn apply<S>(&self, a: &ArrayBase<S, Ix1>) -> Array1<S::Elem>
    where
        S: Data<Elem = Self::Elem>,
    {
        self.a.adj().dot(&self.a.dot(a))
    }

    /// Apply operator in-place
    #[inline]
    fn apply_mut<S>(&self, a: &mut ArrayBase<S, Ix1>)
    where
        S: DataMut<Elem = Self::Elem>,
    {
        let b = self.apply(a);
        a.assign(&b);
    }

    /// Apply operator with move
    #[inline]
    fn apply_into<S>(&self, mut a: ArrayBase<S, Ix1>) -> ArrayBase<S, Ix1>
    where
        S: DataOwned<Elem = Self::Elem> + DataMut,
    {
        self.apply_mut(&mut a);
        a
    }

    /// Apply operator to matrix out-place
    #[inline]
    fn apply2<S>(&self, a: &ArrayBase<S, Ix2>) -> Array2<S::Elem>
    where
        S: Data<Elem = Self::Elem>,
    {
        self.a.adj().dot(&self.a.dot(a))
    }

    /// Apply operator to matrix in-place
    #[inline]
    fn apply2_mut<S>(&self, a: &mut ArrayBase<S, Ix2>)
    where
        S: DataMut<Elem = Self::Elem>,
    {
        let b = self.apply2(a);
        a.assign(&b);
    }

    /// Apply operator to matrix with move
    #[inline]
    fn apply2_into<S>(&self, mut a: ArrayBase<S, Ix2>) -> ArrayBase<S, Ix2>
    where
        S: DataOwned<Elem = Self::Elem> + DataMut,
    {
        self.apply2_mut(&mut a);
        a
    }
}
