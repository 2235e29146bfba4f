pub(crate) mod cholesky;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod svd;

pub use cholesky::{cholesky_in_place, cholesky_solve_in_place};
pub use lu::{crout_in_place, lu_solve, lu_trans_solve, LuPivots};
pub use qr::{
    back_substitute, back_substitute_t, h_reflector, householder_in_place, q_reflect,
    q_trans_reflect, triu_invert, Householder,
};
pub use svd::{svd_back_sub, svdcmp, Svd, MAX_SVD_ITER};

use crate::traits::{FloatScalar, MatrixMut};

/// Get mutable references to sub-column slices of two different columns
/// simultaneously. Requires `col_a != col_b`.
///
/// Returns `(a_slice, b_slice)` where:
/// - `a_slice = &mut m[row_start..nrows, col_a]`
/// - `b_slice = &mut m[row_start..nrows, col_b]`
#[inline]
pub(crate) fn split_two_col_slices<'a, T>(
    m: &'a mut impl MatrixMut<T>,
    col_a: usize,
    col_b: usize,
    row_start: usize,
) -> (&'a mut [T], &'a mut [T]) {
    debug_assert_ne!(col_a, col_b);
    // Safety: col_a and col_b are different columns, so the slices don't overlap.
    // MatrixMut guarantees column slices are contiguous and non-overlapping.
    let ptr = m as *mut dyn MatrixMut<T>;
    let a = unsafe { &mut *ptr }.col_as_mut_slice(col_a, row_start);
    let b = unsafe { &mut *ptr }.col_as_mut_slice(col_b, row_start);
    (a, b)
}

/// Errors from the factorization and solve kernels.
///
/// ```
/// use densemat::{Config, Matrix};
/// use densemat::linalg::LinalgError;
/// use densemat::decomp::LuDec;
///
/// let singular = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// let mut lu = LuDec::new(&singular, Config::default());
/// assert_eq!(lu.det().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular (a pivot fell below tolerance).
    Singular,
    /// Matrix is not positive definite (required for Cholesky).
    NotPositiveDefinite,
    /// A triangular solve hit a diagonal element below tolerance.
    ZeroDivide,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotPositiveDefinite => write!(f, "matrix is not positive definite"),
            LinalgError::ZeroDivide => write!(f, "zero diagonal in triangular solve"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// `sqrt(a^2 + b^2)` without destructive overflow or underflow.
///
/// Scales by the larger magnitude before squaring the ratio.
pub fn pythag<T: FloatScalar>(a: T, b: T) -> T {
    let absa = a.abs();
    let absb = b.abs();
    if absa > absb {
        let r = absb / absa;
        absa * (T::one() + r * r).sqrt()
    } else if absb == T::zero() {
        T::zero()
    } else {
        let r = absa / absb;
        absb * (T::one() + r * r).sqrt()
    }
}
