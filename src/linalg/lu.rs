//! Crout LU factorization with implicit row scaling and partial pivoting.
//!
//! The factored matrix holds U explicitly in the upper triangle and L in
//! multiplier form in the subdiagonals. Row permutations are recorded as a
//! pivot map: `perm[j]` is the row swapped into position `j` at step `j`.

use alloc::vec::Vec;

use super::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Pivot record produced by [`crout_in_place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuPivots {
    /// `perm[j]` = row exchanged with row `j` at elimination step `j`.
    pub perm: Vec<usize>,
    /// True if the number of row swaps was even (determinant sign `+1`).
    pub even: bool,
}

impl LuPivots {
    /// Determinant sign contributed by the row swaps: `+1` or `-1`.
    pub fn sign<T: FloatScalar>(&self) -> T {
        if self.even {
            T::one()
        } else {
            -T::one()
        }
    }
}

/// Factor a square matrix in place by Crout's method with implicit scaling.
///
/// Each row's pivot candidates are scaled by the reciprocal of the row's
/// largest absolute element before comparison, then the column is eliminated
/// with partial pivoting on the scaled residual.
///
/// Returns [`LinalgError::Singular`] if any pivot magnitude falls below
/// `tol` (the factorization still completes, but is not usable for solves).
///
/// Panics if `a` is not square.
pub fn crout_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    tol: T,
) -> Result<LuPivots, LinalgError> {
    let n = a.nrows();
    assert_eq!(
        n,
        a.ncols(),
        "LU requires a square matrix, got {}x{}",
        a.nrows(),
        a.ncols(),
    );

    // Implicit scaling: 1 / max|row|, zero for an all-zero row.
    let mut scale: Vec<T> = Vec::with_capacity(n);
    for i in 0..n {
        let mut big = T::zero();
        for j in 0..n {
            let t = a.get(i, j).abs();
            if t > big {
                big = t;
            }
        }
        scale.push(if big == T::zero() {
            T::zero()
        } else {
            T::one() / big
        });
    }

    let mut perm = Vec::with_capacity(n);
    let mut even = true;
    let mut zeros = 0usize;

    for j in 0..n {
        // Elements of U above the diagonal.
        for i in 0..j {
            let mut sum = *a.get(i, j);
            for k in 0..i {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
        }
        // Residuals on and below the diagonal, tracking the largest
        // scaled candidate for the pivot.
        let mut big = T::zero();
        let mut imax = j;
        for i in j..n {
            let mut sum = *a.get(i, j);
            for k in 0..j {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
            let t = scale[i] * sum.abs();
            if t >= big {
                big = t;
                imax = i;
            }
        }
        if imax != j {
            for k in 0..n {
                let t = *a.get(imax, k);
                *a.get_mut(imax, k) = *a.get(j, k);
                *a.get_mut(j, k) = t;
            }
            even = !even;
            scale[imax] = scale[j];
        }
        perm.push(imax);
        // Divide the subdiagonal by the pivot to form the multipliers.
        if a.get(j, j).abs() < tol {
            zeros += 1;
        } else if j != n - 1 {
            let d = T::one() / *a.get(j, j);
            for i in (j + 1)..n {
                *a.get_mut(i, j) = *a.get(i, j) * d;
            }
        }
    }

    if zeros > 0 {
        Err(LinalgError::Singular)
    } else {
        Ok(LuPivots { perm, even })
    }
}

/// Solve `A·x = b` in place given the LU form of `A` from [`crout_in_place`].
///
/// `b` has not been permuted by the caller; the pivot map is applied while
/// transforming it, skipping leading zeros so that solving for a column of
/// the identity costs less.
pub fn lu_solve<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    pivots: &LuPivots,
    b: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    let n = a.nrows();
    assert_eq!(
        b.len(),
        n,
        "right-hand side length {} does not match {}x{} factor",
        b.len(),
        a.nrows(),
        a.ncols(),
    );
    for i in 0..n {
        if a.get(i, i).abs() < tol {
            return Err(LinalgError::Singular);
        }
    }

    // Forward pass, applying the permutation and skipping leading zeros.
    let mut first: Option<usize> = None;
    for i in 0..n {
        let iperm = pivots.perm[i];
        let mut sum = b[iperm];
        b[iperm] = b[i];
        match first {
            Some(f) => {
                for j in f..i {
                    sum = sum - *a.get(i, j) * b[j];
                }
            }
            None => {
                if sum != T::zero() {
                    first = Some(i);
                }
            }
        }
        b[i] = sum;
    }

    // Back substitution on U.
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - *a.get(i, j) * b[j];
        }
        b[i] = sum / *a.get(i, i);
    }
    Ok(())
}

/// Solve `Aᵀ·x = b` in place given the LU form of `A` from [`crout_in_place`].
///
/// Follows the LINPACK ordering: forward substitution down the columns of U,
/// then the transposed multiplier pass interleaved with the inverse
/// permutation, skipping trailing zeros.
pub fn lu_trans_solve<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    pivots: &LuPivots,
    b: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    let n = a.ncols();
    assert_eq!(
        b.len(),
        n,
        "right-hand side length {} does not match {}x{} factor",
        b.len(),
        a.nrows(),
        a.ncols(),
    );
    for i in 0..n {
        if a.get(i, i).abs() < tol {
            return Err(LinalgError::Singular);
        }
    }

    // Uᵀ is lower triangular: plain forward substitution.
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum = sum - *a.get(j, i) * b[j];
        }
        b[i] = sum / *a.get(i, i);
    }

    // Transposed multiplier pass with trailing-zero skip, undoing the
    // permutation as it goes.
    let mut last: Option<usize> = None;
    for i in (0..n).rev() {
        let mut sum = b[i];
        match last {
            Some(l) => {
                for j in (i + 1)..=l {
                    sum = sum - *a.get(j, i) * b[j];
                }
            }
            None => {
                if sum != T::zero() {
                    last = Some(i);
                }
            }
        }
        let iperm = pivots.perm[i];
        b[i] = b[iperm];
        b[iperm] = sum;
    }
    Ok(())
}
