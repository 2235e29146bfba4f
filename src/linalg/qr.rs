//! Householder QR factorization kernels.
//!
//! The factored matrix holds R in its upper triangle (diagonal stored
//! separately, see [`Householder`]) and the reflector vectors in `u`-form in
//! the lower triangle. Reflectors are built from a column scaled by its
//! largest absolute element, which keeps the norm computation clear of
//! overflow and underflow. See Golub & Van Loan, 1st edition, pp. 38-41.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::min;

use super::{split_two_col_slices, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Reflector metadata produced by [`householder_in_place`]:
/// the diagonal of R and the Householder betas (`2 / uᵀu` for each step).
#[derive(Debug, Clone, PartialEq)]
pub struct Householder<T> {
    /// Diagonal of R, `min(nrows, ncols)` entries.
    pub diag_r: Vec<T>,
    /// Scale of each reflector; `beta[k] = 1 / (alpha · u₀)`.
    pub betas: Vec<T>,
}

/// Build a Householder reflector from `v`, in place.
///
/// The reflector is `I - beta·u·uᵀ` with `u = w + alpha·e₀`, `w = v / max|v|`,
/// `alpha = sign(v₀)·‖w‖`, `beta = 1 / (alpha·u₀)`. `v` is overwritten with
/// `u`. Returns `(alpha, beta, vmax)`; the R diagonal entry for this step is
/// `-alpha·vmax`.
///
/// Returns [`LinalgError::Singular`] if `max|v| < tol`.
pub fn h_reflector<T: FloatScalar>(v: &mut [T], tol: T) -> Result<(T, T, T), LinalgError> {
    let mut vmax = T::zero();
    for &x in v.iter() {
        let a = x.abs();
        if a > vmax {
            vmax = a;
        }
    }
    if vmax < tol {
        return Err(LinalgError::Singular);
    }
    let mut sum = T::zero();
    for x in v.iter_mut() {
        *x = *x / vmax;
        sum = sum + *x * *x;
    }
    let mut alpha = sum.sqrt();
    if v[0] < T::zero() {
        alpha = -alpha;
    }
    v[0] = v[0] + alpha;
    let beta = T::one() / (alpha * v[0]);
    Ok((alpha, beta, vmax))
}

/// Reflect every column of `y` (rows `row0..`) in the plane with normal `u`:
/// `col -= beta · (uᵀcol) · u`.
fn reflect_columns<T: FloatScalar>(y: &mut impl MatrixMut<T>, row0: usize, u: &[T], beta: T) {
    for j in 0..y.ncols() {
        let col = y.col_as_mut_slice(j, row0);
        let mut dot = T::zero();
        for (&ui, &ci) in u.iter().zip(col.iter()) {
            dot = dot + ui * ci;
        }
        let f = beta * dot;
        for (ci, &ui) in col.iter_mut().zip(u.iter()) {
            *ci = *ci - f * ui;
        }
    }
}

/// QR-factor `x` in place by Householder reflections.
///
/// On return the strict upper triangle of `x` holds R (diagonal in the
/// returned [`Householder`]) and the lower triangle holds the reflectors in
/// `u`-form. Handles `nrows <= ncols` by decomposing only `nrows - 1`
/// columns, the last diagonal entry coming straight from the matrix.
///
/// Returns [`LinalgError::Singular`] if a reflector column's largest
/// absolute element falls below `tol`.
pub fn householder_in_place<T: FloatScalar>(
    x: &mut impl MatrixMut<T>,
    tol: T,
) -> Result<Householder<T>, LinalgError> {
    let nr = x.nrows();
    let nc = x.ncols();
    let n_steps = if nr <= nc { nr.saturating_sub(1) } else { nc };
    let len = min(nr, nc);
    let mut diag_r = vec![T::zero(); len];
    let mut betas = vec![T::zero(); len];

    for k in 0..n_steps {
        let (alpha, beta, vmax) = h_reflector(x.col_as_mut_slice(k, k), tol)?;
        diag_r[k] = -alpha * vmax;
        betas[k] = beta;
        // Apply the reflector to the trailing columns.
        for j in (k + 1)..nc {
            let (u, col) = split_two_col_slices(x, k, j, k);
            let mut dot = T::zero();
            for (&ui, &ci) in u.iter().zip(col.iter()) {
                dot = dot + ui * ci;
            }
            let f = beta * dot;
            for (ci, &ui) in col.iter_mut().zip(u.iter()) {
                *ci = *ci - f * ui;
            }
        }
    }
    if nr <= nc && nr > 0 {
        diag_r[nr - 1] = *x.get(nr - 1, nr - 1);
        betas[nr - 1] = T::zero();
    }
    Ok(Householder { diag_r, betas })
}

/// Apply the stored reflectors to `y` in order, computing `Qᵀ·y` in place.
///
/// `q` is the output of [`householder_in_place`] (reflectors in the lower
/// triangle); `h` carries the betas. Panics if the row counts differ.
pub fn q_reflect<T: FloatScalar>(
    y: &mut impl MatrixMut<T>,
    q: &impl MatrixRef<T>,
    h: &Householder<T>,
) {
    let nr = q.nrows();
    let qnc = q.ncols();
    assert_eq!(
        nr,
        y.nrows(),
        "dimension mismatch: {}x{} reflectors applied to {}x{}",
        nr,
        qnc,
        y.nrows(),
        y.ncols(),
    );
    let n = if nr <= qnc { nr.saturating_sub(1) } else { qnc };
    for k in 0..n {
        reflect_columns(y, k, q.col_as_slice(k, k), h.betas[k]);
    }
}

/// Apply the stored reflectors to `y` in reverse order, computing `Q·y`
/// in place. The inverse of [`q_reflect`]; requires a square factor.
pub fn q_trans_reflect<T: FloatScalar>(
    y: &mut impl MatrixMut<T>,
    q: &impl MatrixRef<T>,
    h: &Householder<T>,
) {
    let nr = q.nrows();
    assert_eq!(
        nr,
        q.ncols(),
        "reverse reflection requires a square factor, got {}x{}",
        nr,
        q.ncols(),
    );
    assert_eq!(
        nr,
        y.nrows(),
        "dimension mismatch: {}x{} reflectors applied to {}x{}",
        nr,
        q.ncols(),
        y.nrows(),
        y.ncols(),
    );
    for k in (0..nr.saturating_sub(1)).rev() {
        reflect_columns(y, k, q.col_as_slice(k, k), h.betas[k]);
    }
}

/// Solve `R·b = y` in place, assuming `r` is upper triangular.
///
/// The number of equations is `r.ncols()`, which allows `r` (and `y`) to
/// carry extra rows below the system, as after a QR factorization.
///
/// Returns [`LinalgError::ZeroDivide`] if a diagonal magnitude is below `tol`.
pub fn back_substitute<T: FloatScalar>(
    y: &mut impl MatrixMut<T>,
    r: &impl MatrixRef<T>,
    tol: T,
) -> Result<(), LinalgError> {
    let n = r.ncols();
    assert!(
        n <= r.nrows() && n <= y.nrows(),
        "triangular system of {} equations exceeds {}x{} / {}x{}",
        n,
        r.nrows(),
        r.ncols(),
        y.nrows(),
        y.ncols(),
    );
    for k in 0..y.ncols() {
        for i in (0..n).rev() {
            let mut sum = *y.get(i, k);
            for j in (i + 1)..n {
                sum = sum - *r.get(i, j) * *y.get(j, k);
            }
            if r.get(i, i).abs() < tol {
                return Err(LinalgError::ZeroDivide);
            }
            *y.get_mut(i, k) = sum / *r.get(i, i);
        }
    }
    Ok(())
}

/// Solve `Rᵀ·b = y` in place, assuming `r` is upper triangular (forward
/// substitution reading `r` untransposed).
///
/// Returns [`LinalgError::ZeroDivide`] if a diagonal magnitude is below `tol`.
pub fn back_substitute_t<T: FloatScalar>(
    y: &mut impl MatrixMut<T>,
    r: &impl MatrixRef<T>,
    tol: T,
) -> Result<(), LinalgError> {
    let n = r.ncols();
    assert!(
        n <= r.nrows() && n <= y.nrows(),
        "triangular system of {} equations exceeds {}x{} / {}x{}",
        n,
        r.nrows(),
        r.ncols(),
        y.nrows(),
        y.ncols(),
    );
    for k in 0..y.ncols() {
        for i in 0..n {
            let mut sum = *y.get(i, k);
            for j in 0..i {
                sum = sum - *r.get(j, i) * *y.get(j, k);
            }
            if r.get(i, i).abs() < tol {
                return Err(LinalgError::ZeroDivide);
            }
            *y.get_mut(i, k) = sum / *r.get(i, i);
        }
    }
    Ok(())
}

/// Invert an upper-triangular matrix.
///
/// Only the first `r.ncols()` rows of `r` are read, so a tall post-QR
/// factor can be passed directly.
///
/// Returns [`LinalgError::Singular`] if a diagonal magnitude is below `tol`.
pub fn triu_invert<T: FloatScalar>(
    r: &impl MatrixRef<T>,
    tol: T,
) -> Result<Matrix<T>, LinalgError> {
    let n = r.ncols();
    assert!(
        n <= r.nrows(),
        "triangular inverse of {} columns exceeds {} rows",
        n,
        r.nrows(),
    );
    let mut rinv = Matrix::zeros(n, n, T::zero());
    for j in 0..n {
        if r.get(j, j).abs() < tol {
            return Err(LinalgError::Singular);
        }
        rinv[(j, j)] = T::one() / *r.get(j, j);
    }
    for j in (0..n).rev() {
        for i in (0..j).rev() {
            let mut sum = T::zero();
            for k in (i + 1)..=j {
                sum = sum - *r.get(i, k) * rinv[(k, j)];
            }
            rinv[(i, j)] = rinv[(i, i)] * sum;
        }
    }
    Ok(rinv)
}
