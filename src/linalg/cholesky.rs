//! Cholesky factorization kernel for symmetric positive-definite matrices.

use super::{split_two_col_slices, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Factor a symmetric positive-definite matrix in place: `A = G·Gᵀ`.
///
/// On success the lower triangle of `a` (diagonal included) holds `G`; the
/// strict upper triangle is left untouched. Only the lower triangle of the
/// input is read, so a symmetric matrix need only be filled on and below the
/// diagonal.
///
/// Returns [`LinalgError::NotPositiveDefinite`] if any pivot is ≤ 0.
///
/// Panics if `a` is not square.
pub fn cholesky_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<(), LinalgError> {
    let n = a.nrows();
    assert_eq!(
        n,
        a.ncols(),
        "cholesky requires a square matrix, got {}x{}",
        a.nrows(),
        a.ncols(),
    );
    for j in 0..n {
        // Left-looking update: col j -= G(j,k) * col k for each prior column.
        for k in 0..j {
            let f = *a.get(j, k);
            let (ck, cj) = split_two_col_slices(a, k, j, j);
            for (x, &y) in cj.iter_mut().zip(ck.iter()) {
                *x = *x - f * y;
            }
        }
        let g = *a.get(j, j);
        if g <= T::zero() {
            return Err(LinalgError::NotPositiveDefinite);
        }
        let g = g.sqrt();
        *a.get_mut(j, j) = g;
        for i in (j + 1)..n {
            *a.get_mut(i, j) = *a.get(i, j) / g;
        }
    }
    Ok(())
}

/// Solve `G·Gᵀ·x = b` in place given the Cholesky factor `G`.
///
/// Forward substitution on `G`, then back substitution on `Gᵀ`.
/// Returns [`LinalgError::NotPositiveDefinite`] if a diagonal element of `G`
/// falls below `tol`.
pub fn cholesky_solve_in_place<T: FloatScalar>(
    g: &impl MatrixRef<T>,
    b: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    let n = g.nrows();
    assert_eq!(
        b.len(),
        n,
        "right-hand side length {} does not match {}x{} factor",
        b.len(),
        g.nrows(),
        g.ncols(),
    );
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum = sum - *g.get(i, j) * b[j];
        }
        let d = *g.get(i, i);
        if d.abs() < tol {
            return Err(LinalgError::NotPositiveDefinite);
        }
        b[i] = sum / d;
    }
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - *g.get(j, i) * b[j];
        }
        let d = *g.get(i, i);
        if d.abs() < tol {
            return Err(LinalgError::NotPositiveDefinite);
        }
        b[i] = sum / d;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;

    #[test]
    fn factors_known_spd_matrix() {
        let mut a: Matrix<f64> = Matrix::from_rows(
            3,
            3,
            &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
        );
        cholesky_in_place(&mut a).unwrap();
        let expected = [
            (0, 0, 2.0),
            (1, 0, 6.0),
            (1, 1, 1.0),
            (2, 0, -8.0),
            (2, 1, 5.0),
            (2, 2, 3.0),
        ];
        for &(i, j, v) in &expected {
            assert!(
                (a[(i, j)] - v).abs() < 1e-12,
                "G[{}][{}] = {}",
                i,
                j,
                a[(i, j)]
            );
        }
    }

    #[test]
    fn rejects_indefinite_matrix() {
        let mut a = Matrix::from_rows(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        assert_eq!(
            cholesky_in_place(&mut a),
            Err(LinalgError::NotPositiveDefinite)
        );
    }

    #[test]
    fn solve_round_trip() {
        let a: Matrix<f64> = Matrix::from_rows(
            3,
            3,
            &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
        );
        let x = [1.0, -2.0, 0.5];
        // b = A x
        let mut b = [0.0; 3];
        for i in 0..3 {
            for j in 0..3 {
                b[i] += a[(i, j)] * x[j];
            }
        }
        let mut g = a.clone();
        cholesky_in_place(&mut g).unwrap();
        cholesky_solve_in_place(&g, &mut b, 1e-12).unwrap();
        for i in 0..3 {
            assert!((b[i] - x[i]).abs() < 1e-10);
        }
    }
}
