//! Golub-Reinsch singular value decomposition (Press et al. variant).
//!
//! Householder bidiagonalization followed by implicit-shift QR iteration on
//! the bidiagonal form, capped at [`MAX_SVD_ITER`] iterations per singular
//! value. The input is overwritten with U.

use alloc::vec;
use alloc::vec::Vec;

use super::{pythag, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Iteration cap per singular value in the implicit-shift QR phase.
pub const MAX_SVD_ITER: usize = 30;

/// Singular value triple `A = U·diag(S)·Vᵀ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Svd<T> {
    /// Singular values, sorted descending. All non-negative.
    pub w: Vec<T>,
    /// Right singular vectors, `n x n`, one per column.
    pub v: Matrix<T>,
}

/// Householder bidiagonalization. Returns the norm used by the
/// convergence tests; `w` receives the diagonal, `rv1` the superdiagonal
/// (with `rv1[0] == 0`).
fn bi_diag<T: FloatScalar>(a: &mut impl MatrixMut<T>, w: &mut [T], rv1: &mut [T]) -> T {
    let m = a.nrows();
    let n = a.ncols();
    let mut g = T::zero();
    let mut scale = T::zero();
    let mut anorm = T::zero();

    for i in 0..n {
        let l = i + 1;
        rv1[i] = scale * g;
        g = T::zero();
        scale = T::zero();
        if i < m {
            for k in i..m {
                scale = scale + a.get(k, i).abs();
            }
            if scale != T::zero() {
                let mut s = T::zero();
                for k in i..m {
                    *a.get_mut(k, i) = *a.get(k, i) / scale;
                    s = s + *a.get(k, i) * *a.get(k, i);
                }
                let f = *a.get(i, i);
                g = s.sqrt();
                if f >= T::zero() {
                    g = -g;
                }
                let h = f * g - s;
                *a.get_mut(i, i) = f - g;
                if i != n - 1 {
                    for j in l..n {
                        let mut s = T::zero();
                        for k in i..m {
                            s = s + *a.get(k, i) * *a.get(k, j);
                        }
                        let f = s / h;
                        for k in i..m {
                            *a.get_mut(k, j) = *a.get(k, j) + f * *a.get(k, i);
                        }
                    }
                }
                for k in i..m {
                    *a.get_mut(k, i) = *a.get(k, i) * scale;
                }
            }
        }
        w[i] = scale * g;
        g = T::zero();
        scale = T::zero();
        if i < m && i != n - 1 {
            for k in l..n {
                scale = scale + a.get(i, k).abs();
            }
            if scale != T::zero() {
                let mut s = T::zero();
                for k in l..n {
                    *a.get_mut(i, k) = *a.get(i, k) / scale;
                    s = s + *a.get(i, k) * *a.get(i, k);
                }
                let f = *a.get(i, l);
                g = s.sqrt();
                if f >= T::zero() {
                    g = -g;
                }
                let h = f * g - s;
                *a.get_mut(i, l) = f - g;
                for k in l..n {
                    rv1[k] = *a.get(i, k) / h;
                }
                if i != m - 1 {
                    for j in l..m {
                        let mut s = T::zero();
                        for k in l..n {
                            s = s + *a.get(j, k) * *a.get(i, k);
                        }
                        for k in l..n {
                            *a.get_mut(j, k) = *a.get(j, k) + s * rv1[k];
                        }
                    }
                }
                for k in l..n {
                    *a.get_mut(i, k) = *a.get(i, k) * scale;
                }
            }
        }
        let r = w[i].abs() + rv1[i].abs();
        if r > anorm {
            anorm = r;
        }
    }
    anorm
}

/// Accumulate the right transformations into `v` and the left
/// transformations into `a` (which becomes U).
fn initial_wv<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    w: &[T],
    v: &mut Matrix<T>,
    rv1: &[T],
) {
    let m = a.nrows();
    let n = a.ncols();

    let mut g = T::zero();
    for i in (0..n).rev() {
        let l = i + 1;
        if i < n - 1 {
            if g != T::zero() {
                // Double division to reduce underflow.
                for j in l..n {
                    v[(j, i)] = (*a.get(i, j) / *a.get(i, l)) / g;
                }
                for j in l..n {
                    let mut s = T::zero();
                    for k in l..n {
                        s = s + *a.get(i, k) * v[(k, j)];
                    }
                    for k in l..n {
                        v[(k, j)] = v[(k, j)] + s * v[(k, i)];
                    }
                }
            }
            for j in l..n {
                v[(i, j)] = T::zero();
                v[(j, i)] = T::zero();
            }
        }
        v[(i, i)] = T::one();
        g = rv1[i];
    }

    for i in (0..n).rev() {
        let l = i + 1;
        let mut g = w[i];
        if i < n - 1 {
            for j in l..n {
                *a.get_mut(i, j) = T::zero();
            }
        }
        if g != T::zero() {
            g = T::one() / g;
            if i != n - 1 {
                for j in l..n {
                    let mut s = T::zero();
                    for k in l..m {
                        s = s + *a.get(k, i) * *a.get(k, j);
                    }
                    let f = (s / *a.get(i, i)) * g;
                    for k in i..m {
                        *a.get_mut(k, j) = *a.get(k, j) + f * *a.get(k, i);
                    }
                }
            }
            for j in i..m {
                *a.get_mut(j, i) = *a.get(j, i) * g;
            }
        } else {
            for j in i..m {
                *a.get_mut(j, i) = T::zero();
            }
        }
        *a.get_mut(i, i) = *a.get(i, i) + T::one();
    }
}

/// Singular value decomposition `A = U·diag(S)·Vᵀ`.
///
/// `a` is overwritten with U (`m x n`, orthonormal columns). Singular
/// values are returned sorted descending, with the columns of U and V
/// permuted to match.
///
/// Returns [`LinalgError::ConvergenceFailure`] if any singular value fails
/// to converge within [`MAX_SVD_ITER`] implicit-shift QR iterations.
///
/// Panics if `a` has fewer rows than columns; decompose the transpose
/// instead.
pub fn svdcmp<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<Svd<T>, LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    assert!(
        m >= n,
        "SVD requires nrows >= ncols, got {}x{}; decompose the transpose",
        m,
        n,
    );

    let mut w = vec![T::zero(); n];
    let mut rv1 = vec![T::zero(); n];
    let mut v = Matrix::zeros(n, n, T::zero());

    let anorm = bi_diag(a, &mut w, &mut rv1);
    initial_wv(a, &w, &mut v, &rv1);

    for k in (0..n).rev() {
        let mut its = 0;
        loop {
            its += 1;
            // Search for a split point: rv1[0] is always zero, so the
            // scan cannot fall off the front.
            let mut l = k;
            let mut flag = true;
            loop {
                if rv1[l].abs() + anorm == anorm {
                    flag = false;
                    break;
                }
                if w[l - 1].abs() + anorm == anorm {
                    break;
                }
                l -= 1;
            }
            if flag {
                // Cancellation of rv1[l..=k] against the column l-1.
                let nm = l - 1;
                let mut c = T::zero();
                let mut s = T::one();
                for i in l..=k {
                    let f = s * rv1[i];
                    if f.abs() + anorm != anorm {
                        let g = w[i];
                        let mut h = pythag(f, g);
                        w[i] = h;
                        h = T::one() / h;
                        c = g * h;
                        s = -f * h;
                        for j in 0..m {
                            let y = *a.get(j, nm);
                            let z = *a.get(j, i);
                            *a.get_mut(j, nm) = y * c + z * s;
                            *a.get_mut(j, i) = z * c - y * s;
                        }
                    }
                }
            }
            let z = w[k];
            if l == k {
                // Converged; enforce a non-negative singular value.
                if z < T::zero() {
                    w[k] = -z;
                    for j in 0..n {
                        v[(j, k)] = -v[(j, k)];
                    }
                }
                break;
            }
            if its == MAX_SVD_ITER {
                return Err(LinalgError::ConvergenceFailure);
            }

            // Shift from the bottom 2x2 minor.
            let x = w[l];
            let nm = k - 1;
            let y = w[nm];
            let mut g = rv1[nm];
            let mut h = rv1[k];
            let two = T::one() + T::one();
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (two * h * y);
            g = pythag(f, T::one());
            let r = if f >= T::zero() { g } else { -g };
            f = ((x - z) * (x + z) + h * ((y / (f + r)) - h)) / x;

            // Next QR sweep.
            let mut c = T::one();
            let mut s = T::one();
            let mut x = x;
            for j in l..=nm {
                let i = j + 1;
                g = rv1[i];
                let mut y = w[i];
                h = s * g;
                g = c * g;
                let mut z = pythag(f, h);
                rv1[j] = z;
                c = f / z;
                s = h / z;
                f = x * c + g * s;
                g = g * c - x * s;
                h = y * s;
                y = y * c;
                for jj in 0..n {
                    let xv = v[(jj, j)];
                    let zv = v[(jj, i)];
                    v[(jj, j)] = xv * c + zv * s;
                    v[(jj, i)] = zv * c - xv * s;
                }
                z = pythag(f, h);
                w[j] = z;
                if z != T::zero() {
                    let zi = T::one() / z;
                    c = f * zi;
                    s = h * zi;
                }
                f = c * g + s * y;
                x = c * y - s * g;
                for jj in 0..m {
                    let ya = *a.get(jj, j);
                    let za = *a.get(jj, i);
                    *a.get_mut(jj, j) = ya * c + za * s;
                    *a.get_mut(jj, i) = za * c - ya * s;
                }
            }
            rv1[l] = T::zero();
            rv1[k] = f;
            w[k] = x;
        }
    }

    // Order singular values descending, carrying the U and V columns along
    // so rank, condition, and determinant logic can rely on the ordering.
    for i in 0..n {
        let mut p = i;
        for j in (i + 1)..n {
            if w[j] > w[p] {
                p = j;
            }
        }
        if p != i {
            w.swap(i, p);
            for jj in 0..m {
                let t = *a.get(jj, i);
                *a.get_mut(jj, i) = *a.get(jj, p);
                *a.get_mut(jj, p) = t;
            }
            for jj in 0..n {
                let t = v[(jj, i)];
                v[(jj, i)] = v[(jj, p)];
                v[(jj, p)] = t;
            }
        }
    }

    Ok(Svd { w, v })
}

/// Least-squares solve `A·x = b` from the decomposition of `A`, skipping
/// components whose singular value is zero.
///
/// `u` is the overwritten input from [`svdcmp`]. Panics if `b.len()` does
/// not match the row count.
pub fn svd_back_sub<T: FloatScalar>(
    u: &impl MatrixRef<T>,
    w: &[T],
    v: &Matrix<T>,
    b: &[T],
) -> Vec<T> {
    let nr = u.nrows();
    let nc = u.ncols();
    assert_eq!(
        b.len(),
        nr,
        "right-hand side length {} does not match {}x{} factor",
        b.len(),
        nr,
        nc,
    );
    // tmp = diag(1/w) Uᵀ b, passing over zeros in w.
    let mut tmp = vec![T::zero(); nc];
    for i in 0..nc {
        if w[i] != T::zero() {
            let mut r = T::zero();
            for k in 0..nr {
                r = r + *u.get(k, i) * b[k];
            }
            tmp[i] = r / w[i];
        }
    }
    let mut x = vec![T::zero(); nc];
    for i in 0..nc {
        let mut s = T::zero();
        for k in 0..nc {
            s = s + v[(i, k)] * tmp[k];
        }
        x[i] = s;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(u: &Matrix<f64>, w: &[f64], v: &Matrix<f64>) -> Matrix<f64> {
        let n = w.len();
        let m = u.nrows();
        Matrix::from_fn(m, n, |i, j| {
            (0..n).map(|k| u[(i, k)] * w[k] * v[(j, k)]).sum()
        })
    }

    #[test]
    fn reconstructs_rectangular_matrix() {
        let a0 = Matrix::from_rows(4, 3, &[
            1.0, 2.0, 3.0, //
            4.0, 5.0, 6.0, //
            7.0, 8.0, 10.0, //
            2.0, -1.0, 0.5,
        ]);
        let mut u = a0.clone();
        let svd = svdcmp(&mut u).unwrap();
        let back = reconstruct(&u, &svd.w, &svd.v);
        for i in 0..4 {
            for j in 0..3 {
                assert!(
                    (back[(i, j)] - a0[(i, j)]).abs() < 1e-10,
                    "A[{}][{}]: {} vs {}",
                    i,
                    j,
                    back[(i, j)],
                    a0[(i, j)]
                );
            }
        }
    }

    #[test]
    fn singular_values_sorted_and_nonnegative() {
        let mut a = Matrix::from_rows(3, 3, &[3.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 3.0]);
        let svd = svdcmp(&mut a).unwrap();
        for i in 1..svd.w.len() {
            assert!(svd.w[i - 1] >= svd.w[i]);
        }
        for &s in &svd.w {
            assert!(s >= 0.0);
        }
    }

    #[test]
    fn diagonal_matrix_singular_values() {
        let mut a: Matrix<f64> = Matrix::from_rows(3, 3, &[2.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 3.0]);
        let svd = svdcmp(&mut a).unwrap();
        assert!((svd.w[0] - 5.0).abs() < 1e-12);
        assert!((svd.w[1] - 3.0).abs() < 1e-12);
        assert!((svd.w[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rank_deficient_matrix_has_zero_singular_value() {
        // Second column is twice the first.
        let mut a: Matrix<f64> = Matrix::from_rows(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let svd = svdcmp(&mut a).unwrap();
        assert!(svd.w[1].abs() < 1e-10);
    }

    #[test]
    fn back_sub_solves_least_squares() {
        // Tall full-rank system with exact solution x = [1, 2].
        let a0: Matrix<f64> = Matrix::from_rows(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let x = [1.0, 2.0];
        let b = [1.0, 2.0, 3.0];
        let mut u = a0.clone();
        let svd = svdcmp(&mut u).unwrap();
        let got = svd_back_sub(&u, &svd.w, &svd.v, &b);
        for i in 0..2 {
            assert!((got[i] - x[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn u_columns_are_orthonormal() {
        let mut a: Matrix<f64> = Matrix::from_rows(4, 2, &[1.0, 2.0, 0.0, 1.0, 1.0, 0.0, 2.0, 1.0]);
        let svd = svdcmp(&mut a).unwrap();
        assert_eq!(svd.w.len(), 2);
        for c1 in 0..2 {
            for c2 in 0..2 {
                let mut dot = 0.0;
                for r in 0..4 {
                    dot += a[(r, c1)] * a[(r, c2)];
                }
                let expected = if c1 == c2 { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-10);
            }
        }
    }
}
