//! Cholesky decomposition wrapper.

use alloc::vec::Vec;

use super::{hager_estimate, scaled_product, Det};
use crate::linalg::{cholesky_in_place, cholesky_solve_in_place, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};
use crate::{Config, Matrix};

/// Lazily factored Cholesky decomposition `A = G·Gᵀ` of a symmetric
/// positive-definite matrix.
///
/// Only the lower triangle of the input is read. The determinant is the
/// square of the factor's diagonal product; `trans_solve` is `solve`
/// because the matrix is symmetric. Faults are sticky, as for
/// [`LuDec`](super::LuDec).
#[derive(Debug, Clone)]
pub struct CholeskyDec<T> {
    m: Matrix<T>,
    config: Config<T>,
    norm1: T,
    decomposed: bool,
    fault: Option<LinalgError>,
    det: Option<Det<T>>,
    cond: Option<T>,
}

impl<T: FloatScalar> CholeskyDec<T> {
    /// Snapshot `a` for later factorization.
    pub fn new(a: &Matrix<T>, config: Config<T>) -> Self {
        CholeskyDec {
            m: a.clone(),
            config,
            norm1: a.norm1(),
            decomposed: false,
            fault: None,
            det: None,
            cond: None,
        }
    }

    /// Replace the matrix, dropping any factorization, fault and caches.
    pub fn assign(&mut self, a: &Matrix<T>) {
        *self = CholeskyDec::new(a, self.config);
    }

    /// Reset to an empty, unassigned state. Accessors panic until
    /// [`assign`](CholeskyDec::assign).
    pub fn clear(&mut self) {
        self.assign(&Matrix::zeros(0, 0, T::zero()));
    }

    fn decompose(&mut self) -> Result<(), LinalgError> {
        assert!(self.m.nrows() != 0, "decomposition used after clear() without assign()");
        if let Some(e) = self.fault {
            return Err(e);
        }
        if self.decomposed {
            return Ok(());
        }
        match cholesky_in_place(&mut self.m) {
            Ok(()) => {
                self.decomposed = true;
                Ok(())
            }
            Err(e) => {
                self.fault = Some(e);
                Err(e)
            }
        }
    }

    fn fail(&mut self, e: LinalgError) -> LinalgError {
        self.fault = Some(e);
        e
    }

    /// Solve `A·x = b`.
    ///
    /// Panics if `b.len()` does not match the matrix order.
    pub fn solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.decompose()?;
        let mut x = b.to_vec();
        match cholesky_solve_in_place(&self.m, &mut x, self.config.tol) {
            Ok(()) => Ok(x),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Solve `Aᵀ·x = b`. Identical to [`solve`](CholeskyDec::solve) since
    /// `A` is symmetric.
    pub fn trans_solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.solve(b)
    }

    /// Solve `A·X = B` for each column of `B`.
    pub fn multi_solve(&mut self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        self.decompose()?;
        assert_eq!(
            self.m.nrows(),
            b.nrows(),
            "dimension mismatch: {}x{} solve with {}x{} right-hand side",
            self.m.nrows(),
            self.m.ncols(),
            b.nrows(),
            b.ncols(),
        );
        let mut x = b.clone();
        for j in 0..x.ncols() {
            let col = x.col_as_mut_slice(j, 0);
            if let Err(e) = cholesky_solve_in_place(&self.m, col, self.config.tol) {
                return Err(self.fail(e));
            }
        }
        Ok(x)
    }

    /// The inverse, column by column.
    pub fn inverse(&mut self) -> Result<Matrix<T>, LinalgError> {
        let eye = Matrix::eye(self.m.nrows(), T::zero());
        self.multi_solve(&eye)
    }

    /// The determinant: the squared scaled product of the factor's diagonal.
    /// Cached after the first call.
    pub fn det(&mut self) -> Result<Det<T>, LinalgError> {
        if let Some(d) = self.det {
            return Ok(d);
        }
        self.decompose()?;
        let n = self.m.nrows();
        let d = scaled_product((0..n).map(|i| self.m[(i, i)]), self.config.tol).square();
        self.det = Some(d);
        Ok(d)
    }

    /// 1-norm condition estimate via Hager. Cached after the first call.
    pub fn cond(&mut self) -> Result<T, LinalgError> {
        if let Some(c) = self.cond {
            return Ok(c);
        }
        self.decompose()?;
        let m = &self.m;
        let tol = self.config.tol;
        let est = hager_estimate(
            m.nrows(),
            |b| cholesky_solve_in_place(m, b, tol),
            |b| cholesky_solve_in_place(m, b, tol),
            self.config.hager_iters,
        );
        match est {
            Ok(e) => {
                let c = self.norm1 * e;
                self.cond = Some(c);
                Ok(c)
            }
            Err(e) => Err(self.fail(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spd() -> Matrix<f64> {
        Matrix::from_rows(
            3,
            3,
            &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
        )
    }

    #[test]
    fn det_is_squared_factor_product() {
        // G diagonal is (2, 1, 3): det(A) = (2*1*3)^2 = 36.
        let mut ch = CholeskyDec::new(&spd(), Config::default());
        assert!((ch.det().unwrap().value() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn solve_round_trip() {
        let a = spd();
        let x = [1.0, -2.0, 0.5];
        let mut b = [0.0; 3];
        for i in 0..3 {
            for j in 0..3 {
                b[i] += a[(i, j)] * x[j];
            }
        }
        let mut ch = CholeskyDec::new(&a, Config::default());
        let got = ch.solve(&b).unwrap();
        for i in 0..3 {
            assert!((got[i] - x[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn indefinite_fault_is_sticky() {
        let ind = Matrix::from_rows(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        let mut ch = CholeskyDec::new(&ind, Config::default());
        assert_eq!(
            ch.solve(&[1.0, 1.0]).unwrap_err(),
            LinalgError::NotPositiveDefinite
        );
        assert_eq!(ch.det().unwrap_err(), LinalgError::NotPositiveDefinite);
    }

    #[test]
    fn cond_of_identity_is_one() {
        let mut ch = CholeskyDec::new(&Matrix::eye(4, 0.0_f64), Config::default());
        assert!((ch.cond().unwrap() - 1.0).abs() < 1e-12);
    }
}
