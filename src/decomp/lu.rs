//! LU decomposition wrapper.

use alloc::vec::Vec;

use super::{hager_estimate, scaled_product, Det};
use crate::linalg::{crout_in_place, lu_solve, lu_trans_solve, LinalgError, LuPivots};
use crate::traits::{FloatScalar, MatrixMut};
use crate::{Config, Matrix};

/// Lazily factored Crout LU decomposition of a square matrix.
///
/// The matrix is snapshotted at construction and factored on the first call
/// to [`solve`](LuDec::solve), [`det`](LuDec::det), [`cond`](LuDec::cond) or
/// a related accessor. Determinant and condition are cached. A kernel error
/// is sticky: once set, every accessor returns it until
/// [`assign`](LuDec::assign).
///
/// ```
/// use densemat::{Config, Matrix};
/// use densemat::decomp::LuDec;
///
/// let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
/// let mut lu = LuDec::new(&a, Config::default());
/// let x = lu.solve(&[10.0, 12.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det().unwrap().value() + 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDec<T> {
    m: Matrix<T>,
    pivots: LuPivots,
    config: Config<T>,
    norm1: T,
    decomposed: bool,
    fault: Option<LinalgError>,
    det: Option<Det<T>>,
    cond: Option<T>,
}

impl<T: FloatScalar> LuDec<T> {
    /// Snapshot `a` for later factorization. The 1-norm of `a` is recorded
    /// now, since the buffer is overwritten by the factorization.
    pub fn new(a: &Matrix<T>, config: Config<T>) -> Self {
        LuDec {
            m: a.clone(),
            pivots: LuPivots {
                perm: Vec::new(),
                even: true,
            },
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
        *self = LuDec::new(a, self.config);
    }

    /// Reset to an empty, unassigned state. Accessors panic until
    /// [`assign`](LuDec::assign).
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
        match crout_in_place(&mut self.m, self.config.tol) {
            Ok(p) => {
                self.pivots = p;
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
        match lu_solve(&self.m, &self.pivots, &mut x, self.config.tol) {
            Ok(()) => Ok(x),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Solve `Aᵀ·x = b`.
    pub fn trans_solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.decompose()?;
        let mut x = b.to_vec();
        match lu_trans_solve(&self.m, &self.pivots, &mut x, self.config.tol) {
            Ok(()) => Ok(x),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Solve `A·X = B` for each column of `B`.
    ///
    /// Panics if the row counts differ.
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
            if let Err(e) = lu_solve(&self.m, &self.pivots, col, self.config.tol) {
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

    /// The determinant: scaled product of the U diagonal times the pivot
    /// swap sign. Cached after the first call.
    pub fn det(&mut self) -> Result<Det<T>, LinalgError> {
        if let Some(d) = self.det {
            return Ok(d);
        }
        self.decompose()?;
        let n = self.m.nrows();
        let mut d = scaled_product((0..n).map(|i| self.m[(i, i)]), self.config.tol);
        d.mantissa = d.mantissa * self.pivots.sign::<T>();
        self.det = Some(d);
        Ok(d)
    }

    /// 1-norm condition estimate: `‖A‖₁` (recorded at assignment) times
    /// Hager's estimate of `‖A⁻¹‖₁`. Cached after the first call.
    pub fn cond(&mut self) -> Result<T, LinalgError> {
        if let Some(c) = self.cond {
            return Ok(c);
        }
        self.decompose()?;
        let m = &self.m;
        let piv = &self.pivots;
        let tol = self.config.tol;
        let est = hager_estimate(
            m.nrows(),
            |b| lu_solve(m, piv, b, tol),
            |b| lu_trans_solve(m, piv, b, tol),
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

    #[test]
    fn det_matches_cofactor_expansion() {
        // det = 1*(5*9 - 6*10) - 2*(4*9 - 6*7) + 3*(4*10 - 5*7) = 12
        let a: Matrix<f64> = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 10.0, 9.0]);
        let mut lu = LuDec::new(&a, Config::default());
        assert!((lu.det().unwrap().value() - 12.0).abs() < 1e-10);
    }

    #[test]
    fn cond_of_identity_is_one() {
        let mut lu = LuDec::new(&Matrix::eye(5, 0.0_f64), Config::default());
        assert!((lu.cond().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let a: Matrix<f64> = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let mut lu = LuDec::new(&a, Config::default());
        let inv = lu.inverse().unwrap();
        let prod = &a * &inv;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((prod[(i, j)] - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn singular_fault_is_sticky() {
        let singular: Matrix<f64> = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let mut lu = LuDec::new(&singular, Config::default());
        assert_eq!(lu.det().unwrap_err(), LinalgError::Singular);
        assert_eq!(lu.solve(&[1.0, 1.0]).unwrap_err(), LinalgError::Singular);
        assert_eq!(lu.cond().unwrap_err(), LinalgError::Singular);
        // Reassignment clears the fault.
        lu.assign(&Matrix::eye(2, 0.0));
        assert!((lu.det().unwrap().value() - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "without assign")]
    fn use_after_clear_panics() {
        let mut lu = LuDec::new(&Matrix::eye(2, 0.0_f64), Config::default());
        lu.clear();
        let _ = lu.det();
    }

    #[test]
    fn det_is_cached() {
        let a: Matrix<f64> = Matrix::from_rows(2, 2, &[3.0, 0.0, 0.0, 2.0]);
        let mut lu = LuDec::new(&a, Config::default());
        let d1 = lu.det().unwrap();
        let d2 = lu.det().unwrap();
        assert_eq!(d1, d2);
        assert!((d1.value() - 6.0).abs() < 1e-12);
    }
}
