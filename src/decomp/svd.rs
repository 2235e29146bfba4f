//! Singular value decomposition wrapper.

use alloc::vec::Vec;

use super::{scaled_product, Det};
use crate::linalg::{svd_back_sub, svdcmp, LinalgError};
use crate::traits::{FloatScalar, MatrixRef};
use crate::{Config, Matrix};

/// Lazily factored singular value decomposition `A = U·diag(S)·Vᵀ`.
///
/// Singular values are held sorted descending. Unlike the other wrappers the
/// condition number is exact (`S_max / S_min`) rather than a Hager estimate,
/// and the effective rank can be controlled after the fact by zeroing small
/// singular values ([`zero_below`](SvdDec::zero_below),
/// [`zero_sv`](SvdDec::zero_sv)); solves then pass over the zeroed
/// components, giving the minimum-norm regularized solution.
///
/// Requires `nrows >= ncols`; decompose the transpose otherwise.
#[derive(Debug, Clone)]
pub struct SvdDec<T> {
    m: Matrix<T>,
    w: Vec<T>,
    v: Matrix<T>,
    config: Config<T>,
    decomposed: bool,
    fault: Option<LinalgError>,
    det: Option<Det<T>>,
    cond: Option<T>,
}

impl<T: FloatScalar> SvdDec<T> {
    /// Snapshot `a` for later factorization.
    pub fn new(a: &Matrix<T>, config: Config<T>) -> Self {
        SvdDec {
            m: a.clone(),
            w: Vec::new(),
            v: Matrix::zeros(0, 0, T::zero()),
            config,
            decomposed: false,
            fault: None,
            det: None,
            cond: None,
        }
    }

    /// Replace the matrix, dropping any factorization, fault and caches.
    pub fn assign(&mut self, a: &Matrix<T>) {
        *self = SvdDec::new(a, self.config);
    }

    /// Reset to an empty, unassigned state. Accessors panic until
    /// [`assign`](SvdDec::assign).
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
        match svdcmp(&mut self.m) {
            Ok(svd) => {
                self.w = svd.w;
                self.v = svd.v;
                self.decomposed = true;
                Ok(())
            }
            Err(e) => {
                self.fault = Some(e);
                Err(e)
            }
        }
    }

    /// The singular values, descending.
    pub fn sv(&mut self) -> Result<&[T], LinalgError> {
        self.decompose()?;
        Ok(&self.w)
    }

    /// Number of singular values strictly greater than zero.
    pub fn rank(&mut self) -> Result<usize, LinalgError> {
        self.decompose()?;
        Ok(self.w.iter().filter(|&&s| s > T::zero()).count())
    }

    /// Zero every singular value below `min`; `min <= 0` means the
    /// configured tolerance. Later solves skip the zeroed components.
    pub fn zero_below(&mut self, min: T) -> Result<(), LinalgError> {
        self.decompose()?;
        let min = if min <= T::zero() {
            self.config.tol
        } else {
            min
        };
        for s in self.w.iter_mut() {
            if *s < min {
                *s = T::zero();
            }
        }
        self.det = None;
        self.cond = None;
        Ok(())
    }

    /// Zero the `k` smallest singular values.
    pub fn zero_sv(&mut self, k: usize) -> Result<(), LinalgError> {
        self.decompose()?;
        let n = self.w.len();
        for s in self.w.iter_mut().skip(n.saturating_sub(k)) {
            *s = T::zero();
        }
        self.det = None;
        self.cond = None;
        Ok(())
    }

    /// Overwrite one singular value.
    ///
    /// Panics if `i` is out of range.
    pub fn set_sv(&mut self, i: usize, value: T) -> Result<(), LinalgError> {
        self.decompose()?;
        self.w[i] = value;
        self.det = None;
        self.cond = None;
        Ok(())
    }

    /// Solve `A·x = b` (least-squares for a tall `A`), skipping zeroed
    /// singular values.
    ///
    /// Panics if `b.len()` does not match the row count.
    pub fn solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.decompose()?;
        Ok(svd_back_sub(&self.m, &self.w, &self.v, b))
    }

    /// Solve `Aᵀ·x = b` from the transposed triple. Square matrices only.
    pub fn trans_solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.decompose()?;
        assert!(
            self.m.is_square(),
            "transpose solve requires a square matrix, got {}x{}",
            self.m.nrows(),
            self.m.ncols(),
        );
        Ok(svd_back_sub(&self.v, &self.w, &self.m, b))
    }

    /// Solve against each column of `B`.
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
        let n = self.w.len();
        let mut out = Matrix::zeros(n, b.ncols(), T::zero());
        for j in 0..b.ncols() {
            let x = svd_back_sub(&self.m, &self.w, &self.v, b.col_as_slice(j, 0));
            for i in 0..n {
                out[(i, j)] = x[i];
            }
        }
        Ok(out)
    }

    /// The (pseudo-)inverse, column by column.
    pub fn inverse(&mut self) -> Result<Matrix<T>, LinalgError> {
        let eye = Matrix::eye(self.m.nrows(), T::zero());
        self.multi_solve(&eye)
    }

    /// Scaled product of the singular values: the determinant magnitude,
    /// zero if any singular value is zero. Cached after the first call.
    pub fn det(&mut self) -> Result<Det<T>, LinalgError> {
        if let Some(d) = self.det {
            return Ok(d);
        }
        self.decompose()?;
        let d = scaled_product(self.w.iter().copied(), T::zero());
        self.det = Some(d);
        Ok(d)
    }

    /// Exact 2-norm condition number `S_max / S_min`.
    ///
    /// Returns [`LinalgError::Singular`] when the smallest singular value is
    /// zero. Cached after the first call.
    pub fn cond(&mut self) -> Result<T, LinalgError> {
        if let Some(c) = self.cond {
            return Ok(c);
        }
        self.decompose()?;
        let max = self.w[0];
        let min = self.w[self.w.len() - 1];
        if min == T::zero() {
            return Err(LinalgError::Singular);
        }
        let c = max / min;
        self.cond = Some(c);
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_square_system() {
        let a: Matrix<f64> = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let mut svd = SvdDec::new(&a, Config::default());
        let x = svd.solve(&[8.0, -11.0, -3.0]).unwrap();
        let expected = [2.0, 3.0, -1.0];
        for i in 0..3 {
            assert!((x[i] - expected[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn cond_of_diagonal_matrix() {
        let a: Matrix<f64> = Matrix::from_rows(2, 2, &[4.0, 0.0, 0.0, 2.0]);
        let mut svd = SvdDec::new(&a, Config::default());
        assert!((svd.cond().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rank_deficiency_detected() {
        let a = Matrix::from_rows(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let mut svd = SvdDec::new(&a, Config::default());
        svd.zero_below(0.0).unwrap();
        assert_eq!(svd.rank().unwrap(), 1);
        assert!(svd.det().unwrap().is_zero());
        assert_eq!(svd.cond().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn det_magnitude_of_spd_matrix() {
        // Symmetric positive definite, so |det| = product of singular values.
        let a: Matrix<f64> = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let mut svd = SvdDec::new(&a, Config::default());
        assert!((svd.det().unwrap().value() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn zero_sv_regularizes_solution() {
        // Nearly rank-one matrix; zeroing the small value keeps the solve
        // finite instead of blowing up along the weak direction.
        let a: Matrix<f64> = Matrix::from_rows(2, 2, &[1.0, 1.0, 1.0, 1.0 + 1e-13]);
        let mut svd = SvdDec::new(&a, Config::default());
        svd.zero_sv(1).unwrap();
        let x = svd.solve(&[2.0, 2.0]).unwrap();
        assert!(x[0].is_finite() && x[1].is_finite());
        assert!((x[0] - 1.0).abs() < 1e-6 && (x[1] - 1.0).abs() < 1e-6);
    }
}
