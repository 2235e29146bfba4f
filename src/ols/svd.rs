//! Singular value decomposition OLS engine.

use alloc::vec::Vec;

use super::{Ols, OlsEngine};
use crate::linalg::{svd_back_sub, svdcmp, LinalgError};
use crate::traits::{FloatScalar, MatrixRef};
use crate::{Config, Matrix};

/// Factors `X = U·diag(S)·Wᵀ` and solves through the pseudo-inverse,
/// skipping zeroed singular values.
///
/// Values below `S_max · tol` are zeroed at construction, so a
/// rank-deficient design yields the minimum-norm coefficient vector
/// instead of failing. Which values count as zero can be changed after the
/// fit ([`zero_sv`](Ols::zero_sv), [`set_sv`](Ols::set_sv)); the
/// coefficients and statistics are then recomputed without re-decomposing.
#[derive(Debug, Clone)]
pub struct SvdEngine<T> {
    u: Matrix<T>,
    sv: Vec<T>,
    w: Matrix<T>,
}

impl<T: FloatScalar> SvdEngine<T> {
    /// Zero singular values below `S_max * tol`. Values are sorted
    /// descending, so the maximum is the first.
    fn zero_small(&mut self, tol: T) {
        if self.sv.is_empty() {
            return;
        }
        let limit = self.sv[0] * tol;
        for s in self.sv.iter_mut() {
            if *s < limit {
                *s = T::zero();
            }
        }
    }

    /// Coefficients from the current singular values, one response column
    /// at a time.
    pub(crate) fn beta_for(&self, y: &Matrix<T>) -> Matrix<T> {
        let n = self.sv.len();
        let mut beta = Matrix::zeros(n, y.ncols(), T::zero());
        for j in 0..y.ncols() {
            let b = svd_back_sub(&self.u, &self.sv, &self.w, y.col_as_slice(j, 0));
            for i in 0..n {
                beta[(i, j)] = b[i];
            }
        }
        beta
    }
}

impl<T: FloatScalar> OlsEngine<T> for SvdEngine<T> {
    fn factor(
        y: &Matrix<T>,
        x: &Matrix<T>,
        config: &Config<T>,
    ) -> Result<(Self, Matrix<T>), LinalgError> {
        let mut u = x.clone();
        let svd = svdcmp(&mut u)?;
        let mut engine = SvdEngine {
            u,
            sv: svd.w,
            w: svd.v,
        };
        engine.zero_small(config.tol);
        let beta = engine.beta_for(y);
        Ok((engine, beta))
    }

    /// `V = W·diag(1/s²)·Wᵀ` over the nonzero singular values.
    fn v_kernel(&self) -> Matrix<T> {
        let n = self.sv.len();
        let d: Vec<T> = self
            .sv
            .iter()
            .map(|&s| {
                if s != T::zero() {
                    T::one() / (s * s)
                } else {
                    T::zero()
                }
            })
            .collect();
        let mut v = Matrix::zeros(n, n, T::zero());
        for i in 0..n {
            for j in i..n {
                let mut sum = T::zero();
                for k in 0..n {
                    sum = sum + self.w[(i, k)] * self.w[(j, k)] * d[k];
                }
                v[(i, j)] = sum;
                v[(j, i)] = sum;
            }
        }
        v
    }

    /// `S_max / S_min`; [`LinalgError::Singular`] when the smallest value
    /// (including any zeroed for rank control) is below tolerance.
    fn cond(&self, config: &Config<T>) -> Result<T, LinalgError> {
        let max = self.sv[0];
        let min = self.sv[self.sv.len() - 1];
        if min < config.tol {
            Err(LinalgError::Singular)
        } else {
            Ok(max / min)
        }
    }
}

impl<T: FloatScalar> Ols<T, SvdEngine<T>> {
    /// The singular values of the design, descending.
    pub fn sv(&self) -> &[T] {
        &self.engine.sv
    }

    /// Number of singular values retained as nonzero.
    pub fn rank(&self) -> usize {
        self.engine.sv.iter().filter(|&&s| s > T::zero()).count()
    }

    /// Zero the `k` smallest singular values and refit.
    pub fn zero_sv(&mut self, k: usize) {
        let n = self.engine.sv.len();
        for s in self.engine.sv.iter_mut().skip(n.saturating_sub(k)) {
            *s = T::zero();
        }
        self.refit();
    }

    /// Overwrite one singular value and refit.
    ///
    /// Panics if `i` is out of range.
    pub fn set_sv(&mut self, i: usize, value: T) {
        self.engine.sv[i] = value;
        self.refit();
    }

    /// Recompute the coefficients and every derived statistic from the
    /// current singular values, reusing the stored decomposition.
    fn refit(&mut self) {
        self.beta = self.engine.beta_for(&self.y);
        self.form_resid();
        self.v = self.engine.v_kernel();
        self.v_sqrt = (0..self.n_vars).map(|i| self.v[(i, i)].sqrt()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::super::{OlsQr, OlsSvd};
    use crate::{Config, Matrix};

    #[test]
    fn matches_qr_engine_on_full_rank_design() {
        let x: Matrix<f64> = Matrix::from_rows(5, 2, &[1.0, 0.3, 1.0, 1.1, 1.0, 2.2, 1.0, 2.9, 1.0, 4.5]);
        let y = Matrix::col_vec(&[0.9, 2.1, 3.2, 3.8, 5.5]);
        let sv = OlsSvd::new(&y, &x, Config::default()).unwrap();
        let qr = OlsQr::new(&y, &x, Config::default()).unwrap();
        for i in 0..2 {
            assert!((sv.coeff()[(i, 0)] - qr.coeff()[(i, 0)]).abs() < 1e-9);
        }
        assert!((sv.rss(0) - qr.rss(0)).abs() < 1e-9);
    }

    #[test]
    fn collinear_design_fits_with_reduced_rank() {
        // Third column is the sum of the first two: rank 2.
        let t = [1.0, 2.0, 3.0, 4.0, 5.0];
        let x = Matrix::from_fn(5, 3, |i, j| match j {
            0 => 1.0,
            1 => t[i],
            _ => 1.0 + t[i],
        });
        let y = Matrix::from_fn(5, 1, |i, _| 2.0 + 3.0 * t[i]);
        let fit = OlsSvd::new(&y, &x, Config::default()).unwrap();
        assert_eq!(fit.rank(), 2);
        // The fit is still exact even though the coefficients are not
        // unique; the SVD picks the minimum-norm set.
        assert!(fit.rss(0) < 1e-18);
        assert!(fit.cond().is_err());
    }

    #[test]
    fn zero_sv_refits_without_redecomposing() {
        let x = Matrix::from_rows(5, 2, &[1.0, 0.3, 1.0, 1.1, 1.0, 2.2, 1.0, 2.9, 1.0, 4.5]);
        let y = Matrix::col_vec(&[0.9, 2.1, 3.2, 3.8, 5.5]);
        let mut fit = OlsSvd::new(&y, &x, Config::default()).unwrap();
        let rss_full = fit.rss(0);
        fit.zero_sv(1);
        assert_eq!(fit.rank(), 1);
        // Dropping a direction can only lose fit.
        assert!(fit.rss(0) >= rss_full);
        // Restoring is possible because the decomposition is retained.
        assert!(fit.sv()[0] > 0.0);
    }
}
