//! Normal-equations OLS engine: Cholesky factorization of `XᵀX`.

use super::{cond_from_r, v_from_rinv, OlsEngine};
use crate::linalg::{cholesky_in_place, cholesky_solve_in_place, triu_invert, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};
use crate::{Config, Matrix};

/// Factors `XᵀX = G·Gᵀ` and solves the normal equations
/// `XᵀX·beta = XᵀY`. Fast, but squares the condition of the design;
/// prefer the QR or SVD engines for ill-conditioned problems.
#[derive(Debug, Clone)]
pub struct CholEngine<T> {
    r: Matrix<T>,
    rinv: Matrix<T>,
}

impl<T: FloatScalar> OlsEngine<T> for CholEngine<T> {
    fn factor(
        y: &Matrix<T>,
        x: &Matrix<T>,
        config: &Config<T>,
    ) -> Result<(Self, Matrix<T>), LinalgError> {
        let xt = x.transpose();
        let mut xtx = &xt * x;
        let mut beta = &xt * y;
        cholesky_in_place(&mut xtx)?;
        // R is the transposed Cholesky factor, upper triangular.
        let n = x.ncols();
        let r = Matrix::from_fn(n, n, |i, j| if i <= j { xtx[(j, i)] } else { T::zero() });
        let rinv = triu_invert(&r, config.tol)?;
        for j in 0..beta.ncols() {
            cholesky_solve_in_place(&xtx, beta.col_as_mut_slice(j, 0), config.tol)?;
        }
        Ok((CholEngine { r, rinv }, beta))
    }

    fn v_kernel(&self) -> Matrix<T> {
        v_from_rinv(&self.rinv)
    }

    fn cond(&self, _config: &Config<T>) -> Result<T, LinalgError> {
        Ok(cond_from_r(&self.r, &self.rinv))
    }
}
