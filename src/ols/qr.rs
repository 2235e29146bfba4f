//! Householder QR OLS engine.

use super::{cond_from_r, v_from_rinv, Ols, OlsEngine};
use crate::linalg::{
    back_substitute, householder_in_place, q_reflect, triu_invert, Householder, LinalgError,
};
use crate::traits::FloatScalar;
use crate::{Config, Matrix};

/// Factors `X = Q·R` by Householder reflections and projects `Y` onto the
/// column space of `X` without ever forming `XᵀX`.
///
/// Stores the packed reflectors and the projected response `QᵀY`, which
/// also makes the stepwise [`var_add`](Ols::var_add) diagnostic cheap.
#[derive(Debug, Clone)]
pub struct QrhEngine<T> {
    q: Matrix<T>,
    h: Householder<T>,
    u: Matrix<T>,
    r: Matrix<T>,
    rinv: Matrix<T>,
}

impl<T: FloatScalar> OlsEngine<T> for QrhEngine<T> {
    fn factor(
        y: &Matrix<T>,
        x: &Matrix<T>,
        config: &Config<T>,
    ) -> Result<(Self, Matrix<T>), LinalgError> {
        let mut q = x.clone();
        let h = householder_in_place(&mut q, config.tol)?;
        // u = QᵀY: the leading rows project Y onto span(X), the rest are
        // the least-squares residual components.
        let mut u = y.clone();
        q_reflect(&mut u, &q, &h);
        let n = x.ncols();
        let r = {
            let q = &q;
            let h = &h;
            Matrix::from_fn(n, n, |i, j| {
                if i == j {
                    h.diag_r[i]
                } else if i < j {
                    q[(i, j)]
                } else {
                    T::zero()
                }
            })
        };
        let rinv = triu_invert(&r, config.tol)?;
        let mut beta = u.sub(0, 0, n, y.ncols());
        back_substitute(&mut beta, &r, config.tol)?;
        Ok((QrhEngine { q, h, u, r, rinv }, beta))
    }

    fn v_kernel(&self) -> Matrix<T> {
        v_from_rinv(&self.rinv)
    }

    fn cond(&self, _config: &Config<T>) -> Result<T, LinalgError> {
        Ok(cond_from_r(&self.r, &self.rinv))
    }
}

impl<T: FloatScalar> Ols<T, QrhEngine<T>> {
    /// RSS of equation `j` if the columns of `z` were added to the design,
    /// computed from the stored factorization without refitting.
    ///
    /// Projects `z` into the residual space of `X`, QR-factors the
    /// projection, and measures what remains of the residual after the new
    /// directions are removed.
    ///
    /// Panics if `z` has as many columns as there are degrees of freedom,
    /// or a different number of rows than the design.
    pub fn var_add(&self, z: &Matrix<T>, j: usize) -> Result<T, LinalgError> {
        let nc = z.ncols();
        assert!(
            nc < self.dof,
            "adding {} columns exceeds {} degrees of freedom",
            nc,
            self.dof,
        );
        assert_eq!(
            z.nrows(),
            self.n_obs,
            "added columns have {} rows but the design has {}",
            z.nrows(),
            self.n_obs,
        );
        let mut zz = z.clone();
        q_reflect(&mut zz, &self.engine.q, &self.engine.h);
        // The part of z outside span(X).
        let mut q_low = zz.sub(self.n_vars, 0, self.n_obs - self.n_vars, nc);
        let h_low = householder_in_place(&mut q_low, self.config.tol)?;
        // Project the residual components of Y onto the new directions.
        let mut u = self
            .engine
            .u
            .sub(self.n_vars, j, self.n_obs - self.n_vars, 1);
        q_reflect(&mut u, &q_low, &h_low);
        let mut s = T::zero();
        for i in nc..u.nrows() {
            let e = u[(i, 0)];
            s = s + e * e;
        }
        Ok(s)
    }
}
