//! Ordinary least squares regression.
//!
//! Three engines fit the same linear model `Y = X·beta + e` and expose one
//! statistical surface ([`Ols`]); they differ in how `X` is factored and
//! therefore in speed and numerical robustness:
//!
//! | Engine | Factors | Notes |
//! |--------|---------|-------|
//! | [`OlsChol`] | Cholesky of `XᵀX` | fastest; squares the condition number |
//! | [`OlsQr`] | Householder QR of `X` | the workhorse; supports [`var_add`](Ols::var_add) |
//! | [`OlsSvd`] | SVD of `X` | handles rank deficiency; effective-rank control |
//!
//! `Y` may carry several response columns; the per-column statistics take a
//! 0-based column index.
//!
//! ```
//! use densemat::{Config, Matrix};
//! use densemat::ols::OlsQr;
//!
//! // y = 1 + 2 t, fitted through an intercept column.
//! let x: Matrix<f64> = Matrix::from_rows(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
//! let y = Matrix::col_vec(&[1.0, 3.0, 5.0, 7.0]);
//! let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
//! assert!((fit.coeff()[(0, 0)] - 1.0).abs() < 1e-10);
//! assert!((fit.coeff()[(1, 0)] - 2.0).abs() < 1e-10);
//! assert!((fit.rsq(0) - 1.0).abs() < 1e-12);
//! ```

use alloc::vec::Vec;

use crate::decomp::LuDec;
use crate::linalg::LinalgError;
use crate::matrix::inner;
use crate::traits::{FloatScalar, MatrixRef};
use crate::{Config, Matrix};

mod chol;
mod qr;
mod svd;

pub use chol::CholEngine;
pub use qr::QrhEngine;
pub use svd::SvdEngine;

/// OLS via Cholesky factorization of the normal equations `XᵀX`.
pub type OlsChol<T> = Ols<T, CholEngine<T>>;
/// OLS via Householder QR factorization of `X`.
pub type OlsQr<T> = Ols<T, QrhEngine<T>>;
/// OLS via singular value decomposition of `X`.
pub type OlsSvd<T> = Ols<T, SvdEngine<T>>;

/// Errors reported when constructing a regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OlsError {
    /// `Y` and `X` have different numbers of rows.
    ObservationMismatch {
        /// Rows of the response matrix.
        y_rows: usize,
        /// Rows of the design matrix.
        x_rows: usize,
    },
    /// Fewer observations than regressors: the model is under-determined.
    TooFewObservations {
        /// Number of observations.
        n_obs: usize,
        /// Number of regressors.
        n_vars: usize,
    },
    /// The factorization of the design failed.
    Factorization(LinalgError),
}

impl core::fmt::Display for OlsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OlsError::ObservationMismatch { y_rows, x_rows } => write!(
                f,
                "response has {} rows but design has {}",
                y_rows, x_rows
            ),
            OlsError::TooFewObservations { n_obs, n_vars } => write!(
                f,
                "{} observations cannot identify {} regressors",
                n_obs, n_vars
            ),
            OlsError::Factorization(e) => write!(f, "design factorization failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OlsError {}

impl From<LinalgError> for OlsError {
    fn from(e: LinalgError) -> Self {
        OlsError::Factorization(e)
    }
}

/// Factorization strategy behind an [`Ols`] fit.
///
/// Implemented by [`CholEngine`], [`QrhEngine`] and [`SvdEngine`]; not
/// intended for implementation outside the crate.
pub trait OlsEngine<T: FloatScalar>: Sized {
    /// Factor the design and compute the coefficient matrix.
    fn factor(
        y: &Matrix<T>,
        x: &Matrix<T>,
        config: &Config<T>,
    ) -> Result<(Self, Matrix<T>), LinalgError>;

    /// The variance kernel `V` with `V·se²` the coefficient covariance.
    fn v_kernel(&self) -> Matrix<T>;

    /// Condition diagnostic of the design.
    fn cond(&self, config: &Config<T>) -> Result<T, LinalgError>;
}

/// `V(i,j) = Σ_{k ≥ max(i,j)} Rinv(i,k)·Rinv(j,k)`, the inverse of `XᵀX`
/// expressed through the inverse triangular factor.
pub(crate) fn v_from_rinv<T: FloatScalar>(rinv: &Matrix<T>) -> Matrix<T> {
    let n = rinv.ncols();
    let mut v = Matrix::zeros(n, n, T::zero());
    for i in 0..n {
        for j in i..n {
            let mut sum = T::zero();
            for k in j..n {
                sum = sum + rinv[(i, k)] * rinv[(j, k)];
            }
            v[(i, j)] = sum;
            v[(j, i)] = sum;
        }
    }
    v
}

/// Frobenius-style condition of `X` from the triangular factor and its
/// inverse: `sqrt(Σ_triu R²) · sqrt(Σ_triu Rinv²)`.
pub(crate) fn cond_from_r<T: FloatScalar>(r: &Matrix<T>, rinv: &Matrix<T>) -> T {
    let n = r.ncols();
    let mut norm1 = T::zero();
    let mut norm2 = T::zero();
    for i in 0..n {
        for j in i..n {
            norm1 = norm1 + r[(i, j)] * r[(i, j)];
            norm2 = norm2 + rinv[(i, j)] * rinv[(i, j)];
        }
    }
    norm1.sqrt() * norm2.sqrt()
}

/// A fitted least-squares regression.
///
/// Constructed by [`Ols::new`] (usually through the [`OlsChol`], [`OlsQr`]
/// or [`OlsSvd`] alias). The factorization and all derived statistics are
/// computed at construction; accessors are cheap.
#[derive(Debug, Clone)]
pub struct Ols<T, E> {
    pub(crate) engine: E,
    pub(crate) config: Config<T>,
    pub(crate) y: Matrix<T>,
    pub(crate) x: Matrix<T>,
    pub(crate) n_obs: usize,
    pub(crate) n_vars: usize,
    pub(crate) n_dep: usize,
    pub(crate) dof: usize,
    pub(crate) constant: bool,
    pub(crate) y_mean: Vec<T>,
    pub(crate) tss: Vec<T>,
    pub(crate) beta: Matrix<T>,
    pub(crate) resid: Matrix<T>,
    pub(crate) rss: Vec<T>,
    pub(crate) se: Vec<T>,
    pub(crate) v: Matrix<T>,
    pub(crate) v_sqrt: Vec<T>,
}

impl<T: FloatScalar, E: OlsEngine<T>> Ols<T, E> {
    /// Fit `Y = X·beta + e`.
    ///
    /// Fails with [`OlsError::ObservationMismatch`] if the row counts
    /// differ, [`OlsError::TooFewObservations`] if there are fewer
    /// observations than regressors, and
    /// [`OlsError::Factorization`] if the design cannot be factored.
    ///
    /// `dof == 0` (as many observations as regressors) is allowed; the fit
    /// is exact and the standard errors are non-finite.
    pub fn new(y: &Matrix<T>, x: &Matrix<T>, config: Config<T>) -> Result<Self, OlsError> {
        if y.nrows() != x.nrows() {
            return Err(OlsError::ObservationMismatch {
                y_rows: y.nrows(),
                x_rows: x.nrows(),
            });
        }
        if x.nrows() < x.ncols() {
            return Err(OlsError::TooFewObservations {
                n_obs: x.nrows(),
                n_vars: x.ncols(),
            });
        }
        let n_obs = x.nrows();
        let n_vars = x.ncols();
        let n_dep = y.ncols();

        // Constant true iff some column of X is constant.
        let xmax = x.col_max();
        let xmin = x.col_min();
        let constant = xmax.iter().zip(xmin.iter()).any(|(a, b)| a == b);

        let (engine, beta) = E::factor(y, x, &config)?;
        let v = engine.v_kernel();
        let v_sqrt = (0..n_vars).map(|i| v[(i, i)].sqrt()).collect();

        let mut fit = Ols {
            engine,
            config,
            y: y.clone(),
            x: x.clone(),
            n_obs,
            n_vars,
            n_dep,
            dof: n_obs - n_vars,
            constant,
            y_mean: y.col_mean(),
            tss: y.col_sumsq_dev(),
            beta,
            resid: Matrix::zeros(0, 0, T::zero()),
            rss: Vec::new(),
            se: Vec::new(),
            v,
            v_sqrt,
        };
        fit.form_resid();
        Ok(fit)
    }

    /// Residuals, RSS and per-equation standard errors from the current
    /// coefficients.
    pub(crate) fn form_resid(&mut self) {
        let fitted = &self.x * &self.beta;
        self.resid = &self.y - &fitted;
        self.rss = self.resid.col_sumsq();
        let dof = T::count(self.dof);
        self.se = self.rss.iter().map(|&r| (r / dof).sqrt()).collect();
    }

    /// Number of observations.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Number of regressors.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Degrees of freedom, `n_obs - n_vars`.
    pub fn dof(&self) -> usize {
        self.dof
    }

    /// True if some column of the design is constant (an intercept).
    pub fn constant(&self) -> bool {
        self.constant
    }

    /// Coefficient matrix, `n_vars x n_dep`.
    pub fn coeff(&self) -> &Matrix<T> {
        &self.beta
    }

    /// Residual matrix `Y - X·beta`, `n_obs x n_dep`.
    pub fn residuals(&self) -> &Matrix<T> {
        &self.resid
    }

    /// Fitted values `X·beta`.
    pub fn fitted(&self) -> Matrix<T> {
        &self.y - &self.resid
    }

    /// Residual sum of squares for response column `j`.
    pub fn rss(&self, j: usize) -> T {
        self.rss[j]
    }

    /// Total sum of squares about the mean for response column `j`.
    pub fn tss(&self, j: usize) -> T {
        self.tss[j]
    }

    /// Standard error of equation `j`: `sqrt(rss / dof)`.
    ///
    /// Non-finite when `dof == 0`.
    pub fn se(&self, j: usize) -> T {
        self.se[j]
    }

    /// R² for response column `j`. Without a constant column the mean is
    /// not absorbed by the fit, so the denominator picks up the squared
    /// mean.
    pub fn rsq(&self, j: usize) -> T {
        let r = self.rss[j];
        let t = self.tss[j];
        let y = self.y_mean[j];
        if self.constant {
            T::one() - r / t
        } else {
            T::one() - r / (t + y * y)
        }
    }

    /// Adjusted R² for response column `j`, applying the
    /// `(n_obs - 1) / dof` correction.
    pub fn rbar_sq(&self, j: usize) -> T {
        let r = self.rss[j];
        let t = self.tss[j];
        let y = self.y_mean[j];
        let num = r * T::count(self.n_obs - 1);
        let den = if self.constant { t } else { t + y * y } * T::count(self.dof);
        T::one() - num / den
    }

    /// Standard errors of the coefficients, `n_vars x n_dep`:
    /// `se(j) · sqrt(V(i,i))`.
    pub fn std_err(&self) -> Matrix<T> {
        let mut out = Matrix::zeros(self.n_vars, self.n_dep, T::zero());
        for j in 0..self.n_dep {
            let s = self.se[j];
            for i in 0..self.n_vars {
                out[(i, j)] = s * self.v_sqrt[i];
            }
        }
        out
    }

    /// Covariance of the coefficients for equation `j`: `V · se(j)²`.
    pub fn cov(&self, j: usize) -> Matrix<T> {
        let s = self.se[j];
        &self.v * (s * s)
    }

    /// Durbin-Watson statistic for response column `j`:
    /// `Σ(eᵢ - eᵢ₋₁)² / Σeᵢ²`.
    pub fn dw(&self, j: usize) -> T {
        let mut prev = self.resid[(0, j)];
        let mut denom = prev * prev;
        let mut num = T::zero();
        for i in 1..self.n_obs {
            let e = self.resid[(i, j)];
            denom = denom + e * e;
            let d = e - prev;
            num = num + d * d;
            prev = e;
        }
        num / denom
    }

    /// t-statistic for the single restriction `w·beta_j = r`.
    ///
    /// Panics if `w.len()` does not match the number of regressors.
    pub fn t_test(&self, w: &[T], r: T, j: usize) -> T {
        assert_eq!(
            w.len(),
            self.n_vars,
            "restriction length {} does not match {} regressors",
            w.len(),
            self.n_vars,
        );
        let num = inner(w, self.beta.col_as_slice(j, 0)) - r;
        // denom = sqrt(wᵀVw)
        let mut vw = Vec::with_capacity(self.n_vars);
        for i in 0..self.n_vars {
            let mut s = T::zero();
            for k in 0..self.n_vars {
                s = s + self.v[(i, k)] * w[k];
            }
            vw.push(s);
        }
        let denom = inner(w, &vw).sqrt();
        num / (self.se[j] * denom)
    }

    /// F-statistic for the restrictions `H·beta_j = a`:
    /// `wᵀZ⁻¹w / (rows(H)·se(j)²)` with `w = H·beta_j - a` and
    /// `Z = H·V·Hᵀ`.
    ///
    /// Panics on restriction shape mismatches; fails if `Z` is singular.
    pub fn f_test(&self, h: &Matrix<T>, a: &[T], j: usize) -> Result<T, LinalgError> {
        assert_eq!(
            h.ncols(),
            self.n_vars,
            "restriction matrix {}x{} does not match {} regressors",
            h.nrows(),
            h.ncols(),
            self.n_vars,
        );
        assert_eq!(
            a.len(),
            h.nrows(),
            "restriction value length {} does not match {} restrictions",
            a.len(),
            h.nrows(),
        );
        let m = h.nrows();
        let beta_j = self.beta.col_as_slice(j, 0);
        let mut w = Vec::with_capacity(m);
        for i in 0..m {
            let mut s = T::zero();
            for k in 0..self.n_vars {
                s = s + h[(i, k)] * beta_j[k];
            }
            w.push(s - a[i]);
        }
        let hv = h * &self.v;
        let z = &hv * &h.transpose();
        let sol = LuDec::new(&z, self.config).solve(&w)?;
        let s = self.se[j];
        Ok(inner(&w, &sol) / (T::count(m) * s * s))
    }

    /// Condition diagnostic of the design, as defined by the engine.
    pub fn cond(&self) -> Result<T, LinalgError> {
        self.engine.cond(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_mismatch_rejected() {
        let y = Matrix::col_vec(&[1.0, 2.0, 3.0]);
        let x = Matrix::fill(4, 1, 1.0);
        assert_eq!(
            OlsQr::new(&y, &x, Config::default()).unwrap_err(),
            OlsError::ObservationMismatch {
                y_rows: 3,
                x_rows: 4
            }
        );
    }

    #[test]
    fn underdetermined_rejected() {
        let y = Matrix::col_vec(&[1.0, 2.0]);
        let x = Matrix::from_rows(2, 3, &[1.0, 0.5, 0.2, 1.0, 1.5, 0.7]);
        assert_eq!(
            OlsChol::new(&y, &x, Config::default()).unwrap_err(),
            OlsError::TooFewObservations {
                n_obs: 2,
                n_vars: 3
            }
        );
    }

    #[test]
    fn saturated_fit_is_exact_with_nonfinite_se() {
        let y = Matrix::col_vec(&[3.0, 5.0]);
        let x: Matrix<f64> = Matrix::from_rows(2, 2, &[1.0, 1.0, 1.0, 2.0]);
        let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
        assert_eq!(fit.dof(), 0);
        assert!(fit.rss(0).abs() < 1e-20);
        assert!(!fit.se(0).is_finite());
    }

    #[test]
    fn intercept_detected_and_residuals_sum_to_zero() {
        let x = Matrix::from_rows(5, 2, &[1.0, 0.3, 1.0, 1.1, 1.0, 2.2, 1.0, 2.9, 1.0, 4.5]);
        let y = Matrix::col_vec(&[0.9, 2.1, 3.2, 3.8, 5.5]);
        let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
        assert!(fit.constant());
        let resid_sum: f64 = fit.residuals().col_sum()[0];
        assert!(resid_sum.abs() < 1e-10);
    }

    #[test]
    fn perfect_fit_has_unit_rsq_and_zero_dw_numerator() {
        let x: Matrix<f64> = Matrix::from_rows(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let y = Matrix::col_vec(&[1.0, 3.0, 5.0, 7.0]);
        let fit = OlsChol::new(&y, &x, Config::default()).unwrap();
        assert!((fit.rsq(0) - 1.0).abs() < 1e-10);
        assert!(fit.rss(0) < 1e-18);
    }

    #[test]
    fn t_test_of_true_restriction_is_small() {
        // y = 2 x exactly plus symmetric noise; test w = [0, 1], r near slope.
        let x: Matrix<f64> = Matrix::from_rows(6, 2, &[
            1.0, 1.0, //
            1.0, 2.0, //
            1.0, 3.0, //
            1.0, 4.0, //
            1.0, 5.0, //
            1.0, 6.0,
        ]);
        let y = Matrix::col_vec(&[2.1, 3.9, 6.1, 7.9, 10.1, 11.9]);
        let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
        let slope = fit.coeff()[(1, 0)];
        let t_at_truth = fit.t_test(&[0.0, 1.0], slope, 0);
        assert!(t_at_truth.abs() < 1e-10);
        // Far-away hypotheses are strongly rejected.
        let t_far = fit.t_test(&[0.0, 1.0], 0.0, 0);
        assert!(t_far.abs() > 10.0);
    }

    #[test]
    fn f_test_of_true_restrictions_is_small() {
        let x: Matrix<f64> = Matrix::from_rows(6, 2, &[
            1.0, 1.0, //
            1.0, 2.0, //
            1.0, 3.0, //
            1.0, 4.0, //
            1.0, 5.0, //
            1.0, 6.0,
        ]);
        let y = Matrix::col_vec(&[2.1, 3.9, 6.1, 7.9, 10.1, 11.9]);
        let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
        let b0 = fit.coeff()[(0, 0)];
        let b1 = fit.coeff()[(1, 0)];
        let h = Matrix::eye(2, 0.0);
        let f = fit.f_test(&h, &[b0, b1], 0).unwrap();
        assert!(f.abs() < 1e-10);
    }
}
