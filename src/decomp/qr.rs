//! Householder QR decomposition wrapper.

use alloc::vec::Vec;

use super::{hager_estimate, scaled_product, Det};
use crate::linalg::{
    back_substitute, back_substitute_t, householder_in_place, q_reflect, q_trans_reflect,
    Householder, LinalgError,
};
use crate::traits::{FloatScalar, MatrixRef};
use crate::{Config, Matrix};

/// Lazily factored Householder QR decomposition.
///
/// Works on square and tall matrices; for a tall matrix
/// [`solve`](QrDec::solve) returns the least-squares solution.
/// [`trans_solve`](QrDec::trans_solve) and [`cond`](QrDec::cond) require a
/// square matrix. Faults are sticky, as for [`LuDec`](super::LuDec).
#[derive(Debug, Clone)]
pub struct QrDec<T> {
    m: Matrix<T>,
    r: Matrix<T>,
    h: Householder<T>,
    config: Config<T>,
    norm1: T,
    decomposed: bool,
    fault: Option<LinalgError>,
    det: Option<Det<T>>,
    cond: Option<T>,
}

/// Solve `R·x = Qᵀ·b` in place over the leading `r.ncols()` entries of `b`.
fn qr_solve_slice<T: FloatScalar>(
    m: &Matrix<T>,
    r: &Matrix<T>,
    h: &Householder<T>,
    b: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    let mut y = Matrix::col_vec(b);
    q_reflect(&mut y, m, h);
    back_substitute(&mut y, r, tol)?;
    for (i, v) in b.iter_mut().enumerate().take(r.ncols()) {
        *v = y[(i, 0)];
    }
    Ok(())
}

/// Solve `Rᵀ·z = b` then form `x = Q·z` in place. Square factors only.
fn qr_trans_solve_slice<T: FloatScalar>(
    m: &Matrix<T>,
    r: &Matrix<T>,
    h: &Householder<T>,
    b: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    let mut y = Matrix::col_vec(b);
    back_substitute_t(&mut y, r, tol)?;
    q_trans_reflect(&mut y, m, h);
    for (i, v) in b.iter_mut().enumerate() {
        *v = y[(i, 0)];
    }
    Ok(())
}

impl<T: FloatScalar> QrDec<T> {
    /// Snapshot `a` for later factorization.
    pub fn new(a: &Matrix<T>, config: Config<T>) -> Self {
        QrDec {
            m: a.clone(),
            r: Matrix::zeros(0, 0, T::zero()),
            h: Householder {
                diag_r: Vec::new(),
                betas: Vec::new(),
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
        *self = QrDec::new(a, self.config);
    }

    /// Reset to an empty, unassigned state. Accessors panic until
    /// [`assign`](QrDec::assign).
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
        match householder_in_place(&mut self.m, self.config.tol) {
            Ok(h) => {
                // R explicitly, with the separately stored diagonal.
                let n = h.diag_r.len();
                let m = &self.m;
                self.r = Matrix::from_fn(n, n, |i, j| {
                    if i == j {
                        h.diag_r[i]
                    } else if i < j {
                        m[(i, j)]
                    } else {
                        T::zero()
                    }
                });
                self.h = h;
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

    /// Solve `A·x = b`; the least-squares solution when `A` is tall.
    ///
    /// Panics if `b.len()` does not match the row count.
    pub fn solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.decompose()?;
        assert_eq!(
            b.len(),
            self.m.nrows(),
            "right-hand side length {} does not match {}x{} factor",
            b.len(),
            self.m.nrows(),
            self.m.ncols(),
        );
        let mut x = b.to_vec();
        match qr_solve_slice(&self.m, &self.r, &self.h, &mut x, self.config.tol) {
            Ok(()) => {
                x.truncate(self.r.ncols());
                Ok(x)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Solve `Aᵀ·x = b`. Square matrices only.
    pub fn trans_solve(&mut self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        self.decompose()?;
        assert!(
            self.m.is_square(),
            "transpose solve requires a square matrix, got {}x{}",
            self.m.nrows(),
            self.m.ncols(),
        );
        let mut x = b.to_vec();
        match qr_trans_solve_slice(&self.m, &self.r, &self.h, &mut x, self.config.tol) {
            Ok(()) => Ok(x),
            Err(e) => Err(self.fail(e)),
        }
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
        let n = self.r.ncols();
        let mut out = Matrix::zeros(n, b.ncols(), T::zero());
        for j in 0..b.ncols() {
            let mut col = b.col_as_slice(j, 0).to_vec();
            if let Err(e) = qr_solve_slice(&self.m, &self.r, &self.h, &mut col, self.config.tol)
            {
                return Err(self.fail(e));
            }
            for i in 0..n {
                out[(i, j)] = col[i];
            }
        }
        Ok(out)
    }

    /// The inverse, column by column. Square matrices only.
    pub fn inverse(&mut self) -> Result<Matrix<T>, LinalgError> {
        let eye = Matrix::eye(self.m.nrows(), T::zero());
        self.multi_solve(&eye)
    }

    /// Scaled product of the R diagonal. The orthogonal factor's sign is not
    /// tracked, so the magnitude is the determinant magnitude but the sign
    /// follows the R diagonal only. Cached after the first call.
    pub fn det(&mut self) -> Result<Det<T>, LinalgError> {
        if let Some(d) = self.det {
            return Ok(d);
        }
        self.decompose()?;
        let d = scaled_product(self.h.diag_r.iter().copied(), self.config.tol);
        self.det = Some(d);
        Ok(d)
    }

    /// 1-norm condition estimate via Hager. Square matrices only. Cached
    /// after the first call.
    pub fn cond(&mut self) -> Result<T, LinalgError> {
        if let Some(c) = self.cond {
            return Ok(c);
        }
        self.decompose()?;
        assert!(
            self.m.is_square(),
            "condition estimate requires a square matrix, got {}x{}",
            self.m.nrows(),
            self.m.ncols(),
        );
        let m = &self.m;
        let r = &self.r;
        let h = &self.h;
        let tol = self.config.tol;
        let est = hager_estimate(
            m.nrows(),
            |b| qr_solve_slice(m, r, h, b, tol),
            |b| qr_trans_solve_slice(m, r, h, b, tol),
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
