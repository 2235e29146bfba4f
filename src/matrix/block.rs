//! Block extraction, concatenation, and the Kronecker product.

use crate::traits::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Copy of the block starting at `(row0, col0)` spanning `nrows x ncols`.
    ///
    /// Panics if the block exceeds the matrix bounds. For a zero-copy alias
    /// use [`Matrix::view`].
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    /// let s = m.sub(0, 1, 2, 2);
    /// assert_eq!(s, Matrix::from_rows(2, 2, &[2.0, 3.0, 5.0, 6.0]));
    /// ```
    pub fn sub(&self, row0: usize, col0: usize, nrows: usize, ncols: usize) -> Self {
        assert!(
            row0 + nrows <= self.nrows && col0 + ncols <= self.ncols,
            "block {}x{} at ({}, {}) exceeds {}x{} matrix",
            nrows, ncols, row0, col0, self.nrows, self.ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| self[(row0 + i, col0 + j)])
    }

    /// Copy of column `col` as an `nrows x 1` matrix.
    pub fn col(&self, col: usize) -> Self {
        self.sub(0, col, self.nrows, 1)
    }

    /// Copy of row `row` as a `1 x ncols` matrix.
    pub fn row(&self, row: usize) -> Self {
        self.sub(row, 0, 1, self.ncols)
    }

    /// Overwrite the block starting at `(row0, col0)` with `src`.
    ///
    /// Panics if `src` does not fit.
    pub fn set_sub(&mut self, row0: usize, col0: usize, src: &Self) {
        assert!(
            row0 + src.nrows <= self.nrows && col0 + src.ncols <= self.ncols,
            "block {}x{} at ({}, {}) exceeds {}x{} matrix",
            src.nrows, src.ncols, row0, col0, self.nrows, self.ncols,
        );
        for j in 0..src.ncols {
            for i in 0..src.nrows {
                self[(row0 + i, col0 + j)] = src[(i, j)];
            }
        }
    }

    /// Horizontal concatenation `[self | rhs]`.
    ///
    /// Panics unless the row counts match.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::fill(2, 1, 1.0);
    /// let b = Matrix::fill(2, 2, 2.0);
    /// let c = a.hcat(&b);
    /// assert_eq!((c.nrows(), c.ncols()), (2, 3));
    /// assert_eq!(c[(1, 0)], 1.0);
    /// assert_eq!(c[(0, 2)], 2.0);
    /// ```
    pub fn hcat(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.nrows, rhs.nrows,
            "dimension mismatch: {}x{} | {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Self::from_fn(self.nrows, self.ncols + rhs.ncols, |i, j| {
            if j < self.ncols {
                self[(i, j)]
            } else {
                rhs[(i, j - self.ncols)]
            }
        })
    }

    /// Vertical concatenation, `rhs` stacked below `self`.
    ///
    /// Panics unless the column counts match.
    pub fn vcat(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.ncols, rhs.ncols,
            "dimension mismatch: {}x{} stacked on {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Self::from_fn(self.nrows + rhs.nrows, self.ncols, |i, j| {
            if i < self.nrows {
                self[(i, j)]
            } else {
                rhs[(i - self.nrows, j)]
            }
        })
    }

    /// Kronecker product `self ⊗ rhs`.
    ///
    /// The result is `(m·p) x (n·q)` for an `m x n` self and `p x q` rhs;
    /// block `(i, j)` is `self[(i, j)] * rhs`. Transposed variants compose
    /// with [`Matrix::transpose`].
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::from_rows(1, 2, &[1.0, 2.0]);
    /// let b = Matrix::from_rows(2, 1, &[3.0, 4.0]);
    /// let k = a.kron(&b);
    /// assert_eq!(k, Matrix::from_rows(2, 2, &[3.0, 6.0, 4.0, 8.0]));
    /// ```
    pub fn kron(&self, rhs: &Self) -> Self {
        let (xr, xc) = (self.nrows, self.ncols);
        let (yr, yc) = (rhs.nrows, rhs.ncols);
        let mut z = Self::zeros(xr * yr, xc * yc, T::zero());
        for xj in 0..xc {
            for xi in 0..xr {
                let r = self[(xi, xj)];
                for yj in 0..yc {
                    for yi in 0..yr {
                        z[(xi * yr + yi, xj * yc + yj)] = r * rhs[(yi, yj)];
                    }
                }
            }
        }
        z
    }
}
