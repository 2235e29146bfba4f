//! Row and column reductions.
//!
//! All reductions return one value per column (or per row), as a `Vec`,
//! in index order.

use alloc::vec::Vec;

use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Sum of each column.
    pub fn col_sum(&self) -> Vec<T> {
        (0..self.ncols)
            .map(|j| {
                let mut s = T::zero();
                for i in 0..self.nrows {
                    s = s + self[(i, j)];
                }
                s
            })
            .collect()
    }

    /// Sum of squares of each column (about zero, not the mean).
    pub fn col_sumsq(&self) -> Vec<T> {
        (0..self.ncols)
            .map(|j| {
                let mut s = T::zero();
                for i in 0..self.nrows {
                    let x = self[(i, j)];
                    s = s + x * x;
                }
                s
            })
            .collect()
    }

    /// Sum of each row.
    pub fn row_sum(&self) -> Vec<T> {
        let mut out = Vec::new();
        out.resize(self.nrows, T::zero());
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                out[i] = out[i] + self[(i, j)];
            }
        }
        out
    }

    /// Sum of squares of each row.
    pub fn row_sumsq(&self) -> Vec<T> {
        let mut out = Vec::new();
        out.resize(self.nrows, T::zero());
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                let x = self[(i, j)];
                out[i] = out[i] + x * x;
            }
        }
        out
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Mean of each column.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 10.0, 3.0, 20.0]);
    /// assert_eq!(m.col_mean(), vec![2.0, 15.0]);
    /// ```
    pub fn col_mean(&self) -> Vec<T> {
        let n = T::count(self.nrows);
        self.col_sum().into_iter().map(|s| s / n).collect()
    }

    /// Mean of each row.
    pub fn row_mean(&self) -> Vec<T> {
        let n = T::count(self.ncols);
        self.row_sum().into_iter().map(|s| s / n).collect()
    }

    /// Sum of squared deviations from the column mean, per column.
    pub fn col_sumsq_dev(&self) -> Vec<T> {
        let means = self.col_mean();
        (0..self.ncols)
            .map(|j| {
                let mut s = T::zero();
                for i in 0..self.nrows {
                    let d = self[(i, j)] - means[j];
                    s = s + d * d;
                }
                s
            })
            .collect()
    }

    /// Minimum of each column.
    pub fn col_min(&self) -> Vec<T> {
        (0..self.ncols)
            .map(|j| {
                let mut m = self[(0, j)];
                for i in 1..self.nrows {
                    if self[(i, j)] < m {
                        m = self[(i, j)];
                    }
                }
                m
            })
            .collect()
    }

    /// Maximum of each column.
    pub fn col_max(&self) -> Vec<T> {
        (0..self.ncols)
            .map(|j| {
                let mut m = self[(0, j)];
                for i in 1..self.nrows {
                    if self[(i, j)] > m {
                        m = self[(i, j)];
                    }
                }
                m
            })
            .collect()
    }

    /// Maximum absolute value of each column.
    pub fn col_abs_max(&self) -> Vec<T> {
        (0..self.ncols)
            .map(|j| {
                let mut m = self[(0, j)].abs();
                for i in 1..self.nrows {
                    let a = self[(i, j)].abs();
                    if a > m {
                        m = a;
                    }
                }
                m
            })
            .collect()
    }

    /// Maximum absolute value of each row.
    pub fn row_abs_max(&self) -> Vec<T> {
        let mut out = Vec::new();
        for i in 0..self.nrows {
            let mut m = self[(i, 0)].abs();
            for j in 1..self.ncols {
                let a = self[(i, j)].abs();
                if a > m {
                    m = a;
                }
            }
            out.push(m);
        }
        out
    }
}
