//! Borrowed sub-block views.
//!
//! A view aliases a rectangular block of a parent [`Matrix`] without copying.
//! The borrow ties the view to the parent, so mutating the parent while a
//! view is live is a compile error, and a mutable view has exclusive access
//! for its whole lifetime.

use crate::traits::{MatrixMut, MatrixRef};

use super::Matrix;

/// Immutable view of a rectangular sub-block.
///
/// Created by [`Matrix::view`]. Implements [`MatrixRef`], so kernels that
/// read a matrix accept a view in place of an owned matrix.
///
/// ```
/// use densemat::{Matrix, MatrixRef};
///
/// let m = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
/// let v = m.view(1, 1, 2, 2);
/// assert_eq!(*v.get(0, 0), 5.0);
/// assert_eq!(*v.get(1, 1), 9.0);
/// ```
pub struct MatrixView<'a, T> {
    parent: &'a Matrix<T>,
    row0: usize,
    col0: usize,
    nrows: usize,
    ncols: usize,
}

/// Mutable view of a rectangular sub-block.
///
/// Created by [`Matrix::view_mut`]. Writes go straight through to the parent.
///
/// ```
/// use densemat::{Matrix, MatrixMut};
///
/// let mut m = Matrix::zeros(3, 3, 0.0_f64);
/// {
///     let mut v = m.view_mut(1, 1, 2, 2);
///     *v.get_mut(0, 0) = 5.0;
/// }
/// assert_eq!(m[(1, 1)], 5.0);
/// ```
pub struct MatrixViewMut<'a, T> {
    parent: &'a mut Matrix<T>,
    row0: usize,
    col0: usize,
    nrows: usize,
    ncols: usize,
}

impl<T> Matrix<T> {
    /// Immutable view of the block starting at `(row0, col0)` spanning
    /// `nrows x ncols`.
    ///
    /// Panics if the block exceeds the matrix bounds.
    pub fn view(&self, row0: usize, col0: usize, nrows: usize, ncols: usize) -> MatrixView<'_, T> {
        assert!(
            row0 + nrows <= self.nrows && col0 + ncols <= self.ncols,
            "view {}x{} at ({}, {}) exceeds {}x{} matrix",
            nrows, ncols, row0, col0, self.nrows, self.ncols,
        );
        MatrixView {
            parent: self,
            row0,
            col0,
            nrows,
            ncols,
        }
    }

    /// Mutable view of the block starting at `(row0, col0)` spanning
    /// `nrows x ncols`.
    ///
    /// Panics if the block exceeds the matrix bounds.
    pub fn view_mut(
        &mut self,
        row0: usize,
        col0: usize,
        nrows: usize,
        ncols: usize,
    ) -> MatrixViewMut<'_, T> {
        assert!(
            row0 + nrows <= self.nrows && col0 + ncols <= self.ncols,
            "view {}x{} at ({}, {}) exceeds {}x{} matrix",
            nrows, ncols, row0, col0, self.nrows, self.ncols,
        );
        MatrixViewMut {
            parent: self,
            row0,
            col0,
            nrows,
            ncols,
        }
    }

    /// Immutable view of a whole column.
    pub fn col_view(&self, col: usize) -> MatrixView<'_, T> {
        self.view(0, col, self.nrows, 1)
    }

    /// Mutable view of a whole column.
    pub fn col_view_mut(&mut self, col: usize) -> MatrixViewMut<'_, T> {
        let nrows = self.nrows;
        self.view_mut(0, col, nrows, 1)
    }
}

impl<T> MatrixRef<T> for MatrixView<'_, T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        debug_assert!(row < self.nrows && col < self.ncols);
        self.parent.get(self.row0 + row, self.col0 + col)
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        // A view column is a contiguous run of the parent column.
        let pcol = self.col0 + col;
        let start = pcol * self.parent.nrows + self.row0 + row_start;
        let end = pcol * self.parent.nrows + self.row0 + self.nrows;
        &self.parent.data[start..end]
    }
}

impl<T> MatrixRef<T> for MatrixViewMut<'_, T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        debug_assert!(row < self.nrows && col < self.ncols);
        self.parent.get(self.row0 + row, self.col0 + col)
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        let pcol = self.col0 + col;
        let start = pcol * self.parent.nrows + self.row0 + row_start;
        let end = pcol * self.parent.nrows + self.row0 + self.nrows;
        &self.parent.data[start..end]
    }
}

impl<T> MatrixMut<T> for MatrixViewMut<'_, T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert!(row < self.nrows && col < self.ncols);
        self.parent.get_mut(self.row0 + row, self.col0 + col)
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let pcol = self.col0 + col;
        let start = pcol * self.parent.nrows + self.row0 + row_start;
        let end = pcol * self.parent.nrows + self.row0 + self.nrows;
        &mut self.parent.data[start..end]
    }
}
