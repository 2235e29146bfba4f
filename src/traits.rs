use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by operations that need `sqrt`, `abs`, `ln`, etc.
/// (decompositions, norms, the special functions). Covers `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {
    /// Lossy conversion from `f64`, for algorithm constants.
    ///
    /// Every constant used by the algorithms in this crate is exactly
    /// representable or safely truncatable in `f32`, so the conversion
    /// cannot fail for the types implementing this trait.
    fn constant(c: f64) -> Self;

    /// Lossy conversion from `usize`, for counts entering arithmetic.
    fn count(n: usize) -> Self;
}

impl FloatScalar for f32 {
    #[inline]
    fn constant(c: f64) -> f32 {
        c as f32
    }

    #[inline]
    fn count(n: usize) -> f32 {
        n as f32
    }
}

impl FloatScalar for f64 {
    #[inline]
    fn constant(c: f64) -> f64 {
        c
    }

    #[inline]
    fn count(n: usize) -> f64 {
        n as f64
    }
}

/// Read-only access to a matrix-like type.
///
/// This trait lets the factorization kernels operate generically over
/// owned matrices and borrowed views alike.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Contiguous slice of column `col` from `row_start` to the bottom.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (Cholesky, LU, QR, SVD) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Mutable slice of column `col` from `row_start` to the bottom.
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
