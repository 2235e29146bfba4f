//! Matrix norms and vector inner product.

use crate::traits::FloatScalar;

use super::Matrix;

impl<T: FloatScalar> Matrix<T> {
    /// 1-norm: maximum absolute column sum.
    ///
    /// This is the norm Hager's condition estimator works in.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, -7.0, 3.0, 2.0]);
    /// assert_eq!(m.norm1(), 9.0);
    /// ```
    pub fn norm1(&self) -> T {
        let mut max = T::zero();
        for j in 0..self.ncols {
            let mut s = T::zero();
            for i in 0..self.nrows {
                s = s + self[(i, j)].abs();
            }
            if s > max {
                max = s;
            }
        }
        max
    }

    /// Infinity norm: maximum absolute row sum.
    pub fn norm_inf(&self) -> T {
        let mut max = T::zero();
        for i in 0..self.nrows {
            let mut s = T::zero();
            for j in 0..self.ncols {
                s = s + self[(i, j)].abs();
            }
            if s > max {
                max = s;
            }
        }
        max
    }

    /// Frobenius norm: square root of the sum of squared elements.
    pub fn frobenius(&self) -> T {
        let mut s = T::zero();
        for &x in self.data.iter() {
            s = s + x * x;
        }
        s.sqrt()
    }
}

/// Accumulate `y += a·x` over two equal-length slices.
///
/// ```
/// use densemat::matrix::linear;
/// let mut y = [1.0, 1.0];
/// linear(2.0, &[3.0, -1.0], &mut y);
/// assert_eq!(y, [7.0, -1.0]);
/// ```
pub fn linear<T: FloatScalar>(a: T, x: &[T], y: &mut [T]) {
    assert_eq!(
        x.len(),
        y.len(),
        "length mismatch: {} vs {}",
        x.len(),
        y.len(),
    );
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi = *yi + a * xi;
    }
}

/// Dot product of two equal-length slices.
///
/// ```
/// use densemat::matrix::inner;
/// assert_eq!(inner(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
pub fn inner<T: FloatScalar>(a: &[T], b: &[T]) -> T {
    assert_eq!(
        a.len(),
        b.len(),
        "length mismatch: {} vs {}",
        a.len(),
        b.len(),
    );
    let mut s = T::zero();
    for (&x, &y) in a.iter().zip(b.iter()) {
        s = s + x * y;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norms() {
        let m = Matrix::from_rows(2, 2, &[3.0, -4.0, 0.0, 0.0]);
        assert_eq!(m.norm1(), 4.0);
        assert_eq!(m.norm_inf(), 7.0);
        assert_eq!(m.frobenius(), 5.0);
    }

    #[test]
    fn identity_norms() {
        let id = Matrix::eye(4, 0.0_f64);
        assert_eq!(id.norm1(), 1.0);
        assert_eq!(id.norm_inf(), 1.0);
        assert_eq!(id.frobenius(), 2.0);
    }

    #[test]
    fn inner_product() {
        assert_eq!(inner(&[1.0, -1.0], &[2.0, 2.0]), 0.0);
    }

    #[test]
    fn linear_accumulates_axpy() {
        let mut y = [1.0, 2.0, 3.0];
        linear(-1.0, &[1.0, 1.0, 1.0], &mut y);
        assert_eq!(y, [0.0, 1.0, 2.0]);
    }
}
