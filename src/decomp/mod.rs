//! Decomposition wrappers with lazy factorization and cached diagnostics.
//!
//! Each wrapper ([`LuDec`], [`CholeskyDec`], [`QrDec`], [`SvdDec`]) snapshots
//! a matrix at construction and factors it on the first call that needs the
//! factorization. The determinant (as a scaled [`Det`]) and the condition
//! estimate are computed once and cached. A kernel error becomes the
//! wrapper's sticky fault: every later accessor returns the same error until
//! [`assign`](LuDec::assign) replaces the matrix.
//!
//! | Type | Factorization | Condition estimate |
//! |------|---------------|--------------------|
//! | [`LuDec`] | Crout LU with partial pivoting | Hager, 1-norm |
//! | [`CholeskyDec`] | `G·Gᵀ`, SPD only | Hager, 1-norm |
//! | [`QrDec`] | Householder QR | Hager, 1-norm (square) |
//! | [`SvdDec`] | Golub-Reinsch SVD | `S_max / S_min` |

use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::inner;
use crate::traits::FloatScalar;

mod cholesky;
mod lu;
mod qr;
mod svd;

pub use cholesky::CholeskyDec;
pub use lu::LuDec;
pub use qr::QrDec;
pub use svd::SvdDec;

/// Determinant as a mantissa and a base-2 exponent, so that determinants of
/// large or badly scaled matrices neither overflow nor underflow.
///
/// The mantissa is kept in `[1/16, 1)` by magnitude (zero for a singular
/// matrix) and the exponent moves in steps of 4 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Det<T> {
    /// Mantissa; carries the sign.
    pub mantissa: T,
    /// Base-2 exponent.
    pub exponent: i32,
}

impl<T: FloatScalar> Det<T> {
    /// The determinant as a plain value: `mantissa * 2^exponent`.
    ///
    /// May overflow to infinity for extreme exponents; the split form is the
    /// lossless representation.
    pub fn value(&self) -> T {
        self.mantissa * T::constant(2.0).powi(self.exponent)
    }

    /// True if the determinant is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == T::zero()
    }

    /// Square the determinant, renormalizing the mantissa.
    pub fn square(self) -> Det<T> {
        let mut d = Det {
            mantissa: self.mantissa * self.mantissa,
            exponent: 2 * self.exponent,
        };
        d.normalize();
        d
    }

    fn normalize(&mut self) {
        if self.mantissa == T::zero() {
            self.exponent = 0;
            return;
        }
        let sixteenth = T::constant(0.0625);
        let sixteen = T::constant(16.0);
        while self.mantissa.abs() > T::one() {
            self.mantissa = self.mantissa * sixteenth;
            self.exponent += 4;
        }
        while self.mantissa.abs() < sixteenth {
            self.mantissa = self.mantissa * sixteen;
            self.exponent -= 4;
        }
    }
}

/// Scaled product of a set of elements, after Bowler, Martin, Peters and
/// Wilkinson. Applied to the diagonal of a triangular factor this is the
/// determinant. Any element with magnitude at or below `tol` zeroes the
/// whole product.
pub(crate) fn scaled_product<T: FloatScalar>(
    elems: impl IntoIterator<Item = T>,
    tol: T,
) -> Det<T> {
    let mut d = Det {
        mantissa: T::one(),
        exponent: 0,
    };
    for x in elems {
        if x.abs() <= tol {
            return Det {
                mantissa: T::zero(),
                exponent: 0,
            };
        }
        d.mantissa = d.mantissa * x;
        d.normalize();
    }
    d
}

/// Hager's convex-optimization estimate of `‖A⁻¹‖₁`, given solve and
/// transpose-solve callbacks over the factored matrix. See Applied
/// Numerical Linear Algebra p. 139 and SIAM J. Sci. Stat. Comp. 1984,
/// pp. 311-316.
///
/// Returns [`LinalgError::ConvergenceFailure`] if the iteration budget is
/// exhausted before the estimate settles.
pub(crate) fn hager_estimate<T, S, R>(
    n: usize,
    mut solve: S,
    mut trans_solve: R,
    budget: usize,
) -> Result<T, LinalgError>
where
    T: FloatScalar,
    S: FnMut(&mut [T]) -> Result<(), LinalgError>,
    R: FnMut(&mut [T]) -> Result<(), LinalgError>,
{
    if n == 0 {
        return Ok(T::zero());
    }
    let mut b = vec![T::one() / T::count(n); n];
    let mut inv_norm1 = T::zero();
    let mut iter = budget;
    loop {
        let mut y = b.clone();
        solve(&mut y)?;
        let ynorm1 = y.iter().fold(T::zero(), |s, &v| s + v.abs());
        let stop;
        if ynorm1 <= inv_norm1 {
            stop = true;
        } else {
            inv_norm1 = ynorm1;
            let mut z: Vec<T> = y
                .iter()
                .map(|&v| if v >= T::zero() { T::one() } else { -T::one() })
                .collect();
            trans_solve(&mut z)?;
            let mut imax = 0;
            let mut maxz = z[0].abs();
            for (i, &v) in z.iter().enumerate().skip(1) {
                if v.abs() > maxz {
                    maxz = v.abs();
                    imax = i;
                }
            }
            stop = maxz <= inner(&b, &z);
            if !stop {
                for v in b.iter_mut() {
                    *v = T::zero();
                }
                b[imax] = T::one();
            }
        }
        iter -= 1;
        if stop {
            return Ok(inv_norm1);
        }
        if iter == 0 {
            return Err(LinalgError::ConvergenceFailure);
        }
    }
}
