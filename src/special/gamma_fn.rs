//! Log-gamma and log-beta functions.

use super::SpecialError;
use crate::FloatScalar;

/// Series coefficients for the log-gamma approximation (Press et al.).
const LN_GAMMA_COEFFS: [f64; 6] = [
    76.18009173,
    -86.50532033,
    24.01409822,
    -1.231739516,
    0.120858003e-2,
    -0.536382e-5,
];

/// Natural logarithm of the gamma function, ln Γ(x).
///
/// Uses a six-term rational series for x ≥ 1 and the reflection formula
/// `Γ(x)Γ(1−x) = π / sin(πx)` below. Requires x > 0.
///
/// # Example
///
/// ```
/// use densemat::special::ln_gamma;
///
/// // ln Γ(5) = ln 4!
/// assert!((ln_gamma(5.0_f64).unwrap() - 24.0_f64.ln()).abs() < 1e-9);
///
/// // ln Γ(1/2) = ln √π
/// let ln_sqrt_pi = 0.5 * core::f64::consts::PI.ln();
/// assert!((ln_gamma(0.5_f64).unwrap() - ln_sqrt_pi).abs() < 1e-9);
/// ```
pub fn ln_gamma<T: FloatScalar>(r: T) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();
    if r <= zero {
        return Err(SpecialError::DomainError);
    }
    if r == one {
        return Ok(zero);
    }
    let mut x = if r < one { one - r } else { r - one };
    let mut tmp = x + T::constant(5.5);
    tmp = tmp - (x + T::constant(0.5)) * tmp.ln();
    let mut ser = one;
    for &c in LN_GAMMA_COEFFS.iter() {
        x = x + one;
        ser = ser + T::constant(c) / x;
    }
    let ser = -tmp + (T::constant(2.50662827465) * ser).ln();
    if r > one {
        Ok(ser)
    } else {
        let pix = T::constant(core::f64::consts::PI) * (one - r);
        Ok((pix / pix.sin()).ln() - ser)
    }
}

/// Log-beta function ln B(z, w) = ln Γ(z) + ln Γ(w) − ln Γ(z+w).
///
/// Requires z > 0 and w > 0.
pub fn ln_beta<T: FloatScalar>(z: T, w: T) -> Result<T, SpecialError> {
    Ok(ln_gamma(z)? + ln_gamma(w)? - ln_gamma(z + w)?)
}
