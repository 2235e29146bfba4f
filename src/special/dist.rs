//! Distribution CDFs built on the incomplete gamma and beta integrals.

use super::betainc::inc_beta;
use super::incgamma::inc_gamma;
use super::SpecialError;
use crate::FloatScalar;

/// Chi-squared CDF with `dof` degrees of freedom: `P(dof/2, x/2)`.
pub fn chi2_cdf<T: FloatScalar>(x: T, dof: usize) -> Result<T, SpecialError> {
    let half = T::constant(0.5);
    inc_gamma(half * T::count(dof), half * x)
}

/// Student t CDF with `dof` degrees of freedom.
///
/// Splits at t = 0 and evaluates the half-tail
/// `½ I_{d/(d+t²)}(d/2, ½)` on the appropriate side.
pub fn student_cdf<T: FloatScalar>(t: T, dof: usize) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let half = T::constant(0.5);
    if t == zero {
        return Ok(half);
    }
    let d = T::count(dof);
    let a = half * inc_beta(d / (d + t * t), half * d, half)?;
    Ok(if t > zero { one - a } else { a })
}

/// F distribution CDF with `dof1` numerator and `dof2` denominator degrees
/// of freedom: `1 − I_{d2/(d2+d1·x)}(d2/2, d1/2)`. Requires x ≥ 0.
pub fn f_cdf<T: FloatScalar>(x: T, dof1: usize, dof2: usize) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let half = T::constant(0.5);
    if x < zero {
        return Err(SpecialError::DomainError);
    }
    let d1 = T::count(dof1);
    let d2 = T::count(dof2);
    Ok(one - inc_beta(d2 / (d2 + d1 * x), half * d2, half * d1)?)
}

/// Poisson tail probability `1 − P(mean, k)`; for an integer `mean` this
/// is the chance of fewer than `mean` events at rate `k`.
pub fn poisson_cdf<T: FloatScalar>(k: T, mean: T) -> Result<T, SpecialError> {
    Ok(T::one() - inc_gamma(mean, k)?)
}
