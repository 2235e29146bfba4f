//! Numeric configuration passed explicitly into decompositions and
//! regressions.
//!
//! There is no process-wide default store; callers construct a [`Config`]
//! (usually `Config::default()`) and hand it to the operations that need a
//! pivot tolerance or an iteration budget.

use crate::FloatScalar;

/// Tunable numeric parameters.
///
/// # Example
///
/// ```
/// use densemat::Config;
///
/// let cfg = Config::<f64>::default();
/// assert!(cfg.tol > 0.0);
/// let loose = Config { tol: 1e-8, ..Config::default() };
/// assert_eq!(loose.hager_iters, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config<T> {
    /// Pivot tolerance: a diagonal or scaling magnitude below this value is
    /// treated as zero by the factorization kernels.
    pub tol: T,
    /// Iteration budget for Hager's condition estimator.
    pub hager_iters: usize,
}

impl<T: FloatScalar> Default for Config<T> {
    fn default() -> Self {
        // A small multiple of machine epsilon keeps the tolerance
        // proportional to the working precision.
        Config {
            tol: T::epsilon() * T::constant(1.0e2),
            hager_iters: 5,
        }
    }
}
