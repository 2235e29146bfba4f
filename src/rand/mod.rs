//! Seeded pseudo-random numbers and distribution samplers.
//!
//! [`WichmannHill`] is the AS 183 combined generator (Wichmann & Hill,
//! Applied Statistics 31, 1982): three small linear congruential streams
//! whose fractional sum is uniform on [0, 1). The same seed always
//! reproduces the same stream, which is the point — simulations stay
//! repeatable across runs and platforms.
//!
//! # Samplers
//!
//! | Method | Distribution |
//! |--------|--------------|
//! | [`uniform`](WichmannHill::uniform) | Uniform on [0, 1) |
//! | [`normal`](WichmannHill::normal) | Normal, polar Box–Muller |
//! | [`exponential`](WichmannHill::exponential) | Exponential with given mean |
//! | [`gamma`](WichmannHill::gamma) | Gamma with integer order ≥ 1 |
//! | [`poisson`](WichmannHill::poisson) | Poisson counts |
//! | [`binomial`](WichmannHill::binomial) | Binomial counts |
//!
//! Matrix fill helpers ([`fill_uniform`](WichmannHill::fill_uniform),
//! [`fill_normal`](WichmannHill::fill_normal),
//! [`fill_exponential`](WichmannHill::fill_exponential)) populate an
//! existing [`Matrix`] element by element in column order.
//!
//! The generator also implements [`rand_core::RngCore`] and
//! [`rand_core::SeedableRng`], so it plugs into anything written against
//! the `rand` ecosystem.
//!
//! # Example
//!
//! ```
//! use densemat::rand::WichmannHill;
//! use densemat::Matrix;
//!
//! let mut rng = WichmannHill::new(1, 2, 3).unwrap();
//! let mut m = Matrix::zeros(4, 4, 0.0_f64);
//! rng.fill_uniform(&mut m);
//! assert!((0..4).all(|i| (0.0..1.0).contains(&m[(i, 0)])));
//! ```

use core::fmt;

use rand_core::{impls, RngCore, SeedableRng};

use crate::special::ln_gamma;
use crate::{FloatScalar, Matrix};

/// Errors from generator construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandError {
    /// A seed word fell outside `1..=30000`.
    BadSeed,
}

impl fmt::Display for RandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSeed => write!(f, "seed words must lie in 1..=30000"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RandError {}

const SEED_MAX: i32 = 30000;

/// Wichmann-Hill AS 183 generator with Numerical-Recipes style samplers.
///
/// Holds three 16-bit-range state words and at most one cached normal
/// deviate (the polar method produces them in pairs).
#[derive(Debug, Clone)]
pub struct WichmannHill {
    x: i32,
    y: i32,
    z: i32,
    cached_normal: Option<f64>,
}

impl WichmannHill {
    /// Create a generator from three seed words, each in `1..=30000`.
    pub fn new(x: i32, y: i32, z: i32) -> Result<Self, RandError> {
        let mut rng = WichmannHill {
            x: 1,
            y: 1,
            z: 1,
            cached_normal: None,
        };
        rng.seed(x, y, z)?;
        Ok(rng)
    }

    /// Reseed in place, discarding any cached normal deviate.
    pub fn seed(&mut self, x: i32, y: i32, z: i32) -> Result<(), RandError> {
        let valid = |w: i32| (1..=SEED_MAX).contains(&w);
        if !valid(x) || !valid(y) || !valid(z) {
            return Err(RandError::BadSeed);
        }
        self.x = x;
        self.y = y;
        self.z = z;
        self.cached_normal = None;
        Ok(())
    }

    /// Next uniform deviate on [0, 1).
    ///
    /// Steps the three congruential streams and returns the fractional
    /// part of `x/30269 + y/30307 + z/30323`.
    pub fn uniform(&mut self) -> f64 {
        self.x = 171 * (self.x % 177) - 2 * (self.x / 177);
        if self.x < 0 {
            self.x += 30269;
        }
        self.y = 172 * (self.y % 176) - 35 * (self.y / 176);
        if self.y < 0 {
            self.y += 30307;
        }
        self.z = 170 * (self.z % 178) - 63 * (self.z / 178);
        if self.z < 0 {
            self.z += 30323;
        }
        let r = f64::from(self.x) / 30269.0 + f64::from(self.y) / 30307.0
            + f64::from(self.z) / 30323.0;
        r - r.floor()
    }

    /// Uniform deviate on (0, 1); a zero draw would send the logarithms in
    /// the samplers to infinity.
    fn positive_uniform(&mut self) -> f64 {
        loop {
            let u = self.uniform();
            if u > 0.0 {
                return u;
            }
        }
    }

    /// Normal deviate with the given mean and standard deviation.
    ///
    /// Polar Box–Muller: draws points in the unit disc, converts each
    /// accepted pair into two independent standard normals and caches the
    /// second for the next call.
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        if let Some(d) = self.cached_normal.take() {
            return mean + std * d;
        }
        let (v1, v2, s) = loop {
            let v1 = 2.0 * self.uniform() - 1.0;
            let v2 = 2.0 * self.uniform() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s > 0.0 {
                break (v1, v2, s);
            }
        };
        let f = (-2.0 * s.ln() / s).sqrt();
        self.cached_normal = Some(v2 * f);
        mean + std * v1 * f
    }

    /// Exponential deviate with the given mean: `−mean · ln(U)`.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        -self.positive_uniform().ln() * mean
    }

    /// Gamma deviate of integer `order` (unit scale).
    ///
    /// Below order 6 sums `order` exponential deviates as the negated log
    /// of a product of uniforms; above, Cauchy (tangent) rejection against
    /// the gamma density. See Press et al., ch. 7.
    ///
    /// Panics if `order` is zero.
    pub fn gamma(&mut self, order: u32) -> f64 {
        assert!(order >= 1, "gamma sampler requires order >= 1");
        if order < 6 {
            let mut prod = 1.0;
            for _ in 0..order {
                prod *= self.positive_uniform();
            }
            return -prod.ln();
        }
        let b = f64::from(order) - 1.0;
        let s = (2.0 * b + 1.0).sqrt();
        loop {
            let (t, g) = loop {
                let t = loop {
                    let v1 = 2.0 * self.uniform() - 1.0;
                    let v2 = 2.0 * self.uniform() - 1.0;
                    if v1 * v1 + v2 * v2 <= 1.0 && v1 != 0.0 {
                        break v2 / v1;
                    }
                };
                let g = s * t + b;
                if g > 0.0 {
                    break (t, g);
                }
            };
            let ratio = (1.0 + t * t) * (b * (g / b).ln() - s * t).exp();
            if self.uniform() <= ratio {
                return g;
            }
        }
    }

    /// Poisson count with the given mean, returned as a whole number.
    ///
    /// Direct waiting-time product below mean 12, tangent rejection with a
    /// log-gamma density ratio above.
    pub fn poisson(&mut self, mean: f64) -> f64 {
        if mean < 12.0 {
            let g = (-mean).exp();
            let mut count = -1.0;
            let mut t = 1.0;
            loop {
                count += 1.0;
                t *= self.uniform();
                if t <= g {
                    return count;
                }
            }
        }
        let sq = (2.0 * mean).sqrt();
        let logm = mean.ln();
        let g = mean * logm - ln_gamma_whole(mean + 1.0);
        loop {
            let (y, k) = loop {
                let y = (core::f64::consts::PI * self.uniform()).tan();
                let k = sq * y + mean;
                if k >= 0.0 {
                    break (y, k.floor());
                }
            };
            let test = 0.9 * (1.0 + y * y) * (k * logm - ln_gamma_whole(k + 1.0) - g).exp();
            if self.uniform() <= test {
                return k;
            }
        }
    }

    /// Binomial count for `n` trials at success probability `p`, returned
    /// as a whole number.
    ///
    /// Direct Bernoulli sum below 25 trials, waiting-time product when the
    /// mean count is below 1, tangent rejection otherwise. Probabilities
    /// above ½ are reflected so the rejection constants stay sharp.
    ///
    /// Panics if `n` is zero or `p` lies outside [0, 1].
    pub fn binomial(&mut self, p: f64, n: usize) -> f64 {
        assert!(n >= 1, "binomial sampler requires at least one trial");
        assert!(
            (0.0..=1.0).contains(&p),
            "binomial probability must lie in [0, 1], got {p}",
        );
        let prob = if p <= 0.5 { p } else { 1.0 - p };
        let dn = n as f64;
        let mean = dn * prob;
        let count = if n < 25 {
            let mut c = 0.0;
            for _ in 0..n {
                if self.uniform() < prob {
                    c += 1.0;
                }
            }
            c
        } else if mean < 1.0 {
            // rare successes: count waiting times like the Poisson sampler
            let g = (-mean).exp();
            let mut t = 1.0;
            let mut c: i64 = -1;
            loop {
                c += 1;
                t *= self.uniform();
                if t <= g {
                    break;
                }
            }
            c.min(n as i64) as f64
        } else {
            let q = 1.0 - prob;
            let logp = prob.ln();
            let logq = q.ln();
            let g0 = ln_gamma_whole(dn + 1.0);
            let sq = (2.0 * mean * q).sqrt();
            loop {
                let (y, k) = loop {
                    let y = (core::f64::consts::PI * self.uniform()).tan();
                    let k = sq * y + mean;
                    if k >= 0.0 && k < dn + 1.0 {
                        break (y, k.floor());
                    }
                };
                let test = 1.2
                    * sq
                    * (1.0 + y * y)
                    * (g0 - ln_gamma_whole(k + 1.0) - ln_gamma_whole(dn - k + 1.0)
                        + k * logp
                        + (dn - k) * logq)
                        .exp();
                if self.uniform() <= test {
                    break k;
                }
            }
        };
        if prob != p {
            dn - count
        } else {
            count
        }
    }

    /// Overwrite every element of `m` with a uniform deviate on [0, 1).
    pub fn fill_uniform<T: FloatScalar>(&mut self, m: &mut Matrix<T>) {
        for j in 0..m.ncols() {
            for i in 0..m.nrows() {
                m[(i, j)] = T::constant(self.uniform());
            }
        }
    }

    /// Overwrite every element of `m` with a normal deviate.
    pub fn fill_normal<T: FloatScalar>(&mut self, m: &mut Matrix<T>, mean: T, std: T) {
        for j in 0..m.ncols() {
            for i in 0..m.nrows() {
                m[(i, j)] = mean + std * T::constant(self.normal(0.0, 1.0));
            }
        }
    }

    /// Overwrite every element of `m` with an exponential deviate.
    pub fn fill_exponential<T: FloatScalar>(&mut self, m: &mut Matrix<T>, mean: T) {
        for j in 0..m.ncols() {
            for i in 0..m.nrows() {
                m[(i, j)] = mean * T::constant(self.exponential(1.0));
            }
        }
    }
}

/// Log-gamma for sampler densities. The argument is always at least 1
/// there, so the domain error cannot occur.
fn ln_gamma_whole(x: f64) -> f64 {
    ln_gamma(x).unwrap_or(f64::INFINITY)
}

impl RngCore for WichmannHill {
    fn next_u32(&mut self) -> u32 {
        // the uniform never reaches 1.0, so the product stays below 2^32
        (self.uniform() * 4294967296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for WichmannHill {
    type Seed = [u8; 16];

    /// Folds the byte seed into the three state words; the fourth word is
    /// mixed into the first so every seed byte matters.
    fn from_seed(seed: Self::Seed) -> Self {
        let word = |i: usize| {
            u32::from_le_bytes([seed[4 * i], seed[4 * i + 1], seed[4 * i + 2], seed[4 * i + 3]])
        };
        let fold = |w: u32| (w % SEED_MAX as u32) as i32 + 1;
        WichmannHill {
            x: fold(word(0) ^ word(3)),
            y: fold(word(1)),
            z: fold(word(2)),
            cached_normal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_draw_matches_hand_stepped_state() {
        // One step from (1, 2, 3): x = 171, y = 344, z = 510.
        let mut rng = WichmannHill::new(1, 2, 3).unwrap();
        let expected = {
            let r: f64 = 171.0 / 30269.0 + 344.0 / 30307.0 + 510.0 / 30323.0;
            r - r.floor()
        };
        assert_eq!(rng.uniform(), expected);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = WichmannHill::new(17, 4021, 299).unwrap();
        let mut b = WichmannHill::new(17, 4021, 299).unwrap();
        for _ in 0..200 {
            assert_eq!(a.uniform(), b.uniform());
        }
        let mut c = WichmannHill::new(18, 4021, 299).unwrap();
        assert_ne!(a.uniform(), c.uniform());
    }

    #[test]
    fn seed_bounds_are_enforced() {
        assert_eq!(WichmannHill::new(0, 1, 1).unwrap_err(), RandError::BadSeed);
        assert_eq!(
            WichmannHill::new(1, 30001, 1).unwrap_err(),
            RandError::BadSeed
        );
        assert!(WichmannHill::new(1, 30000, 1).is_ok());
    }

    #[test]
    fn reseed_discards_cached_normal() {
        let mut rng = WichmannHill::new(5, 6, 7).unwrap();
        let _ = rng.normal(0.0, 1.0); // leaves one deviate cached
        rng.seed(5, 6, 7).unwrap();
        let mut fresh = WichmannHill::new(5, 6, 7).unwrap();
        assert_eq!(rng.normal(0.0, 1.0), fresh.normal(0.0, 1.0));
    }

    #[test]
    fn uniform_range_and_moments() {
        let mut rng = WichmannHill::new(101, 202, 303).unwrap();
        let n = 5000;
        let mut sum = 0.0;
        let mut sumsq = 0.0;
        for _ in 0..n {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
            sum += u;
            sumsq += u * u;
        }
        let mean = sum / n as f64;
        let var = sumsq / n as f64 - mean * mean;
        assert!((mean - 0.5).abs() < 0.02);
        assert!((var - 1.0 / 12.0).abs() < 0.01);
    }

    #[test]
    fn normal_moments() {
        let mut rng = WichmannHill::new(11, 22, 33).unwrap();
        let n = 4000;
        let mut sum = 0.0;
        let mut sumsq = 0.0;
        for _ in 0..n {
            let d = rng.normal(2.0, 3.0);
            sum += d;
            sumsq += (d - 2.0) * (d - 2.0);
        }
        assert!((sum / n as f64 - 2.0).abs() < 0.2);
        assert!((sumsq / n as f64 - 9.0).abs() < 0.6);
    }

    #[test]
    fn exponential_mean() {
        let mut rng = WichmannHill::new(7, 8, 9).unwrap();
        let n = 5000;
        let sum: f64 = (0..n).map(|_| rng.exponential(4.0)).sum();
        assert!((sum / n as f64 - 4.0).abs() < 0.25);
    }

    #[test]
    fn gamma_means_both_branches() {
        let mut rng = WichmannHill::new(1234, 5678, 910).unwrap();
        let n = 4000;
        // product branch
        let sum3: f64 = (0..n).map(|_| rng.gamma(3)).sum();
        assert!((sum3 / n as f64 - 3.0).abs() < 0.15);
        // rejection branch
        let sum8: f64 = (0..n).map(|_| rng.gamma(8)).sum();
        assert!((sum8 / n as f64 - 8.0).abs() < 0.3);
    }

    #[test]
    fn poisson_means_both_branches() {
        let mut rng = WichmannHill::new(31, 41, 59).unwrap();
        let n = 4000;
        let mut sum = 0.0;
        for _ in 0..n {
            let k = rng.poisson(4.0);
            assert!(k >= 0.0 && k == k.floor());
            sum += k;
        }
        assert!((sum / n as f64 - 4.0).abs() < 0.25);
        let sum20: f64 = (0..n).map(|_| rng.poisson(20.0)).sum();
        assert!((sum20 / n as f64 - 20.0).abs() < 0.6);
    }

    #[test]
    fn binomial_means_all_branches() {
        let mut rng = WichmannHill::new(271, 828, 182).unwrap();
        let n = 4000;
        // direct sum (n < 25)
        let direct: f64 = (0..n).map(|_| rng.binomial(0.3, 10)).sum();
        assert!((direct / n as f64 - 3.0).abs() < 0.15);
        // waiting time (mean < 1)
        let waiting: f64 = (0..n).map(|_| rng.binomial(0.02, 30)).sum();
        assert!((waiting / n as f64 - 0.6).abs() < 0.1);
        // rejection, with reflection of p > 1/2
        let mut sum = 0.0;
        for _ in 0..n {
            let k = rng.binomial(0.7, 40);
            assert!((0.0..=40.0).contains(&k) && k == k.floor());
            sum += k;
        }
        assert!((sum / n as f64 - 28.0).abs() < 0.4);
    }

    #[test]
    fn fill_helpers_cover_matrix() {
        let mut rng = WichmannHill::new(3, 1, 4).unwrap();
        let mut u = Matrix::zeros(5, 3, 0.0_f64);
        rng.fill_uniform(&mut u);
        for j in 0..3 {
            for i in 0..5 {
                assert!((0.0..1.0).contains(&u[(i, j)]));
            }
        }
        let mut e = Matrix::zeros(4, 4, 0.0_f64);
        rng.fill_exponential(&mut e, 2.0);
        for j in 0..4 {
            for i in 0..4 {
                assert!(e[(i, j)] >= 0.0);
            }
        }
    }

    #[test]
    fn rng_core_integration() {
        let mut rng = WichmannHill::new(9, 9, 9).unwrap();
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
        let mut bytes = [0u8; 13];
        rng.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&x| x != 0));

        let seeded = WichmannHill::from_seed([7; 16]);
        let mut s1 = seeded.clone();
        let mut s2 = seeded;
        assert_eq!(s1.uniform(), s2.uniform());
    }
}
