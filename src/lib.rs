//! # densemat
//!
//! Dense column-major matrix library in pure Rust, no-std compatible
//! (requires `alloc`). Double- or single-precision factorizations, least
//! squares regression, and the statistical special functions that turn
//! regression output into inference.
//!
//! ## Quick start
//!
//! ```
//! use densemat::{Config, LuDec, Matrix};
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let mut lu = LuDec::new(&a, Config::default());
//! let x = lu.solve(&[8.0, -11.0, -3.0]).unwrap(); // x = [2, 3, -1]
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated `Matrix<T>` with runtime dimensions and
//!   column-major `Vec<T>` storage. Arithmetic, indexing, block operations,
//!   column/row reductions, norms, sorting, and borrow-checked views.
//!
//! - [`linalg`] — In-place factorization kernels: Crout LU with implicit
//!   row scaling, Cholesky, Householder QR, and Golub-Reinsch SVD, plus
//!   the triangular solves and reflector applications built on them. Free
//!   functions over `&mut impl MatrixMut<T>`.
//!
//! - [`decomp`] — Lazy wrapper structs ([`LuDec`], [`CholeskyDec`],
//!   [`QrDec`], [`SvdDec`]) that snapshot a matrix and factor on first
//!   use. Each provides `solve`, `trans_solve`, `multi_solve`, `inverse`,
//!   an overflow-safe [`Det`] determinant, and a condition number
//!   (Hager's 1-norm estimate, exact for the SVD).
//!
//! - [`ols`] — Ordinary least squares through three interchangeable
//!   engines ([`OlsChol`], [`OlsQr`], [`OlsSvd`]) sharing one statistical
//!   surface: coefficients, standard errors, R², Durbin-Watson, t- and
//!   F-tests of linear restrictions.
//!
//! - [`special`] — Log-gamma family, regularized incomplete beta/gamma,
//!   AS 66 normal CDF and AS 241 quantile, and the chi-squared, Student t,
//!   F, and Poisson CDFs built on them.
//!
//! - [`rand`] — Seeded Wichmann-Hill (AS 183) generator with normal,
//!   exponential, gamma, Poisson, and binomial samplers; implements
//!   `rand_core::RngCore` / `SeedableRng`.
//!
//! - [`traits`] — [`Scalar`] for all element types, [`FloatScalar`] for
//!   real floats, and [`MatrixRef`] / [`MatrixMut`] for generic access
//!   from the kernels.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Implies `alloc`; `std::error::Error` impls, system libm |
//! | `alloc` | via std | Heap storage for `Matrix<T>` on no-std targets |
//! | `libm`  | no      | Pure-Rust software float fallback for no-std |
//! | `serde` | no      | `Serialize`/`Deserialize` for `Matrix<T>` and `Det<T>` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
pub mod decomp;
pub mod linalg;
pub mod matrix;
pub mod ols;
pub mod rand;
pub mod special;
pub mod traits;

pub use config::Config;
pub use decomp::{CholeskyDec, Det, LuDec, QrDec, SvdDec};
pub use linalg::LinalgError;
pub use matrix::Matrix;
pub use ols::{Ols, OlsChol, OlsError, OlsQr, OlsSvd};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
