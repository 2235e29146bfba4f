//! End-to-end regression behavior: the three OLS engines must agree with
//! each other, and the inference statistics must satisfy their textbook
//! identities.

use approx::assert_relative_eq;
use densemat::ols::{OlsChol, OlsQr, OlsSvd};
use densemat::rand::WichmannHill;
use densemat::{Config, Matrix};

fn line_fixture() -> (Matrix<f64>, Matrix<f64>) {
    let x = Matrix::from_rows(
        8,
        2,
        &[
            1.0, 1.0, //
            1.0, 2.0, //
            1.0, 3.0, //
            1.0, 4.0, //
            1.0, 5.0, //
            1.0, 6.0, //
            1.0, 7.0, //
            1.0, 8.0,
        ],
    );
    let y = Matrix::col_vec(&[3.2, 4.9, 7.1, 8.8, 11.2, 12.9, 15.1, 16.8]);
    (x, y)
}

#[test]
fn engines_agree_on_coefficients_and_statistics() {
    let (x, y) = line_fixture();
    let ch = OlsChol::new(&y, &x, Config::default()).unwrap();
    let qr = OlsQr::new(&y, &x, Config::default()).unwrap();
    let sv = OlsSvd::new(&y, &x, Config::default()).unwrap();

    for i in 0..2 {
        assert_relative_eq!(ch.coeff()[(i, 0)], qr.coeff()[(i, 0)], max_relative = 1e-9);
        assert_relative_eq!(qr.coeff()[(i, 0)], sv.coeff()[(i, 0)], max_relative = 1e-9);
        assert_relative_eq!(
            ch.std_err()[(i, 0)],
            qr.std_err()[(i, 0)],
            max_relative = 1e-8
        );
        assert_relative_eq!(
            qr.std_err()[(i, 0)],
            sv.std_err()[(i, 0)],
            max_relative = 1e-8
        );
    }
    assert_relative_eq!(ch.rss(0), qr.rss(0), max_relative = 1e-9);
    assert_relative_eq!(qr.rss(0), sv.rss(0), max_relative = 1e-9);
    assert_relative_eq!(ch.rsq(0), qr.rsq(0), max_relative = 1e-9);
    assert_relative_eq!(ch.dw(0), qr.dw(0), max_relative = 1e-8);
}

#[test]
fn residuals_orthogonal_to_design() {
    let (x, y) = line_fixture();
    let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
    // Xᵀe = 0: residuals are orthogonal to every regressor
    let xte = &x.transpose() * fit.residuals();
    for i in 0..2 {
        assert!(xte[(i, 0)].abs() < 1e-10);
    }
    // with an intercept, rss + explained = tss
    let explained: f64 = {
        let fitted = fit.fitted();
        let mean = y.col_mean()[0];
        (0..8).map(|i| (fitted[(i, 0)] - mean).powi(2)).sum()
    };
    assert_relative_eq!(fit.rss(0) + explained, fit.tss(0), max_relative = 1e-10);
}

#[test]
fn single_restriction_f_equals_t_squared() {
    let (x, y) = line_fixture();
    let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
    let t = fit.t_test(&[0.0, 1.0], 1.5, 0);
    let h = Matrix::from_rows(1, 2, &[0.0, 1.0]);
    let f = fit.f_test(&h, &[1.5], 0).unwrap();
    assert_relative_eq!(f, t * t, max_relative = 1e-9);
}

#[test]
fn rsq_identities() {
    let (x, y) = line_fixture();
    let fit = OlsChol::new(&y, &x, Config::default()).unwrap();
    assert!(fit.constant());
    assert_relative_eq!(fit.rsq(0), 1.0 - fit.rss(0) / fit.tss(0), max_relative = 1e-12);
    // adjusted never exceeds plain R²
    assert!(fit.rbar_sq(0) <= fit.rsq(0));
    assert!(fit.rsq(0) > 0.99);
}

#[test]
fn no_intercept_rsq_uses_uncentered_total() {
    // pure slope through the origin
    let x = Matrix::col_vec(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y = Matrix::col_vec(&[2.1, 3.9, 6.1, 7.9, 10.0]);
    let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
    assert!(!fit.constant());
    let mean = y.col_mean()[0];
    let expected = 1.0 - fit.rss(0) / (fit.tss(0) + mean * mean);
    assert_relative_eq!(fit.rsq(0), expected, max_relative = 1e-12);
    assert!(fit.rsq(0) > 0.9 && fit.rsq(0) < 1.0);
}

#[test]
fn var_add_agrees_with_full_refit_across_engines() {
    let t: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let x = Matrix::from_fn(10, 2, |i, j| if j == 0 { 1.0 } else { t[i] });
    let z = Matrix::from_fn(10, 1, |i, _| t[i] * t[i]);
    let y = Matrix::from_fn(10, 1, |i, _| 0.4 + 1.1 * t[i] + 0.3 * t[i] * t[i]);

    let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
    let rss_pred = fit.var_add(&z, 0).unwrap();
    let full = OlsChol::new(&y, &x.hcat(&z), Config::default()).unwrap();
    assert!((rss_pred - full.rss(0)).abs() < 1e-9);
}

#[test]
fn svd_engine_survives_collinear_design_others_reject() {
    let t = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let x = Matrix::from_fn(6, 3, |i, j| match j {
        0 => 1.0,
        1 => t[i],
        _ => 2.0 * t[i] - 1.0, // exact linear combination
    });
    let y = Matrix::from_fn(6, 1, |i, _| 1.0 + 2.0 * t[i]);

    assert!(OlsChol::new(&y, &x, Config::default()).is_err());
    let sv = OlsSvd::new(&y, &x, Config::default()).unwrap();
    assert_eq!(sv.rank(), 2);
    assert!(sv.rss(0) < 1e-16);
}

#[test]
fn recovers_known_coefficients_from_simulated_data() {
    // y = 2 + 0.5 t + noise, noise from the seeded generator
    let mut rng = WichmannHill::new(2718, 281, 828).unwrap();
    let n = 200;
    let x = Matrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { i as f64 / 10.0 });
    let y = Matrix::from_fn(n, 1, |i, _| {
        2.0 + 0.5 * (i as f64 / 10.0) + rng.normal(0.0, 0.3)
    });
    let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
    assert!((fit.coeff()[(0, 0)] - 2.0).abs() < 0.25);
    assert!((fit.coeff()[(1, 0)] - 0.5).abs() < 0.025);
    // independent noise: Durbin-Watson near 2
    let dw = fit.dw(0);
    assert!(dw > 1.4 && dw < 2.6);
    // the equation standard error estimates the noise scale
    assert!((fit.se(0) - 0.3).abs() < 0.08);
}

#[test]
fn multi_response_statistics_are_per_column() {
    let x = Matrix::from_rows(5, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0]);
    // first response exact, second noisy
    let y = Matrix::from_rows(
        5,
        2,
        &[
            1.0, 0.8, //
            2.0, 2.3, //
            3.0, 2.9, //
            4.0, 4.2, //
            5.0, 4.8,
        ],
    );
    let fit = OlsQr::new(&y, &x, Config::default()).unwrap();
    assert!(fit.rss(0) < 1e-18);
    assert!(fit.rss(1) > 1e-3);
    assert_relative_eq!(fit.rsq(0), 1.0, max_relative = 1e-12);
    assert!(fit.rsq(1) < 1.0);
}
