#[cfg(test)]
mod tests {
    use super::super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    // =====================================================================
    // ln_gamma / ln_beta
    // =====================================================================

    #[test]
    fn ln_gamma_integer_factorials() {
        // ln Γ(n) = ln (n-1)!
        approx_eq(ln_gamma(1.0_f64).unwrap(), 0.0, 1e-12);
        approx_eq(ln_gamma(2.0).unwrap(), 0.0, 1e-9);
        approx_eq(ln_gamma(3.0).unwrap(), 2.0_f64.ln(), 1e-9);
        approx_eq(ln_gamma(5.0).unwrap(), 24.0_f64.ln(), 1e-9);
        approx_eq(ln_gamma(11.0).unwrap(), 3628800.0_f64.ln(), 1e-9);
    }

    #[test]
    fn ln_gamma_half_integers() {
        let ln_sqrt_pi = 0.5 * core::f64::consts::PI.ln();
        approx_eq(ln_gamma(0.5_f64).unwrap(), ln_sqrt_pi, 1e-9);
        // Γ(3/2) = √π/2
        approx_eq(ln_gamma(1.5_f64).unwrap(), ln_sqrt_pi - 2.0_f64.ln(), 1e-9);
    }

    #[test]
    fn ln_gamma_recurrence_identity() {
        // ln Γ(x+1) = ln Γ(x) + ln x
        for &x in &[0.3, 1.7, 3.14, 5.5] {
            let lhs = ln_gamma(x + 1.0_f64).unwrap();
            let rhs = ln_gamma(x).unwrap() + x.ln();
            approx_eq(lhs, rhs, 1e-8);
        }
    }

    #[test]
    fn ln_gamma_rejects_nonpositive() {
        assert_eq!(ln_gamma(0.0_f64).unwrap_err(), SpecialError::DomainError);
        assert_eq!(ln_gamma(-1.5_f64).unwrap_err(), SpecialError::DomainError);
    }

    #[test]
    fn ln_beta_known_value() {
        // B(2,3) = Γ(2)Γ(3)/Γ(5) = 2/24 = 1/12
        approx_eq(ln_beta(2.0_f64, 3.0).unwrap(), (1.0_f64 / 12.0).ln(), 1e-9);
        // symmetry
        approx_eq(
            ln_beta(2.5_f64, 0.5).unwrap(),
            ln_beta(0.5_f64, 2.5).unwrap(),
            1e-12,
        );
    }

    // =====================================================================
    // inc_beta
    // =====================================================================

    #[test]
    fn inc_beta_uniform_is_identity() {
        // I_x(1,1) = x
        for &x in &[0.1, 0.25, 0.5, 0.9] {
            approx_eq(inc_beta(x, 1.0_f64, 1.0).unwrap(), x, 1e-7);
        }
    }

    #[test]
    fn inc_beta_endpoints() {
        assert_eq!(inc_beta(0.0_f64, 2.0, 3.0).unwrap(), 0.0);
        assert_eq!(inc_beta(1.0_f64, 2.0, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn inc_beta_symmetry() {
        // I_x(a,b) = 1 − I_{1−x}(b,a)
        for &(x, a, b) in &[(0.3, 2.0, 5.0), (0.7, 0.5, 0.5), (0.42, 4.0, 1.5)] {
            let lhs = inc_beta(x, a, b).unwrap();
            let rhs = 1.0 - inc_beta(1.0 - x, b, a).unwrap();
            approx_eq(lhs, rhs, 1e-7);
        }
    }

    #[test]
    fn inc_beta_symmetric_median() {
        // equal shapes put the median at 1/2
        approx_eq(inc_beta(0.5_f64, 3.0, 3.0).unwrap(), 0.5, 1e-7);
    }

    #[test]
    fn inc_beta_closed_form() {
        // I_x(2,2) = x²(3 − 2x)
        let x = 0.35_f64;
        approx_eq(inc_beta(x, 2.0, 2.0).unwrap(), x * x * (3.0 - 2.0 * x), 1e-7);
    }

    #[test]
    fn inc_beta_rejects_bad_arguments() {
        assert_eq!(
            inc_beta(0.5_f64, -1.0, 2.0).unwrap_err(),
            SpecialError::DomainError
        );
        assert_eq!(
            inc_beta(1.5_f64, 2.0, 2.0).unwrap_err(),
            SpecialError::DomainError
        );
    }

    // =====================================================================
    // inc_gamma
    // =====================================================================

    #[test]
    fn inc_gamma_exponential_case() {
        // P(1, x) = 1 − e^{−x}
        for &x in &[0.1, 1.0, 2.5, 10.0] {
            approx_eq(inc_gamma(1.0_f64, x).unwrap(), 1.0 - (-x).exp(), 1e-7);
        }
    }

    #[test]
    fn inc_gamma_half_shape_is_erf() {
        // P(1/2, x²) = erf(x); erf(1) = 0.8427007929
        approx_eq(inc_gamma(0.5_f64, 1.0).unwrap(), 0.8427007929, 1e-7);
    }

    #[test]
    fn inc_gamma_limits() {
        assert_eq!(inc_gamma(2.0_f64, 0.0).unwrap(), 0.0);
        approx_eq(inc_gamma(2.0_f64, 60.0).unwrap(), 1.0, 1e-10);
    }

    #[test]
    fn inc_gamma_continuity_at_branch_switch() {
        // series below a+1, continued fraction above; values must agree
        let a = 3.0_f64;
        let below = inc_gamma(a, a + 1.0 - 1e-9).unwrap();
        let above = inc_gamma(a, a + 1.0 + 1e-9).unwrap();
        approx_eq(below, above, 1e-6);
    }

    #[test]
    fn inc_gamma_rejects_bad_arguments() {
        assert_eq!(
            inc_gamma(0.0_f64, 1.0).unwrap_err(),
            SpecialError::DomainError
        );
        assert_eq!(
            inc_gamma(2.0_f64, -0.5).unwrap_err(),
            SpecialError::DomainError
        );
    }

    // =====================================================================
    // normal_cdf / normal_inv
    // =====================================================================

    #[test]
    fn normal_cdf_reference_values() {
        approx_eq(normal_cdf(0.0_f64), 0.5, 1e-12);
        approx_eq(normal_cdf(1.0_f64), 0.8413447461, 1e-7);
        approx_eq(normal_cdf(1.96_f64), 0.9750021049, 1e-7);
        approx_eq(normal_cdf(-2.5758293_f64), 0.005, 1e-7);
    }

    #[test]
    fn normal_cdf_symmetry() {
        for &z in &[0.5, 1.3, 2.0, 4.0] {
            approx_eq(normal_cdf(-z), 1.0 - normal_cdf(z), 1e-12);
        }
    }

    #[test]
    fn normal_cdf_saturates_in_far_tails() {
        assert_eq!(normal_cdf(9.0_f64), 1.0);
        assert_eq!(normal_cdf(-9.0_f64), 0.0);
    }

    #[test]
    fn normal_inv_reference_values() {
        assert!(normal_inv(0.5_f64).unwrap().abs() < 1e-15);
        approx_eq(normal_inv(0.975_f64).unwrap(), 1.9599639845, 1e-8);
        approx_eq(normal_inv(0.001_f64).unwrap(), -3.0902323062, 1e-8);
    }

    #[test]
    fn normal_inv_round_trip() {
        for &p in &[0.01, 0.2, 0.5, 0.8, 0.999] {
            approx_eq(normal_cdf(normal_inv(p).unwrap()), p, 1e-7);
        }
    }

    #[test]
    fn normal_inv_far_tail_branch() {
        // p small enough to hit the sqrt(-ln r) > 5 region
        let x = normal_inv(1.0e-12_f64).unwrap();
        approx_eq(x, -7.0344838187, 1e-6);
    }

    #[test]
    fn normal_inv_rejects_endpoints() {
        assert_eq!(normal_inv(0.0_f64).unwrap_err(), SpecialError::DomainError);
        assert_eq!(normal_inv(1.0_f64).unwrap_err(), SpecialError::DomainError);
    }

    // =====================================================================
    // distribution CDFs
    // =====================================================================

    #[test]
    fn chi2_two_dof_is_exponential() {
        // χ²(2) has CDF 1 − e^{−x/2}
        for &x in &[0.5, 2.0, 5.0] {
            approx_eq(chi2_cdf(x, 2).unwrap(), 1.0 - (-x / 2.0_f64).exp(), 1e-7);
        }
    }

    #[test]
    fn chi2_one_dof_matches_normal() {
        // P(χ²(1) ≤ z²) = 2Φ(z) − 1
        let z = 1.96_f64;
        approx_eq(
            chi2_cdf(z * z, 1).unwrap(),
            2.0 * normal_cdf(z) - 1.0,
            1e-6,
        );
    }

    #[test]
    fn student_cdf_center_and_symmetry() {
        assert_eq!(student_cdf(0.0_f64, 7).unwrap(), 0.5);
        for &t in &[0.5, 1.5, 3.0] {
            approx_eq(
                student_cdf(-t, 7).unwrap(),
                1.0 - student_cdf(t, 7).unwrap(),
                1e-10,
            );
        }
    }

    #[test]
    fn student_one_dof_is_cauchy() {
        // t(1) CDF is 1/2 + atan(t)/π
        let t = 1.0_f64;
        let expected = 0.5 + t.atan() / core::f64::consts::PI;
        approx_eq(student_cdf(t, 1).unwrap(), expected, 1e-7);
    }

    #[test]
    fn student_many_dof_approaches_normal() {
        approx_eq(
            student_cdf(1.96_f64, 1000).unwrap(),
            normal_cdf(1.96_f64),
            1e-3,
        );
    }

    #[test]
    fn f_cdf_matches_squared_student() {
        // F(1, d) is the square of t(d): P(F ≤ t²) = 2·P(t ≤ |t|) − 1
        let t = 2.0_f64;
        approx_eq(
            f_cdf(t * t, 1, 10).unwrap(),
            2.0 * student_cdf(t, 10).unwrap() - 1.0,
            1e-7,
        );
    }

    #[test]
    fn f_cdf_equal_dof_median_at_one() {
        approx_eq(f_cdf(1.0_f64, 8, 8).unwrap(), 0.5, 1e-7);
    }

    #[test]
    fn f_cdf_rejects_negative() {
        assert_eq!(
            f_cdf(-1.0_f64, 2, 3).unwrap_err(),
            SpecialError::DomainError
        );
    }

    #[test]
    fn poisson_cdf_integer_mean() {
        // 1 − P(1, k) = e^{−k}
        let k = 2.0_f64;
        approx_eq(poisson_cdf(k, 1.0).unwrap(), (-k).exp(), 1e-7);
    }

    // =====================================================================
    // f32 coverage
    // =====================================================================

    #[test]
    fn single_precision_paths() {
        approx_eq(ln_gamma(5.0_f32).unwrap() as f64, 24.0_f64.ln(), 1e-4);
        approx_eq(normal_cdf(1.0_f32) as f64, 0.8413447, 1e-5);
        approx_eq(inc_gamma(1.0_f32, 2.0).unwrap() as f64, 1.0 - (-2.0_f64).exp(), 1e-5);
    }
}
