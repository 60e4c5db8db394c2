//! Numerical stability utilities for the transform kernels.
//!
//! Provides safe implementations of the nonlinear maps that connect a
//! constrained coordinate to the real line and that are prone to
//! overflow/underflow in naïve form. Every helper is generic over
//! [`Real`] so the same formula is differentiated by the verification
//! layer.
//!
//! # Provided items
//! - [`DEFAULT_STICK_EPS`]: slack added by stick-breaking to keep simplex
//!   coordinates strictly inside `(0, 1)`.
//! - [`softplus(x)`]: stable `ln(1 + exp(x))`, mapping ℝ → (0, ∞).
//! - [`softplus_inv(x)`]: stable `ln(exp(x) - 1)`, mapping (0, ∞) → ℝ.
//! - [`logistic(x)`] / [`invlogit(x, eps)`]: ℝ → (0, 1), optionally squeezed
//!   into `(eps, 1 - eps)`.
//! - [`logit(p)`]: (0, 1) → ℝ.
use crate::transforms::real::Real;

/// Default slack for stick-breaking: machine epsilon for `f64`.
///
/// Keeps the backward map strictly inside the open simplex even when the
/// logistic saturates. Lower precision backends need a larger slack, which
/// is why it is a construction parameter of the transform.
pub const DEFAULT_STICK_EPS: f64 = f64::EPSILON;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// Uses the identity `softplus(x) = x + ln1p(exp(-x))` for positive `x`,
/// so `exp` never sees a large positive argument, and `ln1p(exp(x))`
/// otherwise. Both branches are exact, so derivatives agree on either side
/// of the switch.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)`, strictly positive for finite `x`.
pub fn softplus<S: Real>(x: S) -> S {
    if x.value() > 0.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// Direct evaluation of `ln(exp(x) - 1)` overflows for large `x` and loses
/// precision near zero. This evaluates `x + ln(1 - exp(-x))` with
/// `expm1`, which is well conditioned on the whole positive axis.
///
/// # Parameters
/// - `x`: a positive real (the softplus output). Non-positive inputs give
///   `NaN`/`-inf`.
pub fn softplus_inv<S: Real>(x: S) -> S {
    x + (-(-x).exp_m1()).ln()
}

/// Stable logistic `σ(x) = 1 / (1 + exp(-x))`.
///
/// Picks the branch whose exponential argument is non-positive.
pub fn logistic<S: Real>(x: S) -> S {
    if x.value() >= 0.0 {
        S::one() / (S::one() + (-x).exp())
    } else {
        let e = x.exp();
        e / (S::one() + e)
    }
}

/// Logistic squeezed into `(eps, 1 - eps)`: `(1 - 2·eps)·σ(x) + eps`.
///
/// With `eps = 0` this is exactly [`logistic`].
pub fn invlogit<S: Real>(x: S, eps: f64) -> S {
    S::from_f64(1.0 - 2.0 * eps) * logistic(x) + S::from_f64(eps)
}

/// Log-odds `ln(p) - ln(1 - p)` on `(0, 1)`.
pub fn logit<S: Real>(p: S) -> S {
    p.ln() - (-p).ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the stable helpers with naïve formulas on safe grids.
    // - Tail behavior of softplus/logistic where the naïve forms overflow.
    // - Inverse relationships (softplus ∘ softplus_inv, logistic ∘ logit).
    //
    // They intentionally DO NOT cover:
    // - Derivatives of these helpers; those are exercised through the
    //   Jacobian oracle in `verification`.
    // -------------------------------------------------------------------------

    const GRID: [f64; 9] = [-15.0, -3.0, -1.0, -0.1, 0.0, 0.1, 1.0, 3.0, 15.0];

    #[test]
    // Purpose
    // -------
    // Verify that `softplus` and `logistic` agree with their textbook formulas
    // where those formulas are well conditioned.
    //
    // Given
    // -----
    // - A symmetric grid of moderate inputs.
    //
    // Expect
    // ------
    // - Relative agreement to 1e-12.
    fn softplus_and_logistic_match_naive_formulas_on_safe_grid() {
        for &x in GRID.iter() {
            assert_relative_eq!(softplus(x), (1.0 + x.exp()).ln(), max_relative = 1e-12);
            assert_relative_eq!(logistic(x), 1.0 / (1.0 + (-x).exp()), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the stable forms stay finite where the naïve forms overflow.
    //
    // Given
    // -----
    // - Inputs of magnitude 800 (exp overflows `f64`).
    //
    // Expect
    // ------
    // - `softplus(800) == 800`, `softplus(-800)` is a finite non-negative
    //   value, and `logistic` saturates to exactly 0/1 without NaN.
    fn stable_helpers_do_not_overflow_in_the_tails() {
        assert_eq!(softplus(800.0_f64), 800.0);
        let lo = softplus(-800.0_f64);
        assert!(lo.is_finite() && lo >= 0.0);
        assert_eq!(logistic(800.0_f64), 1.0);
        assert_eq!(logistic(-800.0_f64), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Check the inverse pairs used by `log_exp_m1` and `logodds`.
    //
    // Given
    // -----
    // - Positive inputs for softplus_inv; unit-interval inputs for logit.
    //
    // Expect
    // ------
    // - `softplus(softplus_inv(x)) == x` and `logistic(logit(p)) == p` to
    //   1e-12 relative error.
    fn inverse_pairs_round_trip() {
        for &x in [1e-4, 0.5, 1.0, 20.0, 300.0].iter() {
            assert_relative_eq!(softplus(softplus_inv(x)), x, max_relative = 1e-12);
        }
        for &p in [1e-3, 0.1, 0.5, 0.75, 0.99].iter() {
            assert_relative_eq!(logistic(logit(p)), p, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `invlogit` squeezes the logistic into `(eps, 1 - eps)`.
    //
    // Given
    // -----
    // - `eps = 1e-3` and saturating inputs ±800.
    //
    // Expect
    // ------
    // - Outputs equal `eps` and `1 - eps`; `eps = 0` reproduces `logistic`.
    fn invlogit_respects_slack() {
        let eps = 1e-3;
        assert_relative_eq!(invlogit(-800.0_f64, eps), eps, max_relative = 1e-12);
        assert_relative_eq!(invlogit(800.0_f64, eps), 1.0 - eps, max_relative = 1e-12);
        assert_eq!(invlogit(0.3_f64, 0.0), logistic(0.3_f64));
    }
}
