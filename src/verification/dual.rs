//! verification::dual — forward-mode dual numbers.
//!
//! A dual number `re + eps·ε` with `ε² = 0` carries a value and one
//! directional derivative. Evaluating a transform kernel over [`Dual`]
//! seeded with a unit tangent yields one exact column of its Jacobian,
//! independent of the closed-form `jacobian_det` the transform declares.
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::transforms::real::Real;

/// Value and tangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    pub re: f64,
    pub eps: f64,
}

impl Dual {
    #[inline]
    pub fn new(re: f64, eps: f64) -> Self {
        Self { re, eps }
    }

    /// Independent variable: tangent 1.
    #[inline]
    pub fn variable(re: f64) -> Self {
        Self { re, eps: 1.0 }
    }

    /// Constant: tangent 0.
    #[inline]
    pub fn constant(re: f64) -> Self {
        Self { re, eps: 0.0 }
    }

    /// Chain rule for a unary map with value `f` and derivative `df`.
    #[inline]
    fn chain(self, f: f64, df: f64) -> Self {
        Self { re: f, eps: df * self.eps }
    }
}

impl Add for Dual {
    type Output = Dual;
    #[inline]
    fn add(self, rhs: Dual) -> Dual {
        Dual::new(self.re + rhs.re, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Dual;
    #[inline]
    fn sub(self, rhs: Dual) -> Dual {
        Dual::new(self.re - rhs.re, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Dual;
    #[inline]
    fn mul(self, rhs: Dual) -> Dual {
        Dual::new(self.re * rhs.re, self.eps * rhs.re + self.re * rhs.eps)
    }
}

impl Div for Dual {
    type Output = Dual;
    #[inline]
    fn div(self, rhs: Dual) -> Dual {
        let re = self.re / rhs.re;
        Dual::new(re, (self.eps - re * rhs.eps) / rhs.re)
    }
}

impl Neg for Dual {
    type Output = Dual;
    #[inline]
    fn neg(self) -> Dual {
        Dual::new(-self.re, -self.eps)
    }
}

impl Real for Dual {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(v)
    }

    #[inline]
    fn value(self) -> f64 {
        self.re
    }

    fn exp(self) -> Self {
        let e = self.re.exp();
        self.chain(e, e)
    }

    fn ln(self) -> Self {
        self.chain(self.re.ln(), 1.0 / self.re)
    }

    fn ln_1p(self) -> Self {
        self.chain(self.re.ln_1p(), 1.0 / (1.0 + self.re))
    }

    fn exp_m1(self) -> Self {
        self.chain(self.re.exp_m1(), self.re.exp())
    }

    fn sin(self) -> Self {
        self.chain(self.re.sin(), self.re.cos())
    }

    fn cos(self) -> Self {
        self.chain(self.re.cos(), -self.re.sin())
    }

    fn atan2(self, other: Self) -> Self {
        let r2 = self.re * self.re + other.re * other.re;
        Dual::new(self.re.atan2(other.re), (other.re * self.eps - self.re * other.eps) / r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Arithmetic and elementary-function derivative rules against
    //   hand-derived values.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify product and quotient rules.
    //
    // Given
    // -----
    // - `x = 2` as a variable.
    //
    // Expect
    // ------
    // - `d(x²)/dx = 4`, `d(1/x)/dx = -1/4`.
    fn arithmetic_follows_product_and_quotient_rules() {
        let x = Dual::variable(2.0);
        let sq = x * x;
        assert_eq!(sq, Dual::new(4.0, 4.0));
        let inv = Dual::constant(1.0) / x;
        assert_relative_eq!(inv.re, 0.5);
        assert_relative_eq!(inv.eps, -0.25);
    }

    #[test]
    // Purpose
    // -------
    // Check elementary-function derivatives at a generic point.
    //
    // Given
    // -----
    // - `x = 0.7` as a variable.
    //
    // Expect
    // ------
    // - Tangents of exp, ln, ln_1p, exp_m1, sin, cos match their analytic
    //   derivatives; `atan2(sin x, cos x)` has derivative 1.
    fn elementary_functions_have_analytic_tangents() {
        let v = 0.7_f64;
        let x = Dual::variable(v);
        assert_relative_eq!(x.exp().eps, v.exp());
        assert_relative_eq!(x.ln().eps, 1.0 / v);
        assert_relative_eq!(x.ln_1p().eps, 1.0 / (1.0 + v));
        assert_relative_eq!(x.exp_m1().eps, v.exp());
        assert_relative_eq!(x.sin().eps, v.cos());
        assert_relative_eq!(x.cos().eps, -v.sin());
        assert_relative_eq!(x.sin().atan2(x.cos()).eps, 1.0, epsilon = 1e-15);
    }
}
