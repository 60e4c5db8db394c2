//! transforms::real — scalar abstraction shared by every transform kernel.
//!
//! Purpose
//! -------
//! Let the transform kernels be written once and evaluated over more than
//! one scalar type. Production callers use `f64`; the verification layer
//! evaluates the same kernels over dual numbers to obtain exact
//! derivatives without a symbolic graph.
//!
//! Conventions
//! -----------
//! - Only the operations the kernels actually need are exposed.
//! - [`Real::value`] returns the plain `f64` part and is used for branch
//!   decisions (e.g. which side of a piecewise-stable formula to take).
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Scalar type a transform can be evaluated over.
pub trait Real:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lift a constant into this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Plain value part.
    fn value(self) -> f64;

    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn ln_1p(self) -> Self;
    fn exp_m1(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;

    /// Four-quadrant arctangent of `self / other`.
    fn atan2(self, other: Self) -> Self;

    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    fn one() -> Self {
        Self::from_f64(1.0)
    }
}

impl Real for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn value(self) -> f64 {
        self
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn ln_1p(self) -> Self {
        f64::ln_1p(self)
    }

    #[inline]
    fn exp_m1(self) -> Self {
        f64::exp_m1(self)
    }

    #[inline]
    fn sin(self) -> Self {
        f64::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        f64::cos(self)
    }

    #[inline]
    fn atan2(self, other: Self) -> Self {
        f64::atan2(self, other)
    }
}
