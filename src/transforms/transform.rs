//! transforms::transform — the array-level transform contract.
//!
//! Purpose
//! -------
//! Expose every built-in bijection behind a single closed type,
//! [`Transform`], with the four operations used by a log-probability
//! computation: `forward`, `forward_val`, `backward` and `jacobian_det`.
//!
//! Key behaviors
//! -------------
//! - Elementwise variants map each coordinate of an array of any rank.
//! - Structural variants act along the last axis; all leading axes are
//!   independent batch dimensions, so a `(2, 3)` matrix is two 3-simplices.
//! - `jacobian_det` returns one value per coordinate for elementwise
//!   variants and one value per lane for structural variants (a 0-d array
//!   for a plain vector).
//!
//! Invariants & assumptions
//! ------------------------
//! - `backward(forward(x)) == x` up to rounding for every `x` in the
//!   constrained domain.
//! - Transforms are immutable `Copy` values; parametrized variants are
//!   validated once at construction.
//! - Values are never checked: out-of-domain inputs surface as `NaN`/`inf`.
//!   Only shape problems are reported as [`TransformError`].
//!
//! Conventions
//! -----------
//! - Process-wide instances are exposed as constants ([`LOG`], [`ORDERED`],
//!   ...). Bounded variants are built through [`Transform::lowerbound`],
//!   [`Transform::upperbound`] and [`Transform::interval`].
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

use crate::transforms::{
    elementwise::Elementwise,
    errors::{TransformError, TransformResult},
    numerics::DEFAULT_STICK_EPS,
    real::Real,
    structural::Structural,
};

/// A bijection between a constrained space and unconstrained ℝⁿ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Elementwise(Elementwise),
    Structural(Structural),
}

/// Positive reals via `ln`.
pub const LOG: Transform = Transform::Elementwise(Elementwise::Log);

/// Positive reals via inverse softplus.
pub const LOG_EXP_M1: Transform = Transform::Elementwise(Elementwise::LogExpM1);

/// Unit interval via log-odds.
pub const LOGODDS: Transform = Transform::Elementwise(Elementwise::LogOdds);

/// Angles in (-π, π].
pub const CIRCULAR: Transform = Transform::Elementwise(Elementwise::Circular);

/// Simplex via stick-breaking with the default `f64` slack.
pub const STICK_BREAKING: Transform =
    Transform::Structural(Structural::StickBreaking { eps: DEFAULT_STICK_EPS });

/// Simplex via dropping the last coordinate.
pub const SUM_TO_1: Transform = Transform::Structural(Structural::SumTo1);

/// Strictly increasing vectors.
pub const ORDERED: Transform = Transform::Structural(Structural::Ordered);

impl Transform {
    /// Reals bounded below by `a`.
    ///
    /// # Errors
    /// - [`TransformError::InvalidBound`] if `a` is not finite.
    pub fn lowerbound(a: f64) -> TransformResult<Self> {
        verify_bound(a)?;
        Ok(Transform::Elementwise(Elementwise::LowerBound { a }))
    }

    /// Reals bounded above by `b`.
    ///
    /// # Errors
    /// - [`TransformError::InvalidBound`] if `b` is not finite.
    pub fn upperbound(b: f64) -> TransformResult<Self> {
        verify_bound(b)?;
        Ok(Transform::Elementwise(Elementwise::UpperBound { b }))
    }

    /// Reals in the open interval `(a, b)`.
    ///
    /// # Errors
    /// - [`TransformError::InvalidInterval`] unless both ends are finite and
    ///   `a < b`.
    pub fn interval(a: f64, b: f64) -> TransformResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(TransformError::InvalidInterval {
                a,
                b,
                reason: "Interval bounds must be finite.",
            });
        }
        if a >= b {
            return Err(TransformError::InvalidInterval {
                a,
                b,
                reason: "Lower bound must be strictly below upper bound.",
            });
        }
        Ok(Transform::Elementwise(Elementwise::Interval { a, b }))
    }

    /// Stick-breaking with an explicit slack, e.g. `f32::EPSILON as f64`
    /// when values will be stored in single precision.
    ///
    /// # Errors
    /// - [`TransformError::InvalidEps`] unless `0 <= eps < 0.5`.
    pub fn stick_breaking_with_eps(eps: f64) -> TransformResult<Self> {
        if !eps.is_finite() || !(0.0..0.5).contains(&eps) {
            return Err(TransformError::InvalidEps {
                eps,
                reason: "Slack must be finite and lie in [0, 0.5).",
            });
        }
        Ok(Transform::Structural(Structural::StickBreaking { eps }))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transform::Elementwise(t) => t.name(),
            Transform::Structural(t) => t.name(),
        }
    }

    /// `true` when every coordinate is mapped independently.
    pub fn is_elementwise(&self) -> bool {
        matches!(self, Transform::Elementwise(_))
    }

    /// Constrained → unconstrained.
    ///
    /// # Errors
    /// - [`TransformError::ScalarInput`] / [`TransformError::EmptyInput`] for
    ///   structural variants given a 0-d array or too short a last axis.
    pub fn forward<S: Real>(&self, x: ArrayViewD<S>) -> TransformResult<ArrayD<S>> {
        match self {
            Transform::Elementwise(t) => Ok(x.mapv(|v| t.forward(v))),
            Transform::Structural(t) => {
                let len = lane_len(t, &x, true)?;
                map_lanes(x, t.forward_len(len), |lane| t.forward(lane))
            }
        }
    }

    /// Forward map on concrete `f64` values.
    ///
    /// Same semantics as [`Transform::forward`] at `S = f64`; kept as a
    /// separate entry point for callers holding owned arrays of values.
    pub fn forward_val(&self, x: &ArrayD<f64>) -> TransformResult<ArrayD<f64>> {
        self.forward(x.view())
    }

    /// Unconstrained → constrained.
    ///
    /// # Errors
    /// - Same shape errors as [`Transform::forward`].
    pub fn backward<S: Real>(&self, y: ArrayViewD<S>) -> TransformResult<ArrayD<S>> {
        match self {
            Transform::Elementwise(t) => Ok(y.mapv(|v| t.backward(v))),
            Transform::Structural(t) => {
                let len = lane_len(t, &y, false)?;
                map_lanes(y, t.backward_len(len), |lane| t.backward(lane))
            }
        }
    }

    /// `ln |det J|` of `backward` at `y`.
    ///
    /// # Returns
    /// - Elementwise variants: an array shaped like `y`.
    /// - Structural variants: `y`'s shape without its last axis.
    ///
    /// # Errors
    /// - Same shape errors as [`Transform::backward`].
    pub fn jacobian_det<S: Real>(&self, y: ArrayViewD<S>) -> TransformResult<ArrayD<S>> {
        match self {
            Transform::Elementwise(t) => Ok(y.mapv(|v| t.jacobian_det(v))),
            Transform::Structural(t) => {
                lane_len(t, &y, false)?;
                let last = Axis(y.ndim() - 1);
                let batch = &y.shape()[..y.ndim() - 1];
                let mut out = ArrayD::from_elem(IxDyn(batch), S::zero());
                for (lane, slot) in y.lanes(last).into_iter().zip(out.iter_mut()) {
                    *slot = t.jacobian_det(lane);
                }
                Ok(out)
            }
        }
    }
}

fn verify_bound(bound: f64) -> TransformResult<()> {
    if !bound.is_finite() {
        return Err(TransformError::InvalidBound { bound, reason: "Bound must be finite." });
    }
    Ok(())
}

/// Validate rank and last-axis length for a structural transform.
fn lane_len<S>(t: &Structural, a: &ArrayViewD<S>, forward: bool) -> TransformResult<usize> {
    if a.ndim() == 0 {
        return Err(TransformError::ScalarInput { transform: t.name() });
    }
    let len = a.shape()[a.ndim() - 1];
    let min = t.min_len(forward);
    if len < min {
        return Err(TransformError::EmptyInput { transform: t.name(), len, min });
    }
    Ok(len)
}

/// Apply a lane kernel along the last axis, writing lanes of `out_len`.
fn map_lanes<S, F>(input: ArrayViewD<S>, out_len: usize, kernel: F) -> TransformResult<ArrayD<S>>
where
    S: Real,
    F: Fn(ndarray::ArrayView1<S>) -> ndarray::Array1<S>,
{
    let last = Axis(input.ndim() - 1);
    let mut shape = input.shape().to_vec();
    shape[input.ndim() - 1] = out_len;
    let mut out = ArrayD::from_elem(IxDyn(&shape), S::zero());
    for (lane_in, mut lane_out) in input.lanes(last).into_iter().zip(out.lanes_mut(last)) {
        lane_out.assign(&kernel(lane_in));
    }
    Ok(out)
}
