//! transforms::structural — bijections that couple the coordinates of a vector.
//!
//! Purpose
//! -------
//! Provide the lane kernels for transforms whose forward map is not
//! elementwise: the simplex maps (stick-breaking, sum-to-one), which drop
//! one degree of freedom, and the ordered map, which enforces strict
//! monotonicity through a cumulative sum of exponentials.
//!
//! Key behaviors
//! -------------
//! - Each kernel acts on a single lane (a 1-d view along the last axis);
//!   the array-level wrapper iterates lanes so that leading axes behave as
//!   independent batch dimensions.
//! - `jacobian_det` reduces a lane to a single `ln |det J|` value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Simplex kernels map a constrained lane of length `K` to an
//!   unconstrained lane of length `K - 1`; callers guarantee `K ≥ 1`
//!   forward and `K - 1 ≥ 0` backward.
//! - The ordered kernel preserves length and expects at least one entry.
use ndarray::{Array1, ArrayView1};

use crate::transforms::{
    numerics::{invlogit, logit, softplus},
    real::Real,
};

/// Structural transform variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Structural {
    /// Simplex ↔ ℝ^{K-1} via centred stick-breaking, with slack `eps`.
    StickBreaking { eps: f64 },
    /// Simplex ↔ ℝ^{K-1} by dropping the last coordinate.
    SumTo1,
    /// Strictly increasing vectors ↔ ℝ^K.
    Ordered,
}

impl Structural {
    pub fn name(&self) -> &'static str {
        match self {
            Structural::StickBreaking { .. } => "stickbreaking",
            Structural::SumTo1 => "sumto1",
            Structural::Ordered => "ordered",
        }
    }

    /// Last-axis length produced by `forward` (one shorter for simplices).
    pub(crate) fn forward_len(&self, len: usize) -> usize {
        match self {
            Structural::StickBreaking { .. } | Structural::SumTo1 => len.saturating_sub(1),
            Structural::Ordered => len,
        }
    }

    pub(crate) fn backward_len(&self, len: usize) -> usize {
        match self {
            Structural::StickBreaking { .. } | Structural::SumTo1 => len + 1,
            Structural::Ordered => len,
        }
    }

    /// Minimum last-axis length accepted by `forward` and `backward`.
    pub(crate) fn min_len(&self, forward: bool) -> usize {
        match (self, forward) {
            (Structural::Ordered, _) => 1,
            (_, true) => 1,
            (_, false) => 0,
        }
    }

    pub fn forward<S: Real>(&self, x: ArrayView1<S>) -> Array1<S> {
        match *self {
            Structural::StickBreaking { eps } => stick_breaking_forward(x, eps),
            Structural::SumTo1 => x.slice(ndarray::s![..x.len() - 1]).to_owned(),
            Structural::Ordered => ordered_forward(x),
        }
    }

    pub fn backward<S: Real>(&self, y: ArrayView1<S>) -> Array1<S> {
        match *self {
            Structural::StickBreaking { eps } => stick_breaking_backward(y, eps),
            Structural::SumTo1 => {
                let rest = y.iter().fold(S::one(), |acc, &v| acc - v);
                y.iter().copied().chain(std::iter::once(rest)).collect()
            }
            Structural::Ordered => {
                let mut acc = S::zero();
                y.iter()
                    .enumerate()
                    .map(|(k, &v)| {
                        acc = if k == 0 { v } else { acc + v.exp() };
                        acc
                    })
                    .collect()
            }
        }
    }

    pub fn jacobian_det<S: Real>(&self, y: ArrayView1<S>) -> S {
        match *self {
            Structural::StickBreaking { eps } => stick_breaking_jacobian_det(y, eps),
            Structural::SumTo1 => S::zero(),
            Structural::Ordered => y.iter().skip(1).fold(S::zero(), |acc, &v| acc + v),
        }
    }
}

/// `logit(1 / (K - k))`: the unconstrained value that puts every
/// coordinate at `1/K` when `y = 0`.
fn eq_share<S: Real>(big_k: usize, k: usize) -> S {
    S::from_f64(logit(1.0 / (big_k - k) as f64))
}

fn stick_breaking_forward<S: Real>(x: ArrayView1<S>, eps: f64) -> Array1<S> {
    let big_k = x.len();
    // Remaining stick at each break: s_k = x_k + ... + x_{K-1}.
    let mut remaining = vec![S::zero(); big_k];
    let mut acc = S::zero();
    for k in (0..big_k).rev() {
        acc = acc + x[k];
        remaining[k] = acc;
    }
    // Undo the slack squeeze `z ↦ (1 - 2eps)·z + eps` applied by backward.
    let lo = S::from_f64(eps);
    let width = S::from_f64(1.0 - 2.0 * eps);
    (0..big_k - 1)
        .map(|k| logit((x[k] / remaining[k] - lo) / width) - eq_share(big_k, k))
        .collect()
}

fn stick_breaking_backward<S: Real>(y: ArrayView1<S>, eps: f64) -> Array1<S> {
    let big_k = y.len() + 1;
    let mut out = Vec::with_capacity(big_k);
    let mut stick = S::one();
    for (k, &v) in y.iter().enumerate() {
        let z = invlogit(v + eq_share(big_k, k), eps);
        out.push(stick * z);
        stick = stick * (S::one() - z);
    }
    out.push(stick);
    Array1::from(out)
}

fn stick_breaking_jacobian_det<S: Real>(y: ArrayView1<S>, eps: f64) -> S {
    let big_k = y.len() + 1;
    let log_squeeze = S::from_f64((1.0 - 2.0 * eps).ln());
    let mut stick = S::one();
    let mut total = S::zero();
    for (k, &v) in y.iter().enumerate() {
        let shifted = v + eq_share(big_k, k);
        total = total + stick.ln() + log_squeeze - softplus(shifted) - softplus(-shifted);
        stick = stick * (S::one() - invlogit(shifted, eps));
    }
    total
}

fn ordered_forward<S: Real>(x: ArrayView1<S>) -> Array1<S> {
    (0..x.len()).map(|k| if k == 0 { x[0] } else { (x[k] - x[k - 1]).ln() }).collect()
}
