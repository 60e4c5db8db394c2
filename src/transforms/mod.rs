//! transforms — bijections between constrained and unconstrained spaces.
//!
//! Purpose
//! -------
//! Let gradient-based inference run on unconstrained coordinates while
//! log-densities are still reported in the original, constrained space.
//! Every transform supplies a forward map, its inverse, and the log
//! absolute determinant of the inverse's Jacobian, which is the density
//! correction a log-probability needs.
//!
//! Key behaviors
//! -------------
//! - Elementwise transforms: `log`, `log_exp_m1`, `logodds`,
//!   `lowerbound(a)`, `upperbound(b)`, `interval(a, b)`, `circular`.
//! - Structural transforms acting along the last axis: `stick_breaking`
//!   and `sum_to_1` (simplex ↔ ℝ^{K-1}) and `ordered` (increasing vectors).
//! - Kernels are generic over [`Real`], so the same code is evaluated over
//!   `f64` and over dual numbers by the verification layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - `backward(forward(x)) == x` up to rounding on each constrained domain.
//! - Values are never validated; out-of-domain inputs give `NaN`/`inf`.
//! - Construction parameters and structural shapes are validated and
//!   reported through [`TransformError`].
//!
//! Conventions
//! -----------
//! - All routines operate on `ndarray` dynamic-rank arrays (`ArrayD`,
//!   `ArrayViewD`).
//! - This module never logs, performs I/O, or touches global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover reference values, stable tails,
//!   shape handling and constructor validation.
//! - The integration suite sweeps every transform over its domain fixtures
//!   and checks Jacobians against the dual-number oracle.

pub mod elementwise;
pub mod errors;
pub mod numerics;
pub mod real;
pub mod structural;
pub mod transform;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::elementwise::Elementwise;
pub use self::errors::{TransformError, TransformResult};
pub use self::numerics::{DEFAULT_STICK_EPS, invlogit, logistic, logit, softplus, softplus_inv};
pub use self::real::Real;
pub use self::structural::Structural;
pub use self::transform::{
    CIRCULAR, LOG, LOG_EXP_M1, LOGODDS, ORDERED, STICK_BREAKING, SUM_TO_1, Transform,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_bijectors::transforms::prelude::*;
//
// to import the transform surface in a single line.

pub mod prelude {
    pub use super::errors::{TransformError, TransformResult};
    pub use super::real::Real;
    pub use super::transform::{
        CIRCULAR, LOG, LOG_EXP_M1, LOGODDS, ORDERED, STICK_BREAKING, SUM_TO_1, Transform,
    };
}
