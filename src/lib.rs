//! rust_bijectors — bijective transforms for constrained random variables.
//!
//! Purpose
//! -------
//! Map constrained values (positive reals, unit intervals, simplices, ordered
//! vectors, angles) to unconstrained ℝⁿ and back, with the log absolute
//! Jacobian determinant a log-density needs after a change of variables.
//! A verification harness checks every transform against domain fixtures
//! and a dual-number Jacobian oracle.
//!
//! Key behaviors
//! -------------
//! - [`transforms`]: the closed set of transforms (`log`, `log_exp_m1`,
//!   `logodds`, `lowerbound`, `upperbound`, `interval`, `circular`,
//!   `stick_breaking`, `sum_to_1`, `ordered`).
//! - [`domains`]: fixture categories for scalars, vectors and simplices.
//! - [`verification`]: comparisons, the Jacobian oracle and fixture sweeps.
//! - [`model`]: a small Normal-variable model for joint log-probability
//!   checks.
//!
//! Conventions
//! -----------
//! - Arrays are `ndarray` dynamic-rank; structural transforms act along the
//!   last axis and treat leading axes as batch.
//! - Only the verification harness logs (via `slog`); the numerical layers
//!   are silent.

pub mod domains;
pub mod model;
pub mod transforms;
pub mod verification;
