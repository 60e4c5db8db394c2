//! verification::compare — approximate equality and logical checks.
//!
//! Comparisons are absolute: an element passes when
//! `|actual - expected| < tol` or when the two are identical (so matching
//! infinities pass). `NaN` never passes. Expected values broadcast against
//! the actual array, which lets a scalar reference be compared to every
//! element.
use ndarray::{ArrayD, arr0};

use crate::verification::errors::{VerifyError, VerifyResult};

/// Elementwise approximate equality.
///
/// # Errors
/// - [`VerifyError::ShapeMismatch`] if `expected` does not broadcast to
///   `actual`'s shape.
/// - [`VerifyError::NotClose`] for the first element out of tolerance
///   (index in logical row-major order).
pub fn close_to(expected: &ArrayD<f64>, actual: &ArrayD<f64>, tol: f64) -> VerifyResult<()> {
    let expected_b = expected.broadcast(actual.raw_dim()).ok_or_else(|| {
        VerifyError::ShapeMismatch { expected: expected.shape().to_vec(), found: actual.shape().to_vec() }
    })?;
    for (index, (&e, &a)) in expected_b.iter().zip(actual.iter()).enumerate() {
        if !((a - e).abs() < tol || a == e) {
            return Err(VerifyError::NotClose { index, expected: e, actual: a, tol });
        }
    }
    Ok(())
}

/// [`close_to`] against a single expected value.
pub fn close_to_scalar(expected: f64, actual: &ArrayD<f64>, tol: f64) -> VerifyResult<()> {
    close_to(&arr0(expected).into_dyn(), actual, tol)
}

/// Every element of `mask` must equal `expected`.
///
/// # Errors
/// - [`VerifyError::LogicalViolated`] for the first offending element.
pub fn close_to_logical(mask: &ArrayD<bool>, expected: bool) -> VerifyResult<()> {
    match mask.iter().position(|&m| m != expected) {
        Some(index) => Err(VerifyError::LogicalViolated { index, expected }),
        None => Ok(()),
    }
}
