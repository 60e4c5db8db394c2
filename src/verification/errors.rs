//! Unified error handling for the verification harness.
//!
//! Every failed check is reported as a [`VerifyError`]: numeric
//! comparisons that exceed tolerance, logical conditions that do not hold,
//! and the shape or configuration problems that prevent a check from
//! running. Non-finite values are not filtered beforehand; they show up
//! here as comparison failures.
use crate::transforms::errors::TransformError;

/// Result alias for verification routines.
pub type VerifyResult<T> = Result<T, VerifyError>;

#[derive(Debug, Clone, PartialEq)]
pub enum VerifyError {
    // ---- Comparisons ----
    /// `|actual - expected| >= tol` (and the two are not identical).
    NotClose { index: usize, expected: f64, actual: f64, tol: f64 },

    /// A logical condition did not hold for some element.
    LogicalViolated { index: usize, expected: bool },

    /// Expected and actual arrays cannot be compared elementwise.
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },

    // ---- Oracle ----
    /// The Jacobian oracle only differentiates scalars and vectors.
    NotAVector { ndim: usize },

    /// Full-mode Jacobians must be square after the comparable projection.
    NonSquareJacobian { rows: usize, cols: usize },

    // ---- Options ----
    /// Comparison tolerance must be finite and strictly positive.
    InvalidTolerance { tol: f64, reason: &'static str },

    // ---- Context ----
    /// A check failed on a particular fixture value.
    Fixture { transform: &'static str, check: &'static str, fixture: usize, source: Box<VerifyError> },

    /// A range postcondition failed on a backward-mapped value.
    Postcondition { value: usize, source: Box<VerifyError> },

    // ---- Transform layer ----
    Transform(TransformError),
}

impl std::error::Error for VerifyError {}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Comparisons ----
            VerifyError::NotClose { index, expected, actual, tol } => {
                write!(
                    f,
                    "Value out of bounds at index {index}: expected {expected}, got {actual} (tol {tol})"
                )
            }
            VerifyError::LogicalViolated { index, expected } => {
                write!(f, "Logical condition violated at index {index}: expected {expected}")
            }
            VerifyError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {expected:?}, found {found:?}")
            }

            // ---- Oracle ----
            VerifyError::NotAVector { ndim } => {
                write!(f, "Jacobian oracle needs a scalar or vector input, got {ndim} dimensions")
            }
            VerifyError::NonSquareJacobian { rows, cols } => {
                write!(f, "Jacobian is {rows}x{cols}; a determinant needs a square matrix")
            }

            // ---- Options ----
            VerifyError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }

            // ---- Context ----
            VerifyError::Fixture { transform, check, fixture, source } => {
                write!(f, "{check} failed for '{transform}' on fixture {fixture}: {source}")
            }
            VerifyError::Postcondition { value, source } => {
                write!(f, "Postcondition failed on value {value}: {source}")
            }

            // ---- Transform layer ----
            VerifyError::Transform(err) => write!(f, "Transform error: {err}"),
        }
    }
}

impl From<TransformError> for VerifyError {
    fn from(err: TransformError) -> VerifyError {
        VerifyError::Transform(err)
    }
}
