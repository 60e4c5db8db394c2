//! Errors for transform construction and shape handling.
//!
//! Transforms never fail on numerically invalid inputs: values outside a
//! transform's mathematical domain come back as `NaN`/`±inf` and are left
//! for callers to detect. The only failures surfaced here are invalid
//! construction parameters and inputs whose *shape* a structural transform
//! cannot act on.

/// Result alias for transform operations that may produce [`TransformError`].
pub type TransformResult<T> = Result<T, TransformError>;

/// Unified error type for the transform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    // ---- Construction parameters ----
    /// Lower/upper bounds must be finite.
    InvalidBound { bound: f64, reason: &'static str },

    /// Interval bounds must be finite with `a < b`.
    InvalidInterval { a: f64, b: f64, reason: &'static str },

    /// Stick-breaking slack must lie in `[0, 0.5)`.
    InvalidEps { eps: f64, reason: &'static str },

    // ---- Input shapes ----
    /// Structural transforms act along the last axis and need at least one axis.
    ScalarInput { transform: &'static str },

    /// The last axis is too short for the requested map.
    EmptyInput { transform: &'static str, len: usize, min: usize },
}

impl std::error::Error for TransformError {}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction parameters ----
            TransformError::InvalidBound { bound, reason } => {
                write!(f, "Invalid transform bound {bound}: {reason}")
            }
            TransformError::InvalidInterval { a, b, reason } => {
                write!(f, "Invalid interval ({a}, {b}): {reason}")
            }
            TransformError::InvalidEps { eps, reason } => {
                write!(f, "Invalid stick-breaking eps {eps}: {reason}")
            }

            // ---- Input shapes ----
            TransformError::ScalarInput { transform } => {
                write!(f, "Transform '{transform}' needs at least one axis, got a scalar")
            }
            TransformError::EmptyInput { transform, len, min } => {
                write!(
                    f,
                    "Transform '{transform}' needs a last axis of length >= {min}, got {len}"
                )
            }
        }
    }
}
