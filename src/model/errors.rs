//! Errors for the model container (variable registration and log-probability
//! evaluation).
//!
//! ## Conventions
//! - Variables are looked up by their *value* name: the plain name for
//!   untransformed variables and `"{name}_{transform}__"` otherwise.
//! - Distribution parameter errors from `statrs` are normalized to
//!   [`ModelError::MeanInvalid`] / [`ModelError::StdDevInvalid`].
use statrs::distribution::NormalError;

use crate::transforms::errors::TransformError;

/// Result alias for model operations that may produce [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Registration ----
    /// A variable (or its transformed value name) is already registered.
    DuplicateVariable { name: String },

    /// Test value shape differs from the declared variable shape.
    TestvalShapeMismatch { name: String, expected: Vec<usize>, found: Vec<usize> },

    // ---- Evaluation ----
    /// The point passed to `logp` has no entry for a registered value name.
    MissingVariable { name: String },

    /// A point entry maps back to a constrained value of the wrong shape.
    ValueShapeMismatch { name: String, expected: Vec<usize>, found: Vec<usize> },

    // ---- statrs distribution errors ----
    /// Wrapper for statrs::distribution::NormalError::MeanInvalid
    MeanInvalid,

    /// Wrapper for statrs::distribution::NormalError::StandardDeviationInvalid
    StdDevInvalid,

    // ---- Transform layer ----
    Transform(TransformError),
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Registration ----
            ModelError::DuplicateVariable { name } => {
                write!(f, "Variable '{name}' is already registered.")
            }
            ModelError::TestvalShapeMismatch { name, expected, found } => {
                write!(f, "Test value for '{name}' has shape {found:?}, expected {expected:?}")
            }

            // ---- Evaluation ----
            ModelError::MissingVariable { name } => {
                write!(f, "Point has no value for '{name}'.")
            }
            ModelError::ValueShapeMismatch { name, expected, found } => {
                write!(f, "Value for '{name}' has shape {found:?}, expected {expected:?}")
            }

            // ---- statrs distribution errors ----
            ModelError::MeanInvalid => write!(f, "Normal mean must not be NaN."),
            ModelError::StdDevInvalid => {
                write!(f, "Normal standard deviation must be strictly positive.")
            }

            // ---- Transform layer ----
            ModelError::Transform(err) => write!(f, "Transform error: {err}"),
        }
    }
}

impl From<NormalError> for ModelError {
    fn from(err: NormalError) -> ModelError {
        match err {
            NormalError::MeanInvalid => ModelError::MeanInvalid,
            _ => ModelError::StdDevInvalid,
        }
    }
}

impl From<TransformError> for ModelError {
    fn from(err: TransformError) -> ModelError {
        ModelError::Transform(err)
    }
}
