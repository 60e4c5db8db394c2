//! Errors for fixture domain construction.

/// Result alias for domain construction that may produce [`DomainError`].
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Every value of a domain must share the first value's shape.
    ShapeMismatch { index: usize, expected: Vec<usize>, found: Vec<usize> },
}

impl std::error::Error for DomainError {}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::ShapeMismatch { index, expected, found } => {
                write!(f, "Domain value {index} has shape {found:?}, expected {expected:?}")
            }
        }
    }
}
