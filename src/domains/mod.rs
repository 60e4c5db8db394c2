//! domains — representative values for each constrained space.
//!
//! Purpose
//! -------
//! Supply the fixture values that drive transform checks: scalars near
//! zero, near a boundary and in the typical range for each category
//! (reals, positive reals, negative reals, unit interval, angles), plus
//! vector and matrix categories (simplices, ordered vectors, products).
//!
//! Conventions
//! -----------
//! - Scalar fixtures are 0-d `ArrayD<f64>` values; vector and matrix
//!   fixtures are 1-d and 2-d arrays with a shared `shape`.
//! - Edges are recorded but never appear among the values.
//! - Sampled categories use a fixed seed so fixtures are identical run to
//!   run.

pub mod catalog;
pub mod domain;
pub mod errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::catalog::{
    circ, multi_simplex, r, rminusbig, rplus, rplusbig, simplex, sorted_vector, unit, vector,
};
pub use self::domain::Domain;
pub use self::errors::{DomainError, DomainResult};
