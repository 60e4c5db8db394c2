//! model — minimal probabilistic model for end-to-end log-probability checks.
//!
//! Purpose
//! -------
//! Exercise transforms the way an inference engine would: variables are
//! sampled in unconstrained space, mapped back through `backward`, scored
//! by their Normal log-density (`statrs`), and corrected by the
//! transform's log-Jacobian.
//!
//! Conventions
//! -----------
//! - Transformed variables are keyed `"{name}_{transform}__"` in points.
//! - Only Normal variables are supported.

pub mod container;
pub mod errors;
pub mod variable;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::container::{Model, Point};
pub use self::errors::{ModelError, ModelResult};
pub use self::variable::{NormalVariable, transformed_name};
