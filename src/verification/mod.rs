//! verification — harness that checks transforms against independent references.
//!
//! Purpose
//! -------
//! Confirm, fixture by fixture, that each transform is a true bijection on
//! its domain and that its closed-form log-Jacobian is correct. The
//! reference Jacobian comes from forward-mode dual numbers evaluated
//! through the transform's own generic `backward` kernel, so it never
//! shares code with the closed forms under test.
//!
//! Key behaviors
//! -------------
//! - [`close_to`] / [`close_to_logical`]: absolute-tolerance and mask
//!   comparisons with broadcasting.
//! - [`jacobian`] / [`log_jacobian_det`]: the dual-number oracle, with
//!   [`Comparable::DropLast`] for simplex outputs; [`fd_jacobian`] is a
//!   coarse finite-difference cross-check.
//! - [`check_transform`], [`check_vector_transform`], [`get_values`],
//!   [`check_jacobian_det`], [`check_values`]: fixture sweeps.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`VerifyOptions`] carries a validated tolerance (`1e-7` double, `1e-6`
//!   single) and the `slog::Logger` the sweeps report through.
//! - The oracle handles 0-d and 1-d inputs only; batch fixtures must be
//!   split by the caller.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; tests/transform_suite.rs runs the
//!   full transform × fixture matrix.

pub mod checks;
pub mod compare;
pub mod dual;
pub mod errors;
pub mod options;
pub mod oracle;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::checks::{
    check_jacobian_det, check_transform, check_values, check_vector_transform, get_values,
};
pub use self::compare::{close_to, close_to_logical, close_to_scalar};
pub use self::dual::Dual;
pub use self::errors::{VerifyError, VerifyResult};
pub use self::options::{
    DOUBLE_TOL, Precision, SINGLE_TOL, VerifyOptions, discard_logger, term_logger, verify_tol,
};
pub use self::oracle::{
    Comparable, JacobianMode, fd_jacobian, jacobian, log_abs_det, log_jacobian_det,
};

pub mod prelude {
    pub use super::checks::{
        check_jacobian_det, check_transform, check_values, check_vector_transform, get_values,
    };
    pub use super::errors::{VerifyError, VerifyResult};
    pub use super::options::{Precision, VerifyOptions};
    pub use super::oracle::{Comparable, JacobianMode};
}
