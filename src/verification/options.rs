//! verification::options — tolerance and logging configuration for checks.
//!
//! Purpose
//! -------
//! Centralize how strict the harness is and where it reports progress.
//! Tolerances depend on the floating-point precision values are stored
//! in: stick-breaking needs a slack whose smallest usable size is larger
//! in single precision, so single-precision runs compare more loosely.
//!
//! Conventions
//! -----------
//! - [`VerifyOptions`] is validated on construction; the checks treat it
//!   as internally consistent.
//! - The default logger discards everything; [`term_logger`] builds a
//!   non-blocking terminal logger for interactive runs.
use slog::{Discard, Drain, Logger, o};

use crate::verification::errors::{VerifyError, VerifyResult};

/// Absolute tolerance for double-precision comparisons.
pub const DOUBLE_TOL: f64 = 1e-7;

/// Absolute tolerance for single-precision comparisons.
pub const SINGLE_TOL: f64 = 1e-6;

/// Floating-point precision a check is calibrated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Double,
    Single,
}

impl Precision {
    pub fn tolerance(self) -> f64 {
        match self {
            Precision::Double => DOUBLE_TOL,
            Precision::Single => SINGLE_TOL,
        }
    }
}

/// Tolerance and logger shared by every check.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub tol: f64,
    pub logger: Logger,
}

impl VerifyOptions {
    /// Construct validated options with an explicit tolerance.
    ///
    /// # Errors
    /// - [`VerifyError::InvalidTolerance`] if `tol` is non-finite or ≤ 0.
    pub fn new(tol: f64) -> VerifyResult<Self> {
        verify_tol(tol)?;
        Ok(Self { tol, logger: discard_logger() })
    }

    /// Options calibrated for `precision`.
    pub fn for_precision(precision: Precision) -> Self {
        Self { tol: precision.tolerance(), logger: discard_logger() }
    }

    /// Replace the logger, keeping the tolerance.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self::for_precision(Precision::default())
    }
}

/// Validate a comparison tolerance.
///
/// # Errors
/// Returns [`VerifyError::InvalidTolerance`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol(tol: f64) -> VerifyResult<()> {
    if !tol.is_finite() {
        return Err(VerifyError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(VerifyError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Logger that drops every record.
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

/// Non-blocking terminal logger.
pub fn term_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("component" => "verification"))
}
