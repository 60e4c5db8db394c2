//! verification::checks — fixture-driven checks for transforms.
//!
//! Purpose
//! -------
//! Run a transform over every value of a [`Domain`] and confirm the
//! properties every bijection in this crate must satisfy: exact round
//! trips, agreement between the value-level and generic forward maps,
//! closed-form log-Jacobians that match the dual-number oracle, and range
//! postconditions on backward-mapped values.
//!
//! Key behaviors
//! -------------
//! - Each check stops at the first failing fixture and wraps the failure
//!   in [`VerifyError::Fixture`], naming the transform, the check and the
//!   fixture index.
//! - Progress is reported through the `slog::Logger` carried by
//!   [`VerifyOptions`]: `debug` per fixture, `info` per completed check,
//!   `warn` on failure.
//!
//! Conventions
//! -----------
//! - Under [`JacobianMode::Full`] an elementwise transform's closed form is
//!   summed over coordinates before comparison; structural closed forms are
//!   already per-vector.
//! - `check_values` receives already backward-mapped values (see
//!   [`get_values`]) and applies an elementwise predicate to each.
use ndarray::{ArrayD, arr0};
use slog::{debug, info, warn};

use crate::{
    domains::domain::Domain,
    transforms::transform::Transform,
    verification::{
        compare::{close_to, close_to_logical},
        dual::Dual,
        errors::{VerifyError, VerifyResult},
        options::VerifyOptions,
        oracle::{Comparable, JacobianMode, log_jacobian_det},
    },
};

const ROUND_TRIP: &str = "round_trip";
const FORWARD_VAL: &str = "forward_val";
const JACOBIAN_DET: &str = "jacobian_det";

/// Round trip and forward consistency on every domain value.
///
/// For each `x`: `backward(forward_val(x)) ≈ x`, and `forward_val(x)`
/// matches the primal of `forward` evaluated over dual numbers.
///
/// # Errors
/// - [`VerifyError::Fixture`] wrapping the first failure.
pub fn check_transform(
    transform: &Transform, domain: &Domain, opts: &VerifyOptions,
) -> VerifyResult<()> {
    for (i, x) in domain.iter().enumerate() {
        debug!(opts.logger, "checking fixture"; "transform" => transform.name(), "fixture" => i);
        round_trip(transform, x, opts.tol)
            .map_err(|err| fail(transform, ROUND_TRIP, i, err, opts))?;
        forward_consistency(transform, x, opts.tol)
            .map_err(|err| fail(transform, FORWARD_VAL, i, err, opts))?;
    }
    info!(
        opts.logger, "transform checked";
        "transform" => transform.name(), "check" => ROUND_TRIP, "fixtures" => domain.len()
    );
    Ok(())
}

/// [`check_transform`] for vector-valued fixtures.
///
/// # Errors
/// - [`VerifyError::NotAVector`] (wrapped) if any fixture value is 0-d.
/// - Everything [`check_transform`] returns.
pub fn check_vector_transform(
    transform: &Transform, domain: &Domain, opts: &VerifyOptions,
) -> VerifyResult<()> {
    if let Some(i) = domain.iter().position(|x| x.ndim() == 0) {
        return Err(fail(transform, ROUND_TRIP, i, VerifyError::NotAVector { ndim: 0 }, opts));
    }
    check_transform(transform, domain, opts)
}

/// Backward map of every domain value, in fixture order.
///
/// # Errors
/// - [`VerifyError::Transform`] if a value has a shape the transform
///   rejects.
pub fn get_values(transform: &Transform, domain: &Domain) -> VerifyResult<Vec<ArrayD<f64>>> {
    domain.iter().map(|y| transform.backward(y.view()).map_err(VerifyError::from)).collect()
}

/// Closed-form `jacobian_det` against the dual-number oracle on every
/// domain value.
///
/// # Errors
/// - [`VerifyError::Fixture`] wrapping the first mismatch or oracle error.
pub fn check_jacobian_det(
    transform: &Transform, domain: &Domain, comparable: Comparable, mode: JacobianMode,
    opts: &VerifyOptions,
) -> VerifyResult<()> {
    for (i, y) in domain.iter().enumerate() {
        debug!(opts.logger, "checking fixture"; "transform" => transform.name(), "fixture" => i);
        jacobian_agreement(transform, y, comparable, mode, opts.tol)
            .map_err(|err| fail(transform, JACOBIAN_DET, i, err, opts))?;
    }
    info!(
        opts.logger, "transform checked";
        "transform" => transform.name(), "check" => JACOBIAN_DET, "fixtures" => domain.len()
    );
    Ok(())
}

/// Every element of every value satisfies `predicate`.
///
/// # Errors
/// - [`VerifyError::Postcondition`] wrapping the first violated element.
pub fn check_values<F>(values: &[ArrayD<f64>], predicate: F) -> VerifyResult<()>
where
    F: Fn(f64) -> bool,
{
    for (value, v) in values.iter().enumerate() {
        close_to_logical(&v.mapv(&predicate), true)
            .map_err(|err| VerifyError::Postcondition { value, source: Box::new(err) })?;
    }
    Ok(())
}

fn round_trip(transform: &Transform, x: &ArrayD<f64>, tol: f64) -> VerifyResult<()> {
    let y = transform.forward_val(x)?;
    let x2 = transform.backward(y.view())?;
    close_to(x, &x2, tol)
}

fn forward_consistency(transform: &Transform, x: &ArrayD<f64>, tol: f64) -> VerifyResult<()> {
    let by_val = transform.forward_val(x)?;
    let lifted = x.mapv(Dual::constant);
    let generic = transform.forward(lifted.view())?.mapv(|d| d.re);
    close_to(&by_val, &generic, tol)
}

fn jacobian_agreement(
    transform: &Transform, y: &ArrayD<f64>, comparable: Comparable, mode: JacobianMode, tol: f64,
) -> VerifyResult<()> {
    let expected = log_jacobian_det(transform, y, comparable, mode)?;
    let mut actual = transform.jacobian_det(y.view())?;
    if mode == JacobianMode::Full && transform.is_elementwise() {
        actual = arr0(actual.sum()).into_dyn();
    }
    if expected.shape() != actual.shape() {
        return Err(VerifyError::ShapeMismatch {
            expected: expected.shape().to_vec(),
            found: actual.shape().to_vec(),
        });
    }
    close_to(&expected, &actual, tol)
}

fn fail(
    transform: &Transform, check: &'static str, fixture: usize, err: VerifyError,
    opts: &VerifyOptions,
) -> VerifyError {
    warn!(
        opts.logger, "check failed";
        "transform" => transform.name(), "check" => check, "fixture" => fixture,
        "error" => %err
    );
    VerifyError::Fixture { transform: transform.name(), check, fixture, source: Box::new(err) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domains::catalog::{r, rplusbig, sorted_vector, unit, vector},
        transforms::transform::{LOG, ORDERED, SUM_TO_1},
    };
    use ndarray::array;
    use slog::{Drain, KV, Level, Logger, Never, OwnedKVList, Record, o};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Level, Vec<(String, String)>)>>>;

    /// Drain that keeps each record's level and key-value pairs.
    struct Capture(Captured);

    struct Pairs(Vec<(String, String)>);

    impl slog::Serializer for Pairs {
        fn emit_arguments(&mut self, key: slog::Key, val: &std::fmt::Arguments) -> slog::Result {
            self.0.push((key.to_string(), val.to_string()));
            Ok(())
        }
    }

    impl Drain for Capture {
        type Ok = ();
        type Err = Never;

        fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), Never> {
            let mut pairs = Pairs(Vec::new());
            let _ = record.kv().serialize(record, &mut pairs);
            let _ = values.serialize(record, &mut pairs);
            if let Ok(mut out) = self.0.lock() {
                out.push((record.level(), pairs.0));
            }
            Ok(())
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Passing checks on well-behaved transforms and fixtures.
    // - Fixture context on failures (transform, check, fixture index).
    // - The vector-fixture requirement and value postconditions.
    //
    // They intentionally DO NOT cover:
    // - The full transform × fixture matrix; see tests/transform_suite.rs.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a correct transform passes both scalar checks.
    //
    // Given
    // -----
    // - `log` over `Rplusbig`.
    //
    // Expect
    // ------
    // - `check_transform` and elementwise `check_jacobian_det` are `Ok`.
    fn log_passes_round_trip_and_jacobian_checks() {
        // Arrange
        let opts = VerifyOptions::default();
        let dom = rplusbig();

        // Act
        let rt = check_transform(&LOG, &dom, &opts);
        let jd = check_jacobian_det(
            &LOG,
            &dom,
            Comparable::Identity,
            JacobianMode::Elementwise,
            &opts,
        );

        // Assert
        assert_eq!(rt, Ok(()));
        assert_eq!(jd, Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Ensure round-trip failures carry the fixture context.
    //
    // Given
    // -----
    // - `log` over `R`, whose first interior value is negative.
    //
    // Expect
    // ------
    // - `Fixture { transform: "log", check: "round_trip", fixture: 0, .. }`.
    fn round_trip_failure_names_transform_and_fixture() {
        let err = check_transform(&LOG, &r(), &VerifyOptions::default()).unwrap_err();
        match err {
            VerifyError::Fixture { transform, check, fixture, .. } => {
                assert_eq!(transform, "log");
                assert_eq!(check, ROUND_TRIP);
                assert_eq!(fixture, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the vector requirement and structural Jacobian comparison.
    //
    // Given
    // -----
    // - `ordered` over scalar `R`, sorted draws of length 2, and
    //   `Vector(R, 2)` as unconstrained Jacobian inputs.
    //
    // Expect
    // ------
    // - Scalar fixtures are rejected as `NotAVector`; sorted vectors pass
    //   the round trip; the full Jacobian check passes on `Vector(R, 2)`.
    fn vector_checks_require_vector_fixtures() {
        let opts = VerifyOptions::default();
        let err = check_vector_transform(&ORDERED, &r(), &opts).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Fixture { ref source, .. } if **source == VerifyError::NotAVector { ndim: 0 }
        ));

        assert_eq!(check_vector_transform(&ORDERED, &sorted_vector(2), &opts), Ok(()));
        let dom = vector(&r(), 2);
        assert_eq!(
            check_jacobian_det(&ORDERED, &dom, Comparable::Identity, JacobianMode::Full, &opts),
            Ok(())
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify `get_values` and `check_values` on a simplex transform.
    //
    // Given
    // -----
    // - `sum_to_1.backward` over `Vector(Unit, 2)`.
    //
    // Expect
    // ------
    // - One 3-vector per fixture; all coordinates sum to 1; the predicate
    //   `v > 0.5` fails on some value with a `Postcondition` error.
    fn get_values_feeds_postcondition_checks() {
        let dom = vector(&unit(), 2);
        let values = get_values(&SUM_TO_1, &dom).unwrap();
        assert_eq!(values.len(), dom.len());
        for v in &values {
            assert_eq!(v.shape(), &[3]);
            assert!((v.sum() - 1.0).abs() < 1e-12);
        }
        assert_eq!(check_values(&values, |v| v.is_finite()), Ok(()));
        assert!(matches!(
            check_values(&values, |v| v > 0.5),
            Err(VerifyError::Postcondition { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure mismatched closed-form and oracle shapes are reported.
    //
    // Given
    // -----
    // - `ordered` over a single 2×2 fixture.
    //
    // Expect
    // ------
    // - The oracle rejects the matrix; the error is wrapped as a
    //   `jacobian_det` fixture failure.
    fn jacobian_check_rejects_matrix_fixtures() {
        let dom = Domain::from_values(vec![array![[0.0, 1.0], [2.0, 3.0]].into_dyn()]).unwrap();
        let err = check_jacobian_det(
            &ORDERED,
            &dom,
            Comparable::Identity,
            JacobianMode::Full,
            &VerifyOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, VerifyError::Fixture { check: JACOBIAN_DET, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a failing check is reported through the options' logger.
    //
    // Given
    // -----
    // - `log` over `R` (first fixture negative) with a capturing drain.
    //
    // Expect
    // ------
    // - Exactly one warning, carrying `transform = log`,
    //   `check = round_trip` and `fixture = 0`.
    fn failing_check_logs_warning_with_context() {
        // Arrange
        let records: Captured = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::root(Capture(Arc::clone(&records)), o!());
        let opts = VerifyOptions::default().with_logger(logger);

        // Act
        let result = check_transform(&LOG, &r(), &opts);

        // Assert
        assert!(result.is_err());
        let records = records.lock().unwrap();
        let warnings: Vec<&Vec<(String, String)>> =
            records.iter().filter(|(lvl, _)| *lvl == Level::Warning).map(|(_, kv)| kv).collect();
        assert_eq!(warnings.len(), 1);
        let has = |k: &str, v: &str| warnings[0].iter().any(|(key, val)| key == k && val == v);
        assert!(has("transform", "log"));
        assert!(has("check", ROUND_TRIP));
        assert!(has("fixture", "0"));
    }
}
