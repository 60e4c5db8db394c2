//! verification::oracle — reference Jacobians of a transform's backward map.
//!
//! Purpose
//! -------
//! Provide the ground truth a transform's closed-form `jacobian_det` is
//! checked against. The primary oracle differentiates `backward` exactly
//! with forward-mode dual numbers; a finite-difference Jacobian built on
//! `finitediff` serves as a coarse, fully independent cross-check.
//!
//! Key behaviors
//! -------------
//! - [`jacobian`] builds the full `m × n` Jacobian of `backward` at a
//!   scalar or vector `y`, one dual sweep per input coordinate.
//! - [`Comparable::DropLast`] removes the last output coordinate before
//!   differentiating. Simplex outputs carry one redundant coordinate (the
//!   last is fixed by the others), so only the first `n` outputs form a
//!   square, comparable Jacobian.
//! - [`log_jacobian_det`] reduces the Jacobian either per coordinate
//!   (`ln |J_ii|`) or as a whole (`ln |det J|`, via `nalgebra`).
//! - [`fd_jacobian`] approximates the same Jacobian by central
//!   differences, capturing transform errors raised inside the closure.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are 0-d or 1-d; a 0-d `y` is treated as a length-1 vector and
//!   reduced back to a 0-d result.
//! - Determinants and diagonals need a square Jacobian after projection;
//!   anything else is reported as [`VerifyError::NonSquareJacobian`].
//! - This module is only used to verify transforms; nothing in
//!   `transforms` depends on it.
use finitediff::FiniteDiff;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayD, arr0};
use std::cell::RefCell;

use crate::{
    transforms::transform::Transform,
    verification::{
        dual::Dual,
        errors::{VerifyError, VerifyResult},
    },
};

/// Projection applied to `backward`'s output before differentiating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparable {
    /// Use every output coordinate.
    #[default]
    Identity,
    /// Drop the last output coordinate.
    DropLast,
}

impl Comparable {
    fn project<T: Copy>(self, out: Vec<T>) -> Vec<T> {
        match self {
            Comparable::Identity => out,
            Comparable::DropLast => {
                let keep = out.len().saturating_sub(1);
                out.into_iter().take(keep).collect()
            }
        }
    }
}

/// How the Jacobian is reduced to a log-determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JacobianMode {
    /// `ln |J_ii|` per coordinate, shaped like `y`.
    Elementwise,
    /// `ln |det J|` as a 0-d array.
    Full,
}

/// Exact Jacobian of `transform.backward` at `y` (rows: outputs after
/// projection; columns: inputs).
///
/// # Errors
/// - [`VerifyError::NotAVector`] if `y` has more than one dimension.
/// - [`VerifyError::Transform`] if `backward` rejects `y`'s shape.
pub fn jacobian(
    transform: &Transform, y: &ArrayD<f64>, comparable: Comparable,
) -> VerifyResult<Array2<f64>> {
    if y.ndim() > 1 {
        return Err(VerifyError::NotAVector { ndim: y.ndim() });
    }
    // Scalars are differentiated as length-1 vectors.
    let flat: Array1<f64> = y.iter().copied().collect();
    let n = flat.len();
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(n);
    for j in 0..n {
        let seeded: Array1<Dual> = flat
            .iter()
            .enumerate()
            .map(|(k, &v)| if k == j { Dual::variable(v) } else { Dual::constant(v) })
            .collect();
        let out = transform.backward(seeded.into_dyn().view())?;
        let tangents: Vec<f64> = out.iter().map(|d| d.eps).collect();
        columns.push(comparable.project(tangents));
    }
    let m = match columns.first() {
        Some(col) => col.len(),
        None => {
            let out = transform.backward(flat.into_dyn().view())?;
            comparable.project(out.iter().copied().collect()).len()
        }
    };
    Ok(Array2::from_shape_fn((m, n), |(i, j)| columns[j][i]))
}

/// `ln |det|` (or per-coordinate `ln |diag|`) of the exact Jacobian.
///
/// # Errors
/// - Everything [`jacobian`] returns.
/// - [`VerifyError::NonSquareJacobian`] if the projected Jacobian is not
///   square.
pub fn log_jacobian_det(
    transform: &Transform, y: &ArrayD<f64>, comparable: Comparable, mode: JacobianMode,
) -> VerifyResult<ArrayD<f64>> {
    let jac = jacobian(transform, y, comparable)?;
    match mode {
        JacobianMode::Elementwise => {
            ensure_square(&jac)?;
            let diag = jac.diag().mapv(|d| d.abs().ln());
            if y.ndim() == 0 {
                Ok(arr0(diag.sum()).into_dyn())
            } else {
                Ok(diag.into_dyn())
            }
        }
        JacobianMode::Full => Ok(arr0(log_abs_det(&jac)?).into_dyn()),
    }
}

/// `ln |det J|` of a square matrix.
///
/// # Errors
/// - [`VerifyError::NonSquareJacobian`] for non-square input.
pub fn log_abs_det(jac: &Array2<f64>) -> VerifyResult<f64> {
    ensure_square(jac)?;
    Ok(fill_dmatrix(jac).determinant().abs().ln())
}

/// Central finite-difference Jacobian of `transform.backward` at `y`,
/// after projection, in the same (outputs × inputs) layout as [`jacobian`].
///
/// # Errors
/// - [`VerifyError::NonSquareJacobian`] if the projected output length
///   differs from `y.len()`.
/// - [`VerifyError::Transform`] captured from inside the differencing
///   closure.
pub fn fd_jacobian(
    transform: &Transform, y: &Array1<f64>, comparable: Comparable,
) -> VerifyResult<Array2<f64>> {
    let n = y.len();
    let sample = transform.backward(y.view().into_dyn())?;
    let m = comparable.project(sample.iter().copied().collect()).len();
    if m != n {
        return Err(VerifyError::NonSquareJacobian { rows: m, cols: n });
    }

    let closure_err: RefCell<Option<VerifyError>> = RefCell::new(None);
    let fs = |v: &Array1<f64>| -> Array1<f64> {
        match transform.backward(v.view().into_dyn()) {
            Ok(x) => Array1::from(comparable.project(x.iter().copied().collect())),
            Err(err) => {
                closure_err.replace(Some(err.into()));
                Array1::from_elem(n, f64::NAN)
            }
        }
    };
    let jac = y.central_jacobian(&fs);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    // finitediff lays rows out per input coordinate.
    Ok(jac.reversed_axes())
}

fn ensure_square(jac: &Array2<f64>) -> VerifyResult<()> {
    if jac.nrows() != jac.ncols() {
        return Err(VerifyError::NonSquareJacobian { rows: jac.nrows(), cols: jac.ncols() });
    }
    Ok(())
}

/// Copy an `ndarray` matrix into a `nalgebra::DMatrix`.
fn fill_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}
