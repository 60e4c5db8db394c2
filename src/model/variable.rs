//! model::variable — a Normal random variable with an optional transform.
//!
//! A [`NormalVariable`] owns its `statrs` distribution, declared shape,
//! test value and transform. When transformed, the variable is represented
//! in unconstrained space under its value name `"{name}_{transform}__"`
//! and its log-density picks up the transform's log-Jacobian.
use ndarray::ArrayD;
use statrs::distribution::{Continuous, Normal};

use crate::{
    model::errors::{ModelError, ModelResult},
    transforms::transform::Transform,
};

#[derive(Debug, Clone)]
pub struct NormalVariable {
    name: String,
    value_name: String,
    dist: Normal,
    shape: Vec<usize>,
    transform: Option<Transform>,
    testval: ArrayD<f64>,
}

impl NormalVariable {
    /// Build and validate a variable.
    ///
    /// # Errors
    /// - [`ModelError::MeanInvalid`] / [`ModelError::StdDevInvalid`] from
    ///   `statrs`.
    /// - [`ModelError::TestvalShapeMismatch`] if `testval` is not of
    ///   `shape`.
    /// - [`ModelError::Transform`] if the transform cannot act on `shape`.
    pub fn new(
        name: &str, mu: f64, sigma: f64, shape: &[usize], transform: Option<Transform>,
        testval: ArrayD<f64>,
    ) -> ModelResult<Self> {
        let dist = Normal::new(mu, sigma)?;
        if testval.shape() != shape {
            return Err(ModelError::TestvalShapeMismatch {
                name: name.to_string(),
                expected: shape.to_vec(),
                found: testval.shape().to_vec(),
            });
        }
        if let Some(t) = &transform {
            t.forward_val(&testval)?;
        }
        let value_name = match &transform {
            Some(t) => transformed_name(name, t),
            None => name.to_string(),
        };
        Ok(Self { name: name.to_string(), value_name, dist, shape: shape.to_vec(), transform, testval })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key under which this variable appears in a point.
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Test value in the space the variable is sampled in.
    ///
    /// # Errors
    /// - [`ModelError::Transform`] from the forward map.
    pub fn test_value(&self) -> ModelResult<ArrayD<f64>> {
        match &self.transform {
            Some(t) => Ok(t.forward_val(&self.testval)?),
            None => Ok(self.testval.clone()),
        }
    }

    /// Log-density contribution of the (possibly unconstrained) value `y`.
    ///
    /// `Σ ln N(x_i | mu, sigma)` with `x = backward(y)`, plus
    /// `Σ jacobian_det(y)` when transformed.
    ///
    /// # Errors
    /// - [`ModelError::ValueShapeMismatch`] if `x` is not of the declared
    ///   shape.
    /// - [`ModelError::Transform`] from the backward map.
    pub fn logp(&self, y: &ArrayD<f64>) -> ModelResult<f64> {
        let (x, log_jac) = match &self.transform {
            Some(t) => (t.backward(y.view())?, t.jacobian_det(y.view())?.sum()),
            None => (y.clone(), 0.0),
        };
        if x.shape() != self.shape.as_slice() {
            return Err(ModelError::ValueShapeMismatch {
                name: self.value_name.clone(),
                expected: self.shape.clone(),
                found: x.shape().to_vec(),
            });
        }
        let log_density: f64 = x.iter().map(|&v| self.dist.ln_pdf(v)).sum();
        Ok(log_density + log_jac)
    }
}

/// `"{name}_{transform}__"`.
pub fn transformed_name(name: &str, transform: &Transform) -> String {
    format!("{name}_{}__", transform.name())
}
