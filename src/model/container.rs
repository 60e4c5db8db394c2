//! model::container — registry of random variables and joint log-probability.
//!
//! Purpose
//! -------
//! Provide just enough of a probabilistic model to check that transforms
//! compose into a correct log-density: register Normal variables
//! (optionally transformed), produce a test point in sampling space, and
//! evaluate the joint log-probability at any point.
//!
//! Key behaviors
//! -------------
//! - Variables are kept in registration order; points are keyed by value
//!   name in a `BTreeMap`.
//! - `logp` sums each variable's contribution, including log-Jacobians of
//!   transformed variables.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both plain names and value names are unique across the model.
use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::{
    model::{
        errors::{ModelError, ModelResult},
        variable::NormalVariable,
    },
    transforms::transform::Transform,
};

/// Values keyed by value name.
pub type Point = BTreeMap<String, ArrayD<f64>>;

#[derive(Debug, Clone, Default)]
pub struct Model {
    vars: Vec<NormalVariable>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name ~ Normal(mu, sigma)` of the given shape.
    ///
    /// # Errors
    /// - [`ModelError::DuplicateVariable`] if `name` or its value name is
    ///   already taken.
    /// - Everything [`NormalVariable::new`] returns.
    pub fn add_normal(
        &mut self, name: &str, mu: f64, sigma: f64, shape: &[usize], transform: Option<Transform>,
        testval: ArrayD<f64>,
    ) -> ModelResult<&NormalVariable> {
        let var = NormalVariable::new(name, mu, sigma, shape, transform, testval)?;
        let taken = |n: &str| self.vars.iter().any(|v| v.name() == n || v.value_name() == n);
        for candidate in [var.name(), var.value_name()] {
            if taken(candidate) {
                return Err(ModelError::DuplicateVariable { name: candidate.to_string() });
            }
        }
        self.vars.push(var);
        Ok(&self.vars[self.vars.len() - 1])
    }

    pub fn variables(&self) -> &[NormalVariable] {
        &self.vars
    }

    /// Look up a variable by plain name.
    pub fn variable(&self, name: &str) -> Option<&NormalVariable> {
        self.vars.iter().find(|v| v.name() == name)
    }

    /// Test value of every variable, in sampling space.
    ///
    /// # Errors
    /// - [`ModelError::Transform`] from a forward map.
    pub fn test_point(&self) -> ModelResult<Point> {
        self.vars
            .iter()
            .map(|v| v.test_value().map(|y| (v.value_name().to_string(), y)))
            .collect()
    }

    /// Joint log-probability at `point`.
    ///
    /// # Errors
    /// - [`ModelError::MissingVariable`] if `point` lacks a value name.
    /// - Everything [`NormalVariable::logp`] returns.
    pub fn logp(&self, point: &Point) -> ModelResult<f64> {
        let mut total = 0.0;
        for var in &self.vars {
            let y = point
                .get(var.value_name())
                .ok_or_else(|| ModelError::MissingVariable { name: var.value_name().to_string() })?;
            total += var.logp(y)?;
        }
        Ok(total)
    }
}
