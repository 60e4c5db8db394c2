//! domains::domain — fixture container and combinators.
//!
//! A [`Domain`] is an ordered list of representative values for one
//! mathematical set, together with that set's edges. Edges are kept for
//! reference but excluded from `vals`, since they usually sit on the
//! boundary where a transform is undefined.
use ndarray::{ArrayD, Dimension, IxDyn, arr0};
use std::ops::{Add, Mul, Neg};

use crate::domains::errors::{DomainError, DomainResult};

/// Representative values for a domain category.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// Interior fixture values, in order.
    pub vals: Vec<ArrayD<f64>>,
    /// Lower edge, when the domain has one.
    pub lower: Option<ArrayD<f64>>,
    /// Upper edge, when the domain has one.
    pub upper: Option<ArrayD<f64>>,
    /// Shape shared by every value (`[]` for scalars).
    pub shape: Vec<usize>,
}

impl Domain {
    /// Scalar domain from a literal list whose first and last entries are
    /// the edges.
    ///
    /// Lists shorter than three entries have no interior and produce an
    /// empty domain with the given edges.
    pub fn scalar(with_edges: &[f64]) -> Self {
        let n = with_edges.len();
        let lower = with_edges.first().map(|&v| arr0(v).into_dyn());
        let upper = with_edges.last().map(|&v| arr0(v).into_dyn());
        let vals = if n > 2 {
            with_edges[1..n - 1].iter().map(|&v| arr0(v).into_dyn()).collect()
        } else {
            Vec::new()
        };
        Domain { vals, lower, upper, shape: Vec::new() }
    }

    /// Domain from explicit values with no edges; the shape is taken from
    /// the first value.
    ///
    /// # Errors
    /// - [`DomainError::ShapeMismatch`] for the first value whose shape
    ///   differs from the first value's.
    pub fn from_values(vals: Vec<ArrayD<f64>>) -> DomainResult<Self> {
        let domain = Self::from_uniform_values(vals);
        let mismatch = domain.iter().enumerate().find(|(_, v)| v.shape() != domain.shape);
        if let Some((index, v)) = mismatch {
            return Err(DomainError::ShapeMismatch {
                index,
                expected: domain.shape.clone(),
                found: v.shape().to_vec(),
            });
        }
        Ok(domain)
    }

    /// [`Domain::from_values`] for values already known to share a shape.
    pub(crate) fn from_uniform_values(vals: Vec<ArrayD<f64>>) -> Self {
        let shape = vals.first().map(|v| v.shape().to_vec()).unwrap_or_default();
        Domain { vals, lower: None, upper: None, shape }
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// `true` for 0-d values.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArrayD<f64>> {
        self.vals.iter()
    }

    /// Cartesian product of `n` copies of this domain.
    ///
    /// Each product value stacks its `n` factors along a new leading axis,
    /// so scalars lift to length-`n` vectors and vectors to `(n, k)`
    /// matrices. The first factor varies slowest.
    pub fn product(&self, n: usize) -> Domain {
        let mut combos: Vec<Vec<&ArrayD<f64>>> = vec![Vec::new()];
        for _ in 0..n {
            combos = combos
                .into_iter()
                .flat_map(|prefix| {
                    self.vals.iter().map(move |v| {
                        let mut next = prefix.clone();
                        next.push(v);
                        next
                    })
                })
                .collect();
        }
        let mut shape = vec![n];
        shape.extend_from_slice(&self.shape);
        let vals = if self.vals.is_empty() {
            Vec::new()
        } else {
            combos.iter().map(|parts| stack(parts, &shape)).collect()
        };
        let lift = |edge: &Option<ArrayD<f64>>| edge.as_ref().map(|e| stack(&vec![e; n], &shape));
        let (lower, upper) = (lift(&self.lower), lift(&self.upper));
        Domain { vals, lower, upper, shape }
    }
}

/// Stack equally-shaped parts along a new leading axis.
fn stack(parts: &[&ArrayD<f64>], shape: &[usize]) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(shape), |idx| {
        let idx = idx.slice();
        parts[idx[0]][IxDyn(&idx[1..])]
    })
}

impl Mul<f64> for Domain {
    type Output = Domain;

    /// Scale every value and edge; a negative factor swaps the edges.
    fn mul(self, c: f64) -> Domain {
        let scale = |a: ArrayD<f64>| a * c;
        let (lower, upper) = (self.lower.map(scale), self.upper.map(scale));
        let (lower, upper) = if c < 0.0 { (upper, lower) } else { (lower, upper) };
        Domain { vals: self.vals.into_iter().map(scale).collect(), lower, upper, shape: self.shape }
    }
}

impl Add<f64> for Domain {
    type Output = Domain;

    fn add(self, c: f64) -> Domain {
        let shift = |a: ArrayD<f64>| a + c;
        Domain {
            vals: self.vals.into_iter().map(shift).collect(),
            lower: self.lower.map(shift),
            upper: self.upper.map(shift),
            shape: self.shape,
        }
    }
}

impl Neg for Domain {
    type Output = Domain;

    fn neg(self) -> Domain {
        self * -1.0
    }
}
