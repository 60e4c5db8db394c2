//! domains::catalog — the named fixture sets.
//!
//! Scalar categories are literal lists whose first and last entries are
//! the edges; vector and matrix categories are built from them by
//! Cartesian product, recursive stick construction (simplices) or seeded
//! sampling (sorted vectors).
use ndarray::{Array1, ArrayD};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

use crate::domains::domain::Domain;

/// Seed for the sampled fixture categories.
pub const FIXTURE_SEED: u64 = 42;

/// Number of draws in [`sorted_vector`].
pub const SORTED_SAMPLES: usize = 10;

/// All reals.
pub fn r() -> Domain {
    Domain::scalar(&[f64::NEG_INFINITY, -2.1, -1.0, -0.01, 0.0, 0.01, 1.0, 2.1, f64::INFINITY])
}

/// Positive reals, including values close to zero and moderately large.
pub fn rplus() -> Domain {
    Domain::scalar(&[0.0, 0.01, 0.1, 0.9, 0.99, 1.0, 1.5, 2.0, 100.0, f64::INFINITY])
}

/// Positive reals kept away from zero.
pub fn rplusbig() -> Domain {
    Domain::scalar(&[0.0, 0.5, 0.9, 0.99, 1.0, 1.5, 2.0, 20.0, f64::INFINITY])
}

/// Negative reals kept away from large magnitudes.
pub fn rminusbig() -> Domain {
    Domain::scalar(&[f64::NEG_INFINITY, -2.0, -1.5, -1.0, -0.99, -0.9, -0.5, -0.01, 0.0])
}

/// Open unit interval.
pub fn unit() -> Domain {
    Domain::scalar(&[0.0, 0.001, 0.1, 0.5, 0.75, 0.99, 1.0])
}

/// Angles strictly inside (-π, π).
pub fn circ() -> Domain {
    Domain::scalar(&[-PI, -2.1, -1.0, -0.01, 0.0, 0.01, 1.0, 2.1, PI])
}

/// Length-`n` vectors whose coordinates range over `d` independently.
pub fn vector(d: &Domain, n: usize) -> Domain {
    d.product(n)
}

/// Points of the `n`-simplex built by breaking a unit stick.
///
/// `simplex(1) = {[1]}`; otherwise each value is `[v, (1 - v)·s]` for
/// `v` in [`unit`] and `s` in `simplex(n - 1)`. `simplex(0)` is empty.
pub fn simplex(n: usize) -> Domain {
    Domain::from_uniform_values(simplex_values(n).into_iter().map(|v| v.into_dyn()).collect())
}

fn simplex_values(n: usize) -> Vec<Array1<f64>> {
    match n {
        0 => Vec::new(),
        1 => vec![Array1::from(vec![1.0])],
        _ => {
            let tails = simplex_values(n - 1);
            let mut out = Vec::with_capacity(unit().len() * tails.len());
            for head in unit().iter().map(|v| v.sum()) {
                for tail in tails.iter() {
                    let mut point = Vec::with_capacity(n);
                    point.push(head);
                    point.extend(tail.iter().map(|t| (1.0 - head) * t));
                    out.push(Array1::from(point));
                }
            }
            out
        }
    }
}

/// `(n_independent, n_dependent)` matrices whose rows are simplex points.
pub fn multi_simplex(n_dependent: usize, n_independent: usize) -> Domain {
    simplex(n_dependent).product(n_independent)
}

/// Sorted standard-normal draws of length `n`, seeded for reproducibility.
pub fn sorted_vector(n: usize) -> Domain {
    let mut rng = StdRng::seed_from_u64(FIXTURE_SEED);
    let vals: Vec<ArrayD<f64>> = (0..SORTED_SAMPLES)
        .map(|_| {
            let mut draw: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
            draw.sort_by(|a, b| a.total_cmp(b));
            Array1::from(draw).into_dyn()
        })
        .collect();
    Domain::from_uniform_values(vals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every scalar category lies strictly between its edges.
    // - Simplex fixtures sum to one with positive coordinates.
    // - Matrix and sorted-vector fixtures have the documented shapes and
    //   orderings.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify every scalar category stays strictly inside its edges.
    //
    // Given
    // -----
    // - All named scalar domains.
    //
    // Expect
    // ------
    // - `lower < v < upper` for every interior value.
    fn scalar_categories_lie_inside_their_edges() {
        for d in [r(), rplus(), rplusbig(), rminusbig(), unit(), circ()] {
            let lo = d.lower.as_ref().map(|e| e.sum()).unwrap_or(f64::NEG_INFINITY);
            let hi = d.upper.as_ref().map(|e| e.sum()).unwrap_or(f64::INFINITY);
            assert!(!d.is_empty());
            for v in d.iter() {
                let v = v.sum();
                assert!(lo < v && v < hi, "{v} outside ({lo}, {hi})");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check simplex fixtures.
    //
    // Given
    // -----
    // - `simplex(1)`, `simplex(2)`, `simplex(4)`.
    //
    // Expect
    // ------
    // - Sizes 1, 5, 125; every point sums to one with positive entries.
    fn simplex_points_sum_to_one() {
        assert_eq!(simplex(1).len(), 1);
        assert_eq!(simplex(2).len(), 5);
        let s4 = simplex(4);
        assert_eq!(s4.len(), 125);
        assert_eq!(s4.shape, vec![4]);
        for v in s4.iter() {
            assert_relative_eq!(v.sum(), 1.0, epsilon = 1e-12);
            assert!(v.iter().all(|&c| c > 0.0));
        }
        assert!(simplex(0).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Verify the matrix and sampled fixtures.
    //
    // Given
    // -----
    // - `multi_simplex(3, 2)` and `sorted_vector(6)`.
    //
    // Expect
    // ------
    // - 625 matrices of shape (2, 3); ten non-decreasing length-6 vectors,
    //   identical across calls.
    fn matrix_and_sorted_fixtures_have_expected_shapes() {
        let m = multi_simplex(3, 2);
        assert_eq!(m.len(), 625);
        assert_eq!(m.shape, vec![2, 3]);

        let s = sorted_vector(6);
        assert_eq!(s.len(), SORTED_SAMPLES);
        for v in s.iter() {
            assert_eq!(v.len(), 6);
            assert!(v.iter().zip(v.iter().skip(1)).all(|(a, b)| a <= b));
        }
        assert_eq!(s, sorted_vector(6));
    }
}
