//! Boltzmann energy model over binary units.
//!
//! An [`EnergyModel`] bundles a pairwise coupling matrix and a per-unit bias
//! vector and evaluates the unnormalized Boltzmann probability weight
//!
//! ```text
//! w(s) = exp( Σ_i Σ_j 0.5 · s_i · W_ij · s_j + Σ_i s_i · b_i )
//! ```
//!
//! for a binary state `s ∈ {0,1}^N`. Normalization is up to the caller,
//! typically by dividing by a partition function from
//! [`inference`][crate::inference].
//!
//! # Conventions
//!
//! The weight matrix is symmetric by convention with a zero diagonal; neither
//! is enforced. A nonzero diagonal entry `W_ii` simply contributes
//! `0.5 · W_ii` to the effective bias of unit `i`.
//!
//! # Numerics
//!
//! There is no internal guard against `exp` overflow. Callers are expected to
//! keep couplings and biases in a range where the exponent stays
//! representable; a saturated weight propagates as `inf` through downstream
//! sums.

use log::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::state::StateVector;

/// A pairwise-coupled binary network: weights, biases, and the energy they
/// induce.
///
/// Shape preconditions are checked once at construction, so every later
/// evaluation can assume consistent dimensions.
#[derive(Debug, Clone)]
pub struct EnergyModel {
    weights: Matrix,
    biases: Vec<f64>,
}

impl EnergyModel {
    /// Creates a model from an `N×N` coupling matrix and a length-`N` bias
    /// vector.
    ///
    /// Fails with [`Error::ShapeMismatch`] if the matrix is not square or the
    /// bias length does not match.
    pub fn new(weights: Matrix, biases: Vec<f64>) -> Result<Self> {
        if !weights.is_square() {
            return Err(Error::ShapeMismatch {
                what: "weight matrix columns",
                expected: weights.rows(),
                actual: weights.cols(),
            });
        }
        if biases.len() != weights.rows() {
            return Err(Error::ShapeMismatch {
                what: "bias vector",
                expected: weights.rows(),
                actual: biases.len(),
            });
        }
        debug!("EnergyModel over {} units", weights.rows());
        Ok(Self { weights, biases })
    }

    /// Number of units.
    #[inline]
    pub fn num_units(&self) -> usize {
        self.biases.len()
    }

    /// The coupling matrix.
    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// The bias vector.
    #[inline]
    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Unnormalized Boltzmann probability weight of `state`.
    ///
    /// Pure, `O(N²)`. Only active units contribute, so the inner loop runs
    /// over the rows of active units only.
    ///
    /// # Panics
    ///
    /// Panics if `state.len()` differs from the model dimension.
    pub fn probability_weight(&self, state: &StateVector) -> f64 {
        assert_eq!(
            state.len(),
            self.num_units(),
            "state length must match model dimension"
        );

        let bits = state.bits();
        let mut exponent = 0.0;
        for (i, &si) in bits.iter().enumerate() {
            if si == 0 {
                continue;
            }
            let row = self.weights.row(i);
            let mut coupling = 0.0;
            for (j, &sj) in bits.iter().enumerate() {
                if sj != 0 {
                    coupling += row[j];
                }
            }
            exponent += 0.5 * coupling + self.biases[i];
        }
        exponent.exp()
    }
}
