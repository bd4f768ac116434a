//! Exact inference by state-space enumeration.
//!
//! These operations compose the enumerator from [`state`][crate::state] with
//! the weight evaluation from [`energy`][crate::energy] to compute partition
//! functions, per-unit marginals, and the full joint distribution of an
//! [`EnergyModel`]. Everything here sums over `2^free` states, so it is only
//! practical for small networks; the cost is documented, not capped.
//!
//! Each public operation allocates one scratch [`StateVector`] and reuses it
//! for the whole call; nothing is allocated per enumerated state.
//!
//! # Example
//!
//! ```
//! use boltzmann_rs::energy::EnergyModel;
//! use boltzmann_rs::matrix::Matrix;
//!
//! // Two units with a ferromagnetic coupling of 1.
//! let w = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
//! let model = EnergyModel::new(w, vec![0.0, 0.0]).unwrap();
//!
//! // Z = 3 + e: three states with zero energy plus the (1,1) state.
//! let z = model.partition();
//! assert!((z - (3.0 + 1.0f64.exp())).abs() < 1e-12);
//!
//! let joint = model.joint();
//! assert!((joint.get(&[1, 1]) - 1.0f64.exp() / z).abs() < 1e-12);
//! ```

use log::debug;

use crate::energy::EnergyModel;
use crate::error::Result;
use crate::state::{ClampSet, StateVector};
use crate::tensor::JointTensor;

impl EnergyModel {
    /// Partition function: the sum of probability weights over all `2^N`
    /// states.
    pub fn partition(&self) -> f64 {
        let clamps = ClampSet::empty(self.num_units());
        let mut state = StateVector::zeros(self.num_units());
        self.sum_weights(&mut state, &clamps)
    }

    /// Partition function restricted to the subspace where the given
    /// dimensions are clamped to the given 0/1 values.
    ///
    /// Free dimensions are reset to 0 before enumeration. Clamping every
    /// dimension is allowed and yields the weight of that single state.
    ///
    /// Fails with [`DomainViolation`][crate::error::Error::DomainViolation]
    /// on an out-of-range or duplicate index, or a value other than 0/1.
    pub fn partition_clamped(&self, fixed: &[(usize, u8)]) -> Result<f64> {
        let mut state = StateVector::zeros(self.num_units());
        self.clamped_sum(&mut state, fixed)
    }

    /// Marginal activation probabilities `P(unit = 1)` for each unit in
    /// `selected`.
    ///
    /// Each marginal is computed independently: the scratch state is wiped to
    /// all zeros and only the current unit is clamped to 1, so no clamp from
    /// a previous iteration leaks into the next. The clamped partition is
    /// then divided by the full partition.
    pub fn marginals(&self, selected: &[usize]) -> Result<Vec<f64>> {
        let z = self.partition();
        let mut state = StateVector::zeros(self.num_units());
        let mut out = Vec::with_capacity(selected.len());
        for &unit in selected {
            let constrained = self.clamped_sum(&mut state, &[(unit, 1)])?;
            out.push(constrained / z);
        }
        Ok(out)
    }

    /// Full joint distribution as an `N`-axis binary tensor.
    ///
    /// States are enumerated in the natural order of
    /// [`StateVector::advance`], weighted, and normalized by their sum. Axis
    /// `i` of the result corresponds to unit `i`, index 1 to the active
    /// state.
    pub fn joint(&self) -> JointTensor {
        let n = self.num_units();
        let clamps = ClampSet::empty(n);
        let mut state = StateVector::zeros(n);

        let mut weights = vec![0.0; 1usize << n];
        loop {
            weights[state.index()] = self.probability_weight(&state);
            if state.advance(&clamps) {
                break;
            }
        }

        let total: f64 = weights.iter().sum();
        let mut tensor = JointTensor::from_flat(weights, n)
            .expect("buffer length is 2^n by construction");
        tensor.scale(1.0 / total);
        tensor
    }

    /// Clamps the given dimensions on a wiped scratch state and sums the
    /// weights of the remaining subspace.
    fn clamped_sum(&self, state: &mut StateVector, fixed: &[(usize, u8)]) -> Result<f64> {
        let indices: Vec<usize> = fixed.iter().map(|&(i, _)| i).collect();
        let clamps = ClampSet::new(self.num_units(), &indices)?;
        state.clear();
        for &(i, value) in fixed {
            if value > 1 {
                return Err(crate::error::Error::DomainViolation(format!(
                    "clamped value for dimension {} must be 0 or 1, got {}",
                    i, value
                )));
            }
            state.set(i, value);
        }
        Ok(self.sum_weights(state, &clamps))
    }

    /// Sums probability weights over the free subspace of `state`.
    ///
    /// The caller must have zeroed the free dimensions; the sweep ends after
    /// the enumerator reports a wraparound, which for a fully clamped space
    /// happens on the first advance.
    fn sum_weights(&self, state: &mut StateVector, clamps: &ClampSet) -> f64 {
        debug!(
            "summing {} states over {} free of {} dimensions",
            clamps.num_free_states(),
            clamps.num_free(),
            clamps.dimensions()
        );
        let mut total = 0.0;
        loop {
            total += self.probability_weight(state);
            if state.advance(clamps) {
                break;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use test_log::test;

    use crate::matrix::Matrix;

    fn model(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> EnergyModel {
        EnergyModel::new(Matrix::from_rows(weights).unwrap(), biases).unwrap()
    }

    fn ferromagnetic_pair() -> EnergyModel {
        model(vec![vec![0.0, 1.0], vec![1.0, 0.0]], vec![0.0, 0.0])
    }

    #[test]
    fn test_partition_ferromagnetic_pair() {
        // Z = exp(0) + exp(0) + exp(0) + exp(1) = 3 + e.
        let z = ferromagnetic_pair().partition();
        assert_abs_diff_eq!(z, 3.0 + 1.0f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_joint_ferromagnetic_pair() {
        let z = 3.0 + 1.0f64.exp();
        let joint = ferromagnetic_pair().joint();
        assert_abs_diff_eq!(joint.get(&[0, 0]), 1.0 / z, epsilon = 1e-12);
        assert_abs_diff_eq!(joint.get(&[0, 1]), 1.0 / z, epsilon = 1e-12);
        assert_abs_diff_eq!(joint.get(&[1, 0]), 1.0 / z, epsilon = 1e-12);
        assert_abs_diff_eq!(joint.get(&[1, 1]), 1.0f64.exp() / z, epsilon = 1e-12);
    }

    #[test]
    fn test_joint_sums_to_one() {
        let m = model(
            vec![
                vec![0.0, 0.3, -0.7],
                vec![0.3, 0.0, 1.2],
                vec![-0.7, 1.2, 0.0],
            ],
            vec![0.4, -0.1, 0.9],
        );
        assert_abs_diff_eq!(m.joint().sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_marginal_matches_joint_axis_sum() {
        let m = model(
            vec![
                vec![0.0, 0.3, -0.7],
                vec![0.3, 0.0, 1.2],
                vec![-0.7, 1.2, 0.0],
            ],
            vec![0.4, -0.1, 0.9],
        );
        let joint = m.joint();
        let marginals = m.marginals(&[0, 1, 2]).unwrap();
        for (unit, &p) in marginals.iter().enumerate() {
            assert_abs_diff_eq!(p, joint.axis_marginal(unit), epsilon = 1e-12);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_marginals_do_not_leak_clamps_between_units() {
        // With a strong coupling, a stray clamp from the previous iteration
        // would visibly skew the next marginal.
        let m = model(vec![vec![0.0, 3.0], vec![3.0, 0.0]], vec![-1.0, 2.0]);
        let joint = m.joint();
        let marginals = m.marginals(&[0, 1]).unwrap();
        assert_abs_diff_eq!(marginals[0], joint.axis_marginal(0), epsilon = 1e-12);
        assert_abs_diff_eq!(marginals[1], joint.axis_marginal(1), epsilon = 1e-12);
    }

    #[test]
    fn test_clamped_partitions_add_up() {
        // Z = Z|x1=0 + Z|x1=1 for any dimension.
        let m = model(
            vec![vec![0.0, -0.4, 0.8], vec![-0.4, 0.0, 0.2], vec![0.8, 0.2, 0.0]],
            vec![0.1, 0.0, -0.6],
        );
        let z = m.partition();
        for unit in 0..3 {
            let low = m.partition_clamped(&[(unit, 0)]).unwrap();
            let high = m.partition_clamped(&[(unit, 1)]).unwrap();
            assert_abs_diff_eq!(z, low + high, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fully_clamped_partition_is_single_weight() {
        let m = ferromagnetic_pair();
        let z11 = m.partition_clamped(&[(0, 1), (1, 1)]).unwrap();
        assert_abs_diff_eq!(z11, 1.0f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_clamped_partition_validation() {
        let m = ferromagnetic_pair();
        assert!(m.partition_clamped(&[(2, 1)]).is_err());
        assert!(m.partition_clamped(&[(0, 2)]).is_err());
        assert!(m.partition_clamped(&[(0, 1), (0, 0)]).is_err());
    }
}
