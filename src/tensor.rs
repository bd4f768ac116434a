//! Joint distributions as flat binary tensors.
//!
//! A [`JointTensor`] stores one real value per joint state of `k` binary
//! units: conceptually a tensor with `k` axes of size 2, physically a single
//! contiguous buffer of length `2^k`. Axis `i` corresponds to unit `i`; the
//! flat index packs axis values most significant bit first, so axis 0 selects
//! the top half of the buffer. This matches the enumeration order of
//! [`StateVector::advance`][crate::state::StateVector::advance] and the
//! histogram indexing of the event-driven simulator.

use crate::error::{Error, Result};

/// A `k`-axis binary tensor over a flat `2^k` buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct JointTensor {
    data: Vec<f64>,
    axes: usize,
}

impl JointTensor {
    /// Creates an all-zero tensor with `axes` binary axes.
    pub fn zeros(axes: usize) -> Self {
        Self {
            data: vec![0.0; 1 << axes],
            axes,
        }
    }

    /// Wraps a flat buffer of length `2^axes`.
    ///
    /// Fails with [`Error::ShapeMismatch`] on a length mismatch.
    pub fn from_flat(data: Vec<f64>, axes: usize) -> Result<Self> {
        if data.len() != 1 << axes {
            return Err(Error::ShapeMismatch {
                what: "joint tensor buffer",
                expected: 1 << axes,
                actual: data.len(),
            });
        }
        Ok(Self { data, axes })
    }

    /// Number of binary axes.
    #[inline]
    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Total number of entries, `2^axes`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the tensor has zero axes (a single scalar entry still
    /// counts as non-empty data, so this is only about axes).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axes == 0
    }

    /// Borrows the flat buffer, in MSB-first state order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Flat index of a joint state given one 0/1 value per axis.
    ///
    /// # Panics
    ///
    /// Panics if `bits.len() != axes` or any value exceeds 1.
    #[inline]
    pub fn index_of(&self, bits: &[u8]) -> usize {
        assert_eq!(bits.len(), self.axes, "one value per axis required");
        let mut idx = 0usize;
        for &bit in bits {
            assert!(bit <= 1, "axis values must be 0 or 1");
            idx = (idx << 1) | bit as usize;
        }
        idx
    }

    /// Entry for the joint state given by `bits`.
    #[inline]
    pub fn get(&self, bits: &[u8]) -> f64 {
        self.data[self.index_of(bits)]
    }

    /// Mutable entry for the joint state given by `bits`.
    #[inline]
    pub fn get_mut(&mut self, bits: &[u8]) -> &mut f64 {
        let idx = self.index_of(bits);
        &mut self.data[idx]
    }

    /// Sum of all entries.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Sum of all entries where the given axis is 1.
    ///
    /// For a normalized tensor this is the marginal probability of that unit
    /// being active.
    pub fn axis_marginal(&self, axis: usize) -> f64 {
        assert!(axis < self.axes, "axis out of range");
        let bit = 1usize << (self.axes - 1 - axis);
        self.data
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx & bit != 0)
            .map(|(_, &v)| v)
            .sum()
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.data {
            *value *= factor;
        }
    }
}
