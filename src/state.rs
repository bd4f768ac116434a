//! Binary state vectors and clamped enumeration.
//!
//! This module provides the machinery for walking the joint state space of a
//! network of binary units: a [`StateVector`] holding one 0/1 value per unit,
//! and a [`ClampSet`] marking the dimensions that are held constant while the
//! remaining ("free") dimensions are advanced through every combination.
//!
//! # Enumeration order
//!
//! The free dimensions form a binary counter with index `N-1` as the least
//! significant bit, so a full sweep visits states in ascending order of their
//! most-significant-bit-first integer encoding (see [`StateVector::index`]).
//! Clamped dimensions are skipped entirely: they are never read as part of the
//! carry chain and never written.
//!
//! # Example
//!
//! ```
//! use boltzmann_rs::state::{ClampSet, StateVector};
//!
//! let clamps = ClampSet::empty(3);
//! let mut state = StateVector::zeros(3);
//!
//! let mut visited = Vec::new();
//! loop {
//!     visited.push(state.index());
//!     if state.advance(&clamps) {
//!         break;
//!     }
//! }
//! assert_eq!(visited, vec![0, 1, 2, 3, 4, 5, 6, 7]);
//! ```
//!
//! # Performance
//!
//! A full sweep over `N` free dimensions costs `O(2^N · N)` in total. This is
//! inherent to exact enumeration; the crate makes no attempt to cap it.

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// A set of clamped (fixed) dimension indices.
///
/// Backed by a boolean mask for O(1) membership checks plus the sorted index
/// list for iteration. Dimensions in the set keep whatever value the caller
/// wrote into the [`StateVector`]; enumeration only touches the rest.
#[derive(Debug, Clone)]
pub struct ClampSet {
    mask: Vec<bool>,
    indices: Vec<usize>,
}

impl ClampSet {
    /// Creates an empty clamp set over `n` dimensions (everything free).
    pub fn empty(n: usize) -> Self {
        Self {
            mask: vec![false; n],
            indices: Vec::new(),
        }
    }

    /// Creates a clamp set over `n` dimensions holding the given indices.
    ///
    /// Fails with [`Error::DomainViolation`] if an index is out of range or
    /// listed twice.
    pub fn new(n: usize, clamped: &[usize]) -> Result<Self> {
        let mut mask = vec![false; n];
        for &i in clamped {
            if i >= n {
                return Err(Error::DomainViolation(format!(
                    "clamped index {} out of range for {} dimensions",
                    i, n
                )));
            }
            if mask[i] {
                return Err(Error::DomainViolation(format!(
                    "clamped index {} listed twice",
                    i
                )));
            }
            mask[i] = true;
        }
        let mut indices = clamped.to_vec();
        indices.sort_unstable();
        Ok(Self { mask, indices })
    }

    /// Total number of dimensions (free and clamped).
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.mask.len()
    }

    /// Returns true if dimension `i` is clamped.
    #[inline]
    pub fn contains(&self, i: usize) -> bool {
        self.mask[i]
    }

    /// Number of clamped dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no dimension is clamped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The clamped indices, sorted ascending.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of free (enumerable) dimensions.
    #[inline]
    pub fn num_free(&self) -> usize {
        self.mask.len() - self.indices.len()
    }

    /// Exact cardinality of the free subspace, `2^num_free`.
    ///
    /// Returned as a [`BigUint`] so the count stays exact even when it does
    /// not fit a machine word.
    pub fn num_free_states(&self) -> BigUint {
        BigUint::from(1u32) << self.num_free()
    }
}

/// An ordered sequence of binary (0/1) values, one per unit.
///
/// The vector is advanced in place by [`advance`][StateVector::advance]; all
/// other access is plain indexed reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateVector {
    bits: Vec<u8>,
}

impl StateVector {
    /// Creates an all-zero state of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self { bits: vec![0; n] }
    }

    /// Number of dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the state has no dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Value of dimension `i`.
    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        self.bits[i]
    }

    /// Sets dimension `i` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not 0 or 1.
    #[inline]
    pub fn set(&mut self, i: usize, value: u8) {
        assert!(value <= 1, "state values must be 0 or 1");
        self.bits[i] = value;
    }

    /// Borrows the raw 0/1 values.
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Resets every dimension to 0, clamped or not.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Resets the free dimensions to 0, leaving clamped values untouched.
    pub fn reset_free(&mut self, clamps: &ClampSet) {
        for i in 0..self.bits.len() {
            if !clamps.contains(i) {
                self.bits[i] = 0;
            }
        }
    }

    /// Packs the state into an integer, most significant bit first.
    ///
    /// Dimension 0 maps to bit `N-1`, dimension `N-1` to bit 0, matching the
    /// enumeration order of [`advance`][StateVector::advance].
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the state has more dimensions than an
    /// `usize` has bits.
    #[inline]
    pub fn index(&self) -> usize {
        let mut idx = 0usize;
        for &bit in &self.bits {
            idx = (idx << 1) | bit as usize;
        }
        idx
    }

    /// Advances the free dimensions to their lexicographic binary successor.
    ///
    /// Index `N-1` is the least significant free bit. Clamped dimensions are
    /// skipped by the carry chain. Returns `true` exactly when the advance
    /// rolled every free dimension from 1 back to 0, i.e. the full cycle over
    /// the free subspace has completed.
    ///
    /// If every dimension is clamped the carry has nowhere to land and the
    /// first call reports a wraparound immediately; callers enumerating such a
    /// space process the single clamped state and stop.
    pub fn advance(&mut self, clamps: &ClampSet) -> bool {
        debug_assert_eq!(self.bits.len(), clamps.dimensions());
        for i in (0..self.bits.len()).rev() {
            if clamps.contains(i) {
                continue;
            }
            if self.bits[i] == 0 {
                self.bits[i] = 1;
                return false;
            }
            self.bits[i] = 0;
        }
        true
    }
}
