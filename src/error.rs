//! Error types for boltzmann-rs.

use thiserror::Error;

/// Result type alias for boltzmann-rs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by precondition checks.
///
/// All operations in this crate are pure, deterministic computations, so a
/// failure is always a programming or input error, never transient. Every
/// public operation validates its shape and ordering preconditions up front
/// and fails before any computation begins; no operation returns a partially
/// computed result.
///
/// Numeric overflow of the energy exponent (coefficients large enough that
/// `exp` saturates to infinity) is deliberately *not* an error here: it is a
/// documented caller responsibility, see [`EnergyModel`][crate::energy::EnergyModel].
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed array dimensions, e.g. a non-square weight matrix or
    /// parallel sequences of different lengths.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An input value outside the domain an operation is defined on, e.g.
    /// unsorted spike times, an out-of-range unit index, or a warm-up offset
    /// that leaves no observation window.
    #[error("domain violation: {0}")]
    DomainViolation(String),
}
