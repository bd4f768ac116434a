//! # boltzmann-rs: exact inference and spike-train statistics for Boltzmann machines
//!
//! **`boltzmann-rs`** computes statistical properties of networks of binary stochastic units
//! coupled through pairwise weights and biases (a Boltzmann/Ising-style energy model), and turns
//! simulated spike recordings of such networks into directly comparable statistics.
//!
//! ## What does it compute?
//!
//! On the theory side, the crate enumerates the joint state space exactly: partition functions,
//! per-unit marginals, and the full joint distribution, all derived from the unnormalized
//! Boltzmann weight `exp(½ sᵀWs + bᵀs)` of each binary state. On the empirical side, an
//! event-driven simulator replays a spike recording with per-unit refractory dynamics and
//! accumulates the time each joint state was occupied, plus pairwise activity correlations with a
//! configurable warm-up. A grid resampler and a lag autocorrelation helper round out the toolkit.
//!
//! ## Key properties
//!
//! - **Exact, not approximate**: inference sums over all `2^N` states. This is exponential by
//!   nature and intended for small networks; the crate documents the blow-up instead of capping it.
//! - **Deterministic order**: enumeration, joint tensors, and occupancy histograms all share one
//!   most-significant-bit-first state encoding, so outputs line up entry by entry.
//! - **Fail fast**: every operation validates shapes and orderings up front and returns a
//!   descriptive [`Error`][crate::error::Error]; nothing is silently fixed or partially computed.
//! - **No global state**: every call is a pure function of its inputs, with one scratch buffer
//!   owned for the duration of the call.
//!
//! ## Basic usage
//!
//! ```rust
//! use boltzmann_rs::energy::EnergyModel;
//! use boltzmann_rs::matrix::Matrix;
//!
//! // 1. Two units with a single symmetric coupling
//! let weights = Matrix::from_rows(vec![
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//! ]).unwrap();
//! let model = EnergyModel::new(weights, vec![0.0, 0.0]).unwrap();
//!
//! // 2. Exact statistics by full enumeration
//! let z = model.partition();                     // 3 + e
//! let joint = model.joint();                     // 2-axis binary tensor
//! let marginals = model.marginals(&[0, 1]).unwrap();
//!
//! assert!((joint.sum() - 1.0).abs() < 1e-12);
//! assert!((marginals[0] - joint.axis_marginal(0)).abs() < 1e-12);
//! # let _ = z;
//! ```
//!
//! ```rust
//! use boltzmann_rs::simulator::joint_occupancy;
//! use boltzmann_rs::spikes::SpikeRecord;
//!
//! // One unit, one spike at t = 0, refractory for 1 of 3 time units.
//! let record = SpikeRecord::new(vec![0], vec![0.0]).unwrap();
//! let occupancy = joint_occupancy(&record, &[0], &[1.0], 3.0).unwrap();
//!
//! assert!((occupancy.get(&[1]) - 1.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! ## Core components
//!
//! - **[`state`]**: binary state vectors and clamped enumeration over the free dimensions.
//! - **[`energy`]**: the Boltzmann probability weight of a state.
//! - **[`inference`]**: partition functions, marginals, and joint distributions by enumeration.
//! - **[`simulator`]**: the event-driven loop turning spikes into occupancy and correlations.
//! - **[`sampler`]**: resampling a spike recording onto a regular grid.

pub mod autocorr;
pub mod bitgrid;
pub mod energy;
pub mod error;
pub mod inference;
pub mod matrix;
pub mod sampler;
pub mod simulator;
pub mod spikes;
pub mod state;
pub mod tensor;
