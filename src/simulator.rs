//! Event-driven simulation statistics over spike recordings.
//!
//! This module converts an irregular spike recording into time-weighted
//! statistics of the joint binary state of a chosen set of units. A unit is
//! considered *active* for its refractory duration after each of its spikes;
//! the simulation advances continuous time directly from one state-changing
//! event to the next (a spike, or a refractory counter running out) instead
//! of stepping on a fixed grid.
//!
//! Two outputs share one event loop:
//!
//! - [`joint_occupancy`]: the fraction of `[0, duration]` spent in each of
//!   the `2^k` joint states, as a `k`-axis [`JointTensor`];
//! - [`pairwise_correlations`]: the `k×k` time-weighted second moment
//!   `⟨s_i s_j⟩` of the activity vector, recorded only after a warm-up offset
//!   `ignore_until`.
//!
//! The convention throughout is that the *pre-step* state occupies the
//! interval being advanced over, so each interval is credited to the state
//! the network was in when the interval began.
//!
//! # Preconditions
//!
//! The spike record must be sorted by time (asserted by
//! [`SpikeRecord::new`][crate::spikes::SpikeRecord::new]; it is never
//! re-sorted here). Selected unit ids are sorted internally, and the
//! refractory durations given alongside them are carried through that sort,
//! so `tau_refrac[i]` always refers to `selected[i]` as passed by the caller.
//! Spikes from units outside the selection are skipped; a unit id that never
//! spikes is simply never activated.

use log::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::spikes::SpikeRecord;
use crate::tensor::JointTensor;

/// Sink for time-weighted activity snapshots produced by the event loop.
trait Accumulate {
    /// Credits `dt` units of time to the given pre-step activity vector.
    fn record(&mut self, active: &[bool], dt: f64);
}

/// Histogram over the `2^k` joint states, unit at sorted position `i`
/// contributing bit `k-1-i` (most significant first).
struct OccupancyAccumulator {
    histogram: Vec<f64>,
}

impl OccupancyAccumulator {
    fn new(k: usize) -> Self {
        Self {
            histogram: vec![0.0; 1 << k],
        }
    }
}

impl Accumulate for OccupancyAccumulator {
    fn record(&mut self, active: &[bool], dt: f64) {
        let mut idx = 0usize;
        for &bit in active {
            idx = (idx << 1) | bit as usize;
        }
        self.histogram[idx] += dt;
    }
}

/// Time-weighted outer product of the 0/1 activity vector. Symmetric by
/// construction.
struct CorrelationAccumulator {
    moments: Matrix,
}

impl CorrelationAccumulator {
    fn new(k: usize) -> Self {
        Self {
            moments: Matrix::zeros(k, k),
        }
    }
}

impl Accumulate for CorrelationAccumulator {
    fn record(&mut self, active: &[bool], dt: f64) {
        for (i, &ai) in active.iter().enumerate() {
            if !ai {
                continue;
            }
            for (j, &aj) in active.iter().enumerate() {
                if aj {
                    self.moments[(i, j)] += dt;
                }
            }
        }
    }
}

/// Time-weighted joint occupancy distribution of the selected units.
///
/// Runs the event loop over `[0, duration]` and returns the accumulated
/// state histogram divided by `duration`, shaped as a `k`-axis binary tensor
/// whose axis `i` corresponds to the `i`-th selected unit in ascending id
/// order. The entries sum to 1 up to floating-point error.
///
/// `tau_refrac[i]` is the refractory duration of `selected[i]`.
pub fn joint_occupancy(
    record: &SpikeRecord,
    selected: &[usize],
    tau_refrac: &[f64],
    duration: f64,
) -> Result<JointTensor> {
    let (units, taus) = prepare(selected, tau_refrac, duration)?;
    let k = units.len();

    let mut acc = OccupancyAccumulator::new(k);
    run_event_loop(record, &units, &taus, duration, 0.0, &mut acc);

    let mut tensor = JointTensor::from_flat(acc.histogram, k)
        .expect("histogram length is 2^k by construction");
    tensor.scale(1.0 / duration);
    Ok(tensor)
}

/// Time-weighted pairwise correlation matrix `⟨s_i s_j⟩` of the selected
/// units, ignoring everything before `ignore_until`.
///
/// The warm-up is honored exactly: a step that would cross `ignore_until` is
/// clipped to land on it, and a spike coinciding with that crossing is
/// deferred to the next iteration rather than dropped. The accumulated
/// matrix is divided by the observation window `duration - ignore_until`.
///
/// Fails with [`Error::DomainViolation`] if `ignore_until` is negative or
/// leaves no observation window (`ignore_until >= duration`).
pub fn pairwise_correlations(
    record: &SpikeRecord,
    selected: &[usize],
    tau_refrac: &[f64],
    duration: f64,
    ignore_until: f64,
) -> Result<Matrix> {
    let (units, taus) = prepare(selected, tau_refrac, duration)?;
    if !(0.0..duration).contains(&ignore_until) {
        return Err(Error::DomainViolation(format!(
            "ignore_until must lie in [0, duration), got {} with duration {}",
            ignore_until, duration
        )));
    }
    let k = units.len();

    let mut acc = CorrelationAccumulator::new(k);
    run_event_loop(record, &units, &taus, duration, ignore_until, &mut acc);

    let mut moments = acc.moments;
    moments.scale(1.0 / (duration - ignore_until));
    Ok(moments)
}

/// Validates the shared inputs and returns the selection sorted by unit id
/// with the refractory durations permuted alongside.
fn prepare(selected: &[usize], tau_refrac: &[f64], duration: f64) -> Result<(Vec<usize>, Vec<f64>)> {
    if tau_refrac.len() != selected.len() {
        return Err(Error::ShapeMismatch {
            what: "refractory durations",
            expected: selected.len(),
            actual: tau_refrac.len(),
        });
    }
    if duration <= 0.0 {
        return Err(Error::DomainViolation(format!(
            "duration must be positive, got {}",
            duration
        )));
    }
    for (&unit, &tau) in selected.iter().zip(tau_refrac) {
        if tau < 0.0 {
            return Err(Error::DomainViolation(format!(
                "refractory duration for unit {} must be non-negative, got {}",
                unit, tau
            )));
        }
    }

    let mut pairs: Vec<(usize, f64)> = selected
        .iter()
        .copied()
        .zip(tau_refrac.iter().copied())
        .collect();
    pairs.sort_by_key(|&(unit, _)| unit);
    for window in pairs.windows(2) {
        if window[0].0 == window[1].0 {
            return Err(Error::DomainViolation(format!(
                "unit {} selected twice",
                window[0].0
            )));
        }
    }
    Ok(pairs.into_iter().unzip())
}

/// The discrete-event loop shared by both output variants.
///
/// `units` must be sorted ascending with `taus` aligned to it. Statistics
/// are recorded only while `current_time >= ignore_until`; passing 0 records
/// the whole run. Spikes past `duration` are never reached and do not affect
/// the accumulated time.
fn run_event_loop<A: Accumulate>(
    record: &SpikeRecord,
    units: &[usize],
    taus: &[f64],
    duration: f64,
    ignore_until: f64,
    acc: &mut A,
) {
    let k = units.len();
    let ids = record.ids();
    let times = record.times();
    let is_selected = |id: usize| units.binary_search(&id).is_ok();

    debug!(
        "event loop: {} units, {} spikes, duration {}, warm-up {}",
        k,
        record.len(),
        duration,
        ignore_until
    );

    // Remaining active time per unit; a unit is active while its counter is
    // strictly positive. Counters may go negative between events.
    let mut tau_sampler = vec![0.0f64; k];
    let mut active = vec![false; k];
    let mut current_time = 0.0f64;

    let mut cursor = 0;
    while cursor < ids.len() && !is_selected(ids[cursor]) {
        cursor += 1;
    }

    while current_time < duration {
        let next_inactivation = tau_sampler
            .iter()
            .filter(|&&tau| tau > 0.0)
            .fold(f64::INFINITY, |acc, &tau| acc.min(tau));

        // A spike past the end of the run can never fire within the window,
        // so it counts as "none remain".
        let spike_pending = cursor < ids.len() && times[cursor] <= duration;
        let next_spike = if spike_pending {
            times[cursor] - current_time
        } else {
            duration - current_time
        };

        // Spike wins only on strict inequality; ties go to the inactivation.
        let mut time_step = next_inactivation.min(next_spike);
        let mut spike_event = spike_pending && next_inactivation > next_spike;

        // Clip the step to land exactly on the warm-up boundary. A spike
        // coinciding with the crossing is deferred, not skipped: the cursor
        // stays put and the spike fires on the next iteration.
        if current_time < ignore_until {
            let to_boundary = ignore_until - current_time;
            if to_boundary < time_step {
                time_step = to_boundary;
                spike_event = false;
            }
        }

        // The pre-step state occupies the interval being advanced over.
        if current_time >= ignore_until {
            for (slot, &tau) in active.iter_mut().zip(&tau_sampler) {
                *slot = tau > 0.0;
            }
            acc.record(&active, time_step);
        }

        for tau in &mut tau_sampler {
            *tau -= time_step;
        }

        if spike_event {
            let local = units
                .binary_search(&ids[cursor])
                .expect("cursor always points at a selected spike");
            tau_sampler[local] = taus[local];
            cursor += 1;
            while cursor < ids.len() && !is_selected(ids[cursor]) {
                cursor += 1;
            }
        }

        current_time += time_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use test_log::test;

    fn record(events: &[(usize, f64)]) -> SpikeRecord {
        let ids = events.iter().map(|&(id, _)| id).collect();
        let times = events.iter().map(|&(_, t)| t).collect();
        SpikeRecord::new(ids, times).unwrap()
    }

    #[test]
    fn test_single_unit_single_spike() {
        // One spike at t=0 with tau=1 over 3 time units: active a third of
        // the run.
        let rec = record(&[(0, 0.0)]);
        let occ = joint_occupancy(&rec, &[0], &[1.0], 3.0).unwrap();
        assert_abs_diff_eq!(occ.get(&[1]), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[0]), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_occupancy_sums_to_one() {
        let rec = record(&[
            (1, 0.2),
            (0, 0.5),
            (2, 0.5),
            (1, 1.1),
            (0, 2.4),
            (2, 3.9),
        ]);
        let occ = joint_occupancy(&rec, &[0, 1, 2], &[0.7, 1.3, 0.4], 5.0).unwrap();
        assert_abs_diff_eq!(occ.sum(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overlapping_activity_lands_in_joint_state() {
        // Unit 0 spikes at 1.0 (tau 2), unit 1 at 2.0 (tau 1): both active
        // over [2, 3).
        let rec = record(&[(0, 1.0), (1, 2.0)]);
        let occ = joint_occupancy(&rec, &[0, 1], &[2.0, 1.0], 4.0).unwrap();
        assert_abs_diff_eq!(occ.get(&[0, 0]), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[1, 0]), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[1, 1]), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[0, 1]), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_retrigger_extends_activity() {
        // A second spike before the first refractory period ends restarts
        // the counter: active over [0, 1.5).
        let rec = record(&[(0, 0.0), (0, 0.5)]);
        let occ = joint_occupancy(&rec, &[0], &[1.0], 2.0).unwrap();
        assert_abs_diff_eq!(occ.get(&[1]), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_irrelevant_spikes_skipped() {
        let with_noise = record(&[(7, 0.0), (0, 1.0), (9, 1.5), (0, 3.0), (5, 3.5)]);
        let clean = record(&[(0, 1.0), (0, 3.0)]);
        let a = joint_occupancy(&with_noise, &[0], &[0.5], 4.0).unwrap();
        let b = joint_occupancy(&clean, &[0], &[0.5], 4.0).unwrap();
        assert_abs_diff_eq!(a.get(&[1]), b.get(&[1]), epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_selection_keeps_tau_alignment() {
        // Selection given out of order; tau values must follow their units
        // through the internal sort.
        let rec = record(&[(3, 0.0), (1, 0.0)]);
        let occ = joint_occupancy(&rec, &[3, 1], &[2.0, 1.0], 4.0).unwrap();
        // Axis 0 is unit 1 (tau 1), axis 1 is unit 3 (tau 2).
        assert_abs_diff_eq!(occ.axis_marginal(0), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.axis_marginal(1), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_bit_order_is_msb_first() {
        // Only the lower-id unit active: that is bit k-1-0, the high bit.
        let rec = record(&[(2, 0.0)]);
        let occ = joint_occupancy(&rec, &[2, 5], &[1.0, 1.0], 2.0).unwrap();
        assert_abs_diff_eq!(occ.get(&[1, 0]), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[0, 0]), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[0, 1]), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spike_beyond_duration_ignored() {
        let rec = record(&[(0, 0.0), (0, 10.0)]);
        let occ = joint_occupancy(&rec, &[0], &[1.0], 3.0).unwrap();
        assert_abs_diff_eq!(occ.sum(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(occ.get(&[1]), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_symmetric_with_marginal_diagonal() {
        let rec = record(&[(0, 0.5), (1, 1.0), (0, 2.0), (1, 2.2)]);
        let corr = pairwise_correlations(&rec, &[0, 1], &[0.8, 0.6], 4.0, 0.0).unwrap();
        assert!(corr.is_symmetric(1e-12));

        // With no warm-up, the diagonal equals the per-unit occupancy
        // marginal.
        let occ = joint_occupancy(&rec, &[0, 1], &[0.8, 0.6], 4.0).unwrap();
        assert_abs_diff_eq!(corr[(0, 0)], occ.axis_marginal(0), epsilon = 1e-9);
        assert_abs_diff_eq!(corr[(1, 1)], occ.axis_marginal(1), epsilon = 1e-9);
    }

    #[test]
    fn test_warm_up_excludes_early_activity() {
        // All activity lies before the warm-up boundary.
        let rec = record(&[(0, 0.0)]);
        let corr = pairwise_correlations(&rec, &[0], &[1.0], 4.0, 2.0).unwrap();
        assert_abs_diff_eq!(corr[(0, 0)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_warm_up_defers_boundary_spike() {
        // The step from t=0 would jump straight to the spike at t=3, past
        // the boundary at 2. It must be clipped to land on 2 with the spike
        // deferred; activity over [3, 4) then covers half the observation
        // window.
        let rec = record(&[(0, 3.0)]);
        let corr = pairwise_correlations(&rec, &[0], &[1.0], 4.0, 2.0).unwrap();
        assert_abs_diff_eq!(corr[(0, 0)], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_warm_up_scales_by_observation_window() {
        // Active over [2.5, 3.5); observed window is [2, 4).
        let rec = record(&[(0, 2.5)]);
        let corr = pairwise_correlations(&rec, &[0], &[1.0], 4.0, 2.0).unwrap();
        assert_abs_diff_eq!(corr[(0, 0)], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_input_validation() {
        let rec = record(&[(0, 1.0)]);
        assert!(joint_occupancy(&rec, &[0, 1], &[1.0], 2.0).is_err());
        assert!(joint_occupancy(&rec, &[0], &[-1.0], 2.0).is_err());
        assert!(joint_occupancy(&rec, &[0], &[1.0], 0.0).is_err());
        assert!(joint_occupancy(&rec, &[0, 0], &[1.0, 1.0], 2.0).is_err());
        assert!(pairwise_correlations(&rec, &[0], &[1.0], 2.0, 2.0).is_err());
        assert!(pairwise_correlations(&rec, &[0], &[1.0], 2.0, -0.5).is_err());
    }

    #[test]
    fn test_empty_selection() {
        let rec = record(&[(0, 1.0)]);
        let occ = joint_occupancy(&rec, &[], &[], 2.0).unwrap();
        assert_eq!(occ.axes(), 0);
        assert_abs_diff_eq!(occ.sum(), 1.0, epsilon = 1e-12);
    }
}
