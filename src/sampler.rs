//! Grid resampling of spike recordings.
//!
//! [`generate_states`] converts an irregular spike recording into a regular
//! binary activity matrix: one row per grid step, one column per unit, a cell
//! set iff the unit is within its refractory window at that step. This is the
//! discrete counterpart of the event-driven statistics in
//! [`simulator`][crate::simulator], intended for downstream consumers that
//! want fixed-rate samples rather than time-weighted distributions.

use log::debug;

use crate::bitgrid::BitGrid;
use crate::error::{Error, Result};
use crate::spikes::SpikeRecord;

/// Resamples a spike recording onto a uniform grid over `[0, duration)`.
///
/// The grid has `floor(duration / steps_per_sample)` samples at times
/// `0, steps_per_sample, 2·steps_per_sample, …`. For each unit the most
/// recent spike time is tracked; the unit reads as active at grid time `t`
/// iff `t - last_spike < tau_refrac[unit]`. All spikes with time `<= t` are
/// consumed before the state at `t` is read, so a spike landing exactly on a
/// grid boundary counts as having occurred for that sample.
///
/// Fails with [`Error::ShapeMismatch`] if `tau_refrac` does not have one
/// entry per unit, and with [`Error::DomainViolation`] for a non-positive
/// step size or a spike id outside `0..num_units`.
pub fn generate_states(
    record: &SpikeRecord,
    tau_refrac: &[f64],
    num_units: usize,
    steps_per_sample: f64,
    duration: f64,
) -> Result<BitGrid> {
    if tau_refrac.len() != num_units {
        return Err(Error::ShapeMismatch {
            what: "refractory durations",
            expected: num_units,
            actual: tau_refrac.len(),
        });
    }
    if steps_per_sample <= 0.0 {
        return Err(Error::DomainViolation(format!(
            "steps_per_sample must be positive, got {}",
            steps_per_sample
        )));
    }
    if duration < 0.0 {
        return Err(Error::DomainViolation(format!(
            "duration must be non-negative, got {}",
            duration
        )));
    }

    let num_samples = (duration / steps_per_sample).floor() as usize;
    debug!(
        "resampling {} spikes onto {} samples of {} units",
        record.len(),
        num_samples,
        num_units
    );

    let mut grid = BitGrid::new(num_samples, num_units);
    // Sentinel: "never spiked" reads as infinitely long ago.
    let mut last_spike = vec![f64::NEG_INFINITY; num_units];
    let ids = record.ids();
    let times = record.times();
    let mut cursor = 0;

    for sample in 0..num_samples {
        let grid_time = sample as f64 * steps_per_sample;
        while cursor < times.len() && times[cursor] <= grid_time {
            let unit = ids[cursor];
            if unit >= num_units {
                return Err(Error::DomainViolation(format!(
                    "spike id {} out of range for {} units",
                    unit, num_units
                )));
            }
            last_spike[unit] = times[cursor];
            cursor += 1;
        }
        for unit in 0..num_units {
            if grid_time - last_spike[unit] < tau_refrac[unit] {
                grid.set(sample, unit, true);
            }
        }
    }

    Ok(grid)
}
