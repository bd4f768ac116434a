//! Spike recordings: parallel unit-id and time sequences.
//!
//! A [`SpikeRecord`] is the point-event input shared by the event-driven
//! simulator and the grid resampler: one unit id and one event time per
//! spike, times non-decreasing. Ordering is asserted at construction, not
//! silently fixed; callers that hold unsorted data must sort it themselves
//! before building a record.

use crate::error::{Error, Result};

/// A time-ordered sequence of spike events.
#[derive(Debug, Clone, Default)]
pub struct SpikeRecord {
    ids: Vec<usize>,
    times: Vec<f64>,
}

impl SpikeRecord {
    /// Builds a record from parallel id and time sequences.
    ///
    /// Fails with [`Error::ShapeMismatch`] if the sequences differ in length
    /// and with [`Error::DomainViolation`] if the times are not
    /// non-decreasing.
    pub fn new(ids: Vec<usize>, times: Vec<f64>) -> Result<Self> {
        if ids.len() != times.len() {
            return Err(Error::ShapeMismatch {
                what: "spike times",
                expected: ids.len(),
                actual: times.len(),
            });
        }
        for window in times.windows(2) {
            if window[1] < window[0] {
                return Err(Error::DomainViolation(format!(
                    "spike times must be sorted ascending, found {} after {}",
                    window[1], window[0]
                )));
            }
        }
        Ok(Self { ids, times })
    }

    /// Number of spikes.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the record holds no spikes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Unit ids, parallel to [`times`][SpikeRecord::times].
    #[inline]
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Event times, sorted ascending.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }
}
