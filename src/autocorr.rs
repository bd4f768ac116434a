//! Lag-based autocorrelation of a scalar time series.

use crate::error::{Error, Result};

/// Autocorrelation of `series` at lags `0..=max_lag`.
///
/// The series is mean-centered; entry `lag` is the average product of the
/// centered series with itself shifted by `lag`, normalized by the lag-0
/// value, so the result always starts with 1. A constant series has zero
/// variance and yields NaN entries; guarding against that is left to the
/// caller.
///
/// Fails with [`Error::DomainViolation`] if `max_lag` does not leave at
/// least one overlapping pair at the largest lag.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    if series.is_empty() || max_lag >= series.len() {
        return Err(Error::DomainViolation(format!(
            "max_lag {} requires a series longer than it, got {} samples",
            max_lag,
            series.len()
        )));
    }

    let n = series.len();
    let mean = series.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = series.iter().map(|&x| x - mean).collect();

    let variance = centered.iter().map(|&x| x * x).sum::<f64>() / n as f64;

    let mut out = Vec::with_capacity(max_lag + 1);
    for lag in 0..=max_lag {
        let cov = centered[lag..]
            .iter()
            .zip(&centered)
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / (n - lag) as f64;
        out.push(cov / variance);
    }
    Ok(out)
}
