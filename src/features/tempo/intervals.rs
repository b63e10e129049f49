//! Inter-onset intervals

use crate::error::AnalysisError;
use crate::features::onset::OnsetSet;

/// Round to 3 decimal places, exact halves to even
#[inline]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// Value rounded to whole milliseconds, as an integer key
#[inline]
pub(crate) fn to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0).round_ties_even() as i64
}

/// Consecutive differences of the onset times, in seconds
///
/// # Errors
///
/// Returns `AnalysisError::InsufficientOnsets` when fewer than two onsets are
/// available, since no interval exists then.
pub fn inter_onset_intervals(onsets: &OnsetSet) -> Result<Vec<f64>, AnalysisError> {
    if onsets.len() < 2 {
        return Err(AnalysisError::InsufficientOnsets {
            found: onsets.len(),
        });
    }
    Ok(onsets.times().windows(2).map(|w| w[1] - w[0]).collect())
}
