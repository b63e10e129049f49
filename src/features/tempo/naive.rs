//! Mean-interval tempo estimation
//!
//! BPM = 60 / mean(IOI), assuming every onset falls on a beat. A single missed
//! or spurious onset moves the mean, so this estimator is outlier-sensitive.

use super::intervals::{inter_onset_intervals, round3};
use super::octave::normalize_bpm;
use super::TempoEstimate;
use crate::error::AnalysisError;
use crate::features::onset::OnsetSet;

/// Estimate tempo from the mean inter-onset interval
///
/// The mean is rounded to 3 decimals and the raw BPM to an integer before
/// octave correction.
///
/// # Errors
///
/// - `AnalysisError::InsufficientOnsets` with fewer than two onsets
/// - `AnalysisError::DegenerateInterval` when the rounded mean is not positive
pub fn estimate_tempo_naive(onsets: &OnsetSet) -> Result<TempoEstimate, AnalysisError> {
    let intervals = inter_onset_intervals(onsets)?;
    let mean = round3(intervals.iter().sum::<f64>() / intervals.len() as f64);

    if mean <= 0.0 {
        return Err(AnalysisError::DegenerateInterval { interval: mean });
    }

    let raw = (60.0 / mean).round_ties_even();
    let bpm = normalize_bpm(raw);
    log::debug!(
        "Naive tempo: {} intervals, mean {:.3}s, raw {} BPM, normalized {} BPM",
        intervals.len(),
        mean,
        raw,
        bpm
    );

    TempoEstimate::new(bpm, mean)
}
