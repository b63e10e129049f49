//! Adaptive thresholding utilities for onset detection
//!
//! The onset threshold follows the signal: a running median of the smoothed
//! novelty function plus a global offset proportional to the novelty mean.
//! A running median tracks slow loudness changes while ignoring isolated spikes.

use crate::error::AnalysisError;

/// Map an out-of-range index onto the signal by half-sample symmetric reflection
///
/// `... c b a | a b c d | d c b ...`
#[inline]
pub(crate) fn reflect_index(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - m - 1) as usize
    }
}

/// Running median filter with reflected boundaries
///
/// The window for output `i` covers `[i - size/2, i + size - size/2 - 1]`. For an
/// even `size` the element of rank `size / 2` in the sorted window is returned
/// (the upper median, no averaging).
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `size` is zero
pub fn median_filter(values: &[f32], size: usize) -> Result<Vec<f32>, AnalysisError> {
    if size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Median filter size must be > 0".to_string(),
        ));
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let len = values.len();
    let half = (size / 2) as isize;
    let mut window = Vec::with_capacity(size);
    let mut out = Vec::with_capacity(len);

    for i in 0..len as isize {
        window.clear();
        for k in 0..size as isize {
            window.push(values[reflect_index(i - half + k, len)]);
        }
        window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        out.push(window[size / 2]);
    }

    Ok(out)
}

/// Local adaptive threshold: running median plus a constant offset
pub fn local_threshold(
    smoothed: &[f32],
    median_len: usize,
    offset: f32,
) -> Result<Vec<f32>, AnalysisError> {
    let mut threshold = median_filter(smoothed, median_len)?;
    for t in &mut threshold {
        *t += offset;
    }
    Ok(threshold)
}

/// Global offset: `mean(values) * offset_rel`
pub fn global_offset(values: &[f32], offset_rel: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
    mean as f32 * offset_rel
}
