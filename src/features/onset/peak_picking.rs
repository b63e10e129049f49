//! Adaptive peak picking on a novelty function
//!
//! 1. Global offset = mean(novelty) × relative offset
//! 2. Gaussian smoothing (suppresses spurious sub-peaks from spectral noise)
//! 3. Local threshold = running median of the *smoothed* signal + global offset
//! 4. Index `i` is a peak iff `x[i-1] < x[i] > x[i+1]` and `x[i] > threshold[i]`
//!
//! Both neighbour comparisons are strict, so a flat maximum of two or more equal
//! samples never produces a peak. That makes the picker sensitive to exact ties
//! in the smoothed signal; it is kept that way rather than smoothed over.
//!
//! # Example
//!
//! ```
//! use composer_dsp::config::PeakPickingConfig;
//! use composer_dsp::features::onset::peak_picking::pick_peaks;
//!
//! let mut novelty = vec![0.0f32; 64];
//! novelty[32] = 1.0;
//! let peaks = pick_peaks(&novelty, &PeakPickingConfig::default())?;
//! assert_eq!(peaks, vec![32]);
//! # Ok::<(), composer_dsp::AnalysisError>(())
//! ```

use super::threshold::{global_offset, local_threshold, reflect_index};
use crate::config::PeakPickingConfig;
use crate::error::AnalysisError;

/// Kernel radius is `truncate * sigma`, rounded
const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Normalized Gaussian kernel of standard deviation `sigma`
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
    let denom = 2.0 * (sigma as f64) * (sigma as f64);
    let weights: Vec<f64> = (0..=2 * radius)
        .map(|k| {
            let x = k as f64 - radius as f64;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Smooth a signal with a Gaussian kernel, reflecting at the boundaries
///
/// A non-positive `sigma` returns the signal unchanged.
pub fn gaussian_smooth(signal: &[f32], sigma: f32) -> Vec<f32> {
    if signal.is_empty() || sigma <= 0.0 {
        return signal.to_vec();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let len = signal.len();

    (0..len as isize)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| w * signal[reflect_index(i + k as isize - radius, len)])
                .sum()
        })
        .collect()
}

/// Indices of strict local maxima of `signal` that exceed `threshold` at the same index
pub fn local_maxima_above(signal: &[f32], threshold: &[f32]) -> Vec<usize> {
    if signal.len() < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    for i in 1..(signal.len() - 1) {
        let value = signal[i];
        if signal[i - 1] < value && value > signal[i + 1] && value > threshold[i] {
            peaks.push(i);
        }
    }
    peaks
}

/// Pick onset peaks from a novelty function
///
/// # Arguments
///
/// * `novelty` - Novelty values (non-negative, one per frame)
/// * `config` - Smoothing width, median window length and relative offset
///
/// # Returns
///
/// Peak frame indices in increasing order
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the median window length is zero
pub fn pick_peaks(novelty: &[f32], config: &PeakPickingConfig) -> Result<Vec<usize>, AnalysisError> {
    log::debug!(
        "Picking peaks: {} frames, sigma={}, median_len={}, offset_rel={}",
        novelty.len(),
        config.sigma,
        config.median_len,
        config.offset_rel
    );

    let offset = global_offset(novelty, config.offset_rel);
    let smoothed = gaussian_smooth(novelty, config.sigma);
    let threshold = local_threshold(&smoothed, config.median_len, offset)?;

    let peaks = local_maxima_above(&smoothed, &threshold);
    log::debug!("Found {} peaks", peaks.len());

    Ok(peaks)
}
