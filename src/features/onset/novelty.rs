//! Spectral novelty function
//!
//! Turns a complex spectrogram into a 1-D onset-strength signal:
//!
//! 1. Logarithmic compression `log(1 + γ·|X|)`, so quiet onsets register next to loud ones
//! 2. First-order difference along time
//! 3. Half-wave rectification (only energy increases indicate onsets)
//! 4. Sum across frequency bins
//! 5. A trailing zero restores one value per spectrogram frame
//!
//! # Reference
//!
//! Müller, M. (2015). *Fundamentals of Music Processing*, Section 6.1.2 (Spectral-Based Novelty).
//! Springer.
//!
//! # Example
//!
//! ```no_run
//! use composer_dsp::features::stft::stft;
//! use composer_dsp::features::onset::novelty::spectral_novelty;
//!
//! let samples = vec![0.0f32; 22050];
//! let spectrogram = stft(&samples, 22050, 1024, 512)?;
//! let novelty = spectral_novelty(&spectrogram, 100.0);
//! assert_eq!(novelty.len(), spectrogram.n_frames());
//! # Ok::<(), composer_dsp::AnalysisError>(())
//! ```

use crate::features::stft::Spectrogram;

/// Novelty values with their time axis
#[derive(Debug, Clone, PartialEq)]
pub struct NoveltyFunction {
    /// Non-negative novelty value per spectrogram frame
    pub values: Vec<f32>,

    /// Time in seconds of each value (`frame * hop / sample_rate`)
    pub times: Vec<f64>,
}

impl NoveltyFunction {
    /// Number of frames
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the function holds no frames
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Log-compress a magnitude value with constant `gamma`
#[inline]
pub fn log_compress(magnitude: f32, gamma: f32) -> f32 {
    (1.0 + gamma * magnitude).ln()
}

/// Compute the spectral novelty function of a spectrogram
///
/// # Arguments
///
/// * `spectrogram` - Complex spectrogram
/// * `gamma` - Logarithmic compression constant (typical: 100.0)
///
/// # Returns
///
/// Novelty function with exactly one value per spectrogram frame. The last
/// value is always zero because the difference drops one frame.
pub fn spectral_novelty(spectrogram: &Spectrogram, gamma: f32) -> NoveltyFunction {
    let n_frames = spectrogram.n_frames();
    log::debug!(
        "Computing spectral novelty: {} frames, {} bins, gamma={}",
        n_frames,
        spectrogram.n_bins(),
        gamma
    );

    let compressed: Vec<Vec<f32>> = spectrogram
        .frames()
        .iter()
        .map(|frame| frame.iter().map(|c| log_compress(c.norm(), gamma)).collect())
        .collect();

    let mut values = Vec::with_capacity(n_frames);
    for pair in compressed.windows(2) {
        let flux: f32 = pair[0]
            .iter()
            .zip(pair[1].iter())
            .map(|(&prev, &curr)| (curr - prev).max(0.0))
            .sum();
        values.push(flux);
    }
    if n_frames > 0 {
        values.push(0.0);
    }

    let times = (0..values.len()).map(|i| spectrogram.frame_time(i)).collect();

    NoveltyFunction { values, times }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stft::stft;

    #[test]
    fn test_novelty_length_matches_frames() {
        let samples = vec![0.0f32; 10000];
        let spec = stft(&samples, 22050, 1024, 512).unwrap();
        let novelty = spectral_novelty(&spec, 100.0);
        assert_eq!(novelty.len(), spec.n_frames());
        assert_eq!(novelty.times.len(), spec.n_frames());
        assert_eq!(*novelty.values.last().unwrap(), 0.0);
    }

    #[test]
    fn test_novelty_silence_is_zero() {
        let spec = stft(&[0.0f32; 8192], 16384, 1024, 512).unwrap();
        let novelty = spectral_novelty(&spec, 100.0);
        assert!(novelty.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_novelty_single_frame() {
        let spec = stft(&[0.1f32; 10], 22050, 1024, 512).unwrap();
        let novelty = spectral_novelty(&spec, 100.0);
        assert_eq!(novelty.values, vec![0.0]);
        assert_eq!(novelty.times, vec![0.0]);
    }

    #[test]
    fn test_novelty_peaks_at_onset() {
        // Silence, then a burst starting at sample 8192 (frame 16 at hop 512)
        let sr = 16384;
        let mut samples = vec![0.0f32; 16384];
        for (i, s) in samples.iter_mut().enumerate().skip(8192) {
            *s = (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sr as f32).sin();
        }
        let spec = stft(&samples, sr, 1024, 512).unwrap();
        let novelty = spectral_novelty(&spec, 100.0);

        assert!(novelty.values.iter().all(|&v| v >= 0.0));
        let (argmax, _) = novelty
            .values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();
        assert!((14..=16).contains(&argmax), "novelty peak at frame {}", argmax);
        assert!(novelty.values[..13].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_novelty_times() {
        let spec = stft(&[0.0f32; 4096], 16384, 1024, 512).unwrap();
        let novelty = spectral_novelty(&spec, 100.0);
        assert_eq!(novelty.times[0], 0.0);
        assert!((novelty.times[4] - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_log_compress() {
        assert_eq!(log_compress(0.0, 100.0), 0.0);
        assert!((log_compress(1.0, 100.0) - 101.0f32.ln()).abs() < 1e-6);
    }
}
