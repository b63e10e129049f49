//! Chroma extraction modules
//!
//! Extract a pitch-class distribution (12 semitones) from audio:
//! - Zero-phase Butterworth low-pass to suppress non-tonal high-frequency content
//! - STFT chromagram with per-frame max normalization
//! - Time-collapsed, max-normalized pitch-class distribution
//!
//! The filterbank is centred on A440 plus the configured `tuning` offset and no
//! tuning is estimated from the signal. Recordings tuned noticeably away from
//! A440 smear energy into neighbouring pitch classes and can shift the PCD.

pub mod extractor;
pub mod normalization;

pub use extractor::{chroma_filterbank, chroma_stft, N_CHROMA};
pub use normalization::{pitch_class_distribution, PitchClassDistribution};

use crate::config::ChromaConfig;
use crate::error::AnalysisError;
use crate::preprocessing::lowpass::lowpass_zero_phase;

/// Extract the pitch-class distribution of a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Low-pass and chroma parameters
///
/// # Errors
///
/// - `AnalysisError::InvalidInput` if the signal is too short for the zero-phase
///   filter or the filter parameters are invalid
/// - `AnalysisError::ProcessingError` if the signal carries no pitch-class energy
///
/// # Example
///
/// ```no_run
/// use composer_dsp::config::ChromaConfig;
/// use composer_dsp::features::chroma::extract_pcd;
///
/// let samples = vec![0.0f32; 22050 * 5];
/// let pcd = extract_pcd(&samples, 22050, &ChromaConfig::default())?;
/// println!("PCD: {:?}", pcd);
/// # Ok::<(), composer_dsp::AnalysisError>(())
/// ```
pub fn extract_pcd(
    samples: &[f32],
    sample_rate: u32,
    config: &ChromaConfig,
) -> Result<PitchClassDistribution, AnalysisError> {
    let filtered = lowpass_zero_phase(
        samples,
        sample_rate,
        config.lowpass_cutoff_hz,
        config.lowpass_order,
    )?;
    let chroma = chroma_stft(
        &filtered,
        sample_rate,
        config.n_fft,
        config.hop_size,
        config.tuning,
    )?;
    pitch_class_distribution(&chroma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * seconds) as usize;
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_extract_pcd_sine_a() {
        let pcd = extract_pcd(&sine(440.0, 22050, 2.0), 22050, &ChromaConfig::default()).unwrap();
        assert_eq!(pcd[9], 1.0);
        assert!(pcd.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_extract_pcd_silence_fails() {
        let silence = vec![0.0f32; 22050];
        assert!(matches!(
            extract_pcd(&silence, 22050, &ChromaConfig::default()),
            Err(AnalysisError::ProcessingError(_))
        ));
    }

    #[test]
    fn test_extract_pcd_too_short() {
        assert!(extract_pcd(&[0.1; 8], 22050, &ChromaConfig::default()).is_err());
    }
}
