//! Configuration parameters for audio analysis
//!
//! Every struct deserializes with missing fields taking their defaults, so a JSON
//! config file only needs to name the values it overrides.

use crate::features::tempo::TempoStrategy;
use serde::{Deserialize, Serialize};

/// Analysis configuration parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Spectral onset detection parameters
    pub onset: OnsetConfig,

    /// Adaptive peak-picking parameters
    pub peak_picking: PeakPickingConfig,

    /// Tempo estimation strategy used by the tempo facade (default: Interval)
    pub tempo_strategy: TempoStrategy,

    /// Chroma extraction parameters
    pub chroma: ChromaConfig,
}

/// STFT and novelty parameters for onset detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OnsetConfig {
    /// FFT / window size in samples (default: 1024)
    pub window_size: usize,

    /// Hop size in samples (default: 512)
    pub hop_size: usize,

    /// Logarithmic compression constant gamma (default: 100.0)
    /// Larger values flatten dynamic-range differences between loud and quiet onsets
    pub gamma: f32,
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            window_size: 1024,
            hop_size: 512,
            gamma: 100.0,
        }
    }
}

/// Peak-picking parameters applied to the novelty function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakPickingConfig {
    /// Gaussian smoothing width in frames (default: 4.0)
    pub sigma: f32,

    /// Running median window length in frames (default: 16)
    pub median_len: usize,

    /// Global offset relative to the novelty mean (default: 0.05)
    pub offset_rel: f32,
}

impl Default for PeakPickingConfig {
    fn default() -> Self {
        Self {
            sigma: 4.0,
            median_len: 16,
            offset_rel: 0.05,
        }
    }
}

/// Chroma / pitch-class distribution parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    /// Low-pass cutoff applied before chroma extraction, in Hz (default: 1400.0)
    pub lowpass_cutoff_hz: f32,

    /// Butterworth filter order (default: 4)
    pub lowpass_order: usize,

    /// FFT size for the chroma spectrogram (default: 2048)
    pub n_fft: usize,

    /// Hop size for the chroma spectrogram (default: 512)
    pub hop_size: usize,

    /// Tuning deviation from A440 in fractions of a chroma bin (default: 0.0)
    pub tuning: f32,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            lowpass_cutoff_hz: 1400.0,
            lowpass_order: 4,
            n_fft: 2048,
            hop_size: 512,
            tuning: 0.0,
        }
    }
}

/// Options for turning an audio file into a [`crate::io::Waveform`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Resample to this rate after decoding; `None` keeps the file's native rate
    /// (default: 22050 Hz)
    pub target_sample_rate: Option<u32>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            target_sample_rate: Some(22050),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"onset": {"gamma": 10.0}, "tempo_strategy": "naive"}"#)
                .unwrap();
        assert_eq!(config.onset.gamma, 10.0);
        assert_eq!(config.onset.hop_size, 512);
        assert_eq!(config.tempo_strategy, TempoStrategy::Naive);
        assert_eq!(config.peak_picking.median_len, 16);
        assert_eq!(config.chroma.lowpass_order, 4);
    }

    #[test]
    fn test_default_strategy_is_interval() {
        assert_eq!(AnalysisConfig::default().tempo_strategy, TempoStrategy::Interval);
    }
}
