//! # Composer DSP
//!
//! Tempo (BPM) and musical key estimation from audio recordings.
//!
//! ## Features
//!
//! - **Onset Detection**: Log-compressed spectral novelty with adaptive peak picking
//! - **Tempo Estimation**: Mean-interval and modal-interval estimators with octave correction
//! - **Key Detection**: Low-passed chroma pitch-class distribution correlated against
//!   Krumhansl-Kessler profiles
//! - **Library**: A small managed directory of audio files for the `composer` CLI
//!
//! ## Quick Start
//!
//! ```no_run
//! use composer_dsp::{analyze_audio, AnalysisConfig};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 22050;
//!
//! let result = analyze_audio(&samples, sample_rate, AnalysisConfig::default())?;
//!
//! println!("Tempo: {}", result.bpm);
//! println!("Key: {} ({:.0}%)", result.key, result.key_confidence);
//! # Ok::<(), composer_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Waveform → STFT → Novelty → Peak Picking → Onsets → Tempo
//!          → Low-pass → Chroma → PCD → Template Correlation → Key
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod library;
pub mod preprocessing;

// Re-export main types
pub use analysis::result::{AnalysisMetadata, AnalysisResult, Key, Mode, TempoAnalysis};
pub use analysis::{KeyAnalyzer, TempoAnalyzer};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::key::KeyPrediction;
pub use features::onset::{detect_onsets, OnsetDetection, OnsetSet};
pub use features::tempo::{estimate_tempo_interval, estimate_tempo_naive, TempoEstimate, TempoStrategy};
pub use io::Waveform;

/// Predict the key of mono audio samples with default chroma settings
///
/// # Errors
///
/// Returns `AnalysisError` if the signal is too short for the low-pass filter or
/// has no tonal energy (e.g. silence)
pub fn predict_key(samples: &[f32], sample_rate: u32) -> Result<KeyPrediction, AnalysisError> {
    features::key::predict_key(samples, sample_rate, &config::ChromaConfig::default())
}

/// Main analysis function
///
/// Runs onset detection, tempo estimation and key detection over mono samples.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// `AnalysisResult` with tempo, key, key confidence and the detected onsets
///
/// # Errors
///
/// Returns `AnalysisError` if either estimate fails, e.g.
/// `AnalysisError::InsufficientOnsets` for audio without rhythmic content
///
/// # Example
///
/// ```no_run
/// use composer_dsp::{analyze_audio, AnalysisConfig};
///
/// let samples = vec![0.0f32; 22050 * 30];
/// let result = analyze_audio(&samples, 22050, AnalysisConfig::default())?;
/// # Ok::<(), composer_dsp::AnalysisError>(())
/// ```
pub fn analyze_audio(
    samples: &[f32],
    sample_rate: u32,
    config: AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!("Starting audio analysis: {} samples at {} Hz", samples.len(), sample_rate);

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty audio samples".to_string()));
    }
    let waveform = Waveform::new(samples.to_vec(), sample_rate)?;

    let tempo = TempoAnalyzer::new(&config).predict_bpm(&waveform)?;
    let key = KeyAnalyzer::new(&config).predict_key(&waveform)?;

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!("Analysis finished in {:.1} ms", processing_time_ms);

    Ok(AnalysisResult {
        bpm: tempo.bpm,
        key: key.key,
        key_confidence: key.confidence,
        metadata: AnalysisMetadata {
            duration_seconds: waveform.duration_seconds(),
            sample_rate,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            tempo_strategy: tempo.strategy,
            onset_count: tempo.onset_times.len(),
        },
        onset_times: tempo.onset_times,
    })
}
