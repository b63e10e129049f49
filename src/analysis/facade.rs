//! Tempo and key analyzers over a loaded waveform
//!
//! Thin orchestration used by the command-line front end: each analyzer owns
//! its configuration and runs the full pipeline on a [`Waveform`].

use super::result::TempoAnalysis;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::key::{predict_key, KeyPrediction};
use crate::features::onset::{OnsetDetection, OnsetDetector};
use crate::features::tempo::TempoStrategy;
use crate::io::Waveform;

/// Onset detection followed by tempo estimation
#[derive(Debug, Clone, Default)]
pub struct TempoAnalyzer {
    detector: OnsetDetector,
    strategy: TempoStrategy,
}

impl TempoAnalyzer {
    /// Analyzer using the onset, peak-picking and strategy settings of `config`
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            detector: OnsetDetector::with_config(config.onset.clone(), config.peak_picking.clone()),
            strategy: config.tempo_strategy,
        }
    }

    /// Replace the tempo estimation strategy
    pub fn with_strategy(mut self, strategy: TempoStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run onset detection only
    pub fn detect_onsets(&self, waveform: &Waveform) -> Result<OnsetDetection, AnalysisError> {
        self.detector.detect(waveform.samples(), waveform.sample_rate())
    }

    /// Estimate the tempo of a waveform
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InsufficientOnsets` when fewer than two onsets are
    /// found (e.g. silence), or any error from onset detection.
    pub fn predict_bpm(&self, waveform: &Waveform) -> Result<TempoAnalysis, AnalysisError> {
        let detection = self.detect_onsets(waveform)?;
        self.estimate(detection)
    }

    /// Estimate the tempo from an existing onset detection
    pub fn estimate(&self, detection: OnsetDetection) -> Result<TempoAnalysis, AnalysisError> {
        let bpm = self.strategy.estimate(&detection.onsets)?;
        log::info!(
            "Tempo: {} from {} onsets ({} strategy)",
            bpm,
            detection.onsets.len(),
            self.strategy
        );
        Ok(TempoAnalysis {
            bpm,
            strategy: self.strategy,
            onset_times: detection.onsets,
        })
    }
}

/// Low-pass, chroma and template correlation
#[derive(Debug, Clone, Default)]
pub struct KeyAnalyzer {
    config: AnalysisConfig,
}

impl KeyAnalyzer {
    /// Analyzer using the chroma settings of `config`
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Predict the key of a waveform
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` if the waveform is too short or carries no tonal energy
    pub fn predict_key(&self, waveform: &Waveform) -> Result<KeyPrediction, AnalysisError> {
        let prediction = predict_key(waveform.samples(), waveform.sample_rate(), &self.config.chroma)?;
        log::info!("Key: {} ({:.0}%)", prediction.key, prediction.confidence);
        Ok(prediction)
    }
}
