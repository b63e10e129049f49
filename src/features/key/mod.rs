//! Key detection modules
//!
//! Detect musical key using:
//! - Krumhansl-Kessler profiles for major and minor (12 rotations each)
//! - Correlation of z-scored profiles against a z-scored pitch-class distribution

pub mod detector;
pub mod templates;

pub use detector::detect_key;
pub use templates::KeyTemplates;

use crate::analysis::result::Key;
use crate::config::ChromaConfig;
use crate::error::AnalysisError;
use crate::features::chroma::{extract_pcd, PitchClassDistribution};
use serde::{Deserialize, Serialize};

/// Key detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPrediction {
    /// Winning key
    pub key: Key,

    /// Winning correlation score / 12 × 100; 100 is an exact profile match
    pub confidence: f32,

    /// Correlation of each major tonic (index 0 = C)
    pub major_scores: [f32; 12],

    /// Correlation of each minor tonic (index 0 = C)
    pub minor_scores: [f32; 12],
}

/// Predict the key of a pitch-class distribution with the shared profiles
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` for a PCD without variance
pub fn predict_key_from_pcd(pcd: &PitchClassDistribution) -> Result<KeyPrediction, AnalysisError> {
    detect_key(pcd, KeyTemplates::shared())
}

/// Predict the key of a mono signal
///
/// Low-pass filters the signal, extracts its pitch-class distribution and
/// correlates it against the key profiles.
///
/// # Errors
///
/// Returns `AnalysisError` if the signal is too short, silent, or atonal to the
/// point of having a flat distribution
pub fn predict_key(
    samples: &[f32],
    sample_rate: u32,
    config: &ChromaConfig,
) -> Result<KeyPrediction, AnalysisError> {
    let pcd = extract_pcd(samples, sample_rate, config)?;
    predict_key_from_pcd(&pcd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::Mode;

    #[test]
    fn test_predict_key_from_major_profile() {
        let pcd = templates::MAJOR_PROFILE.map(|v| (v / 6.35) as f32);
        let prediction = predict_key_from_pcd(&pcd).unwrap();
        assert_eq!(prediction.key.tonic(), 0);
        assert_eq!(prediction.key.mode(), Mode::Major);
        assert!((prediction.confidence - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_predict_key_from_synthesized_c_major() {
        // One partial per pitch class from C5 upwards, power shaped like the major profile
        let sr = 22050u32;
        let partials: Vec<(f32, f32)> = (0..12)
            .map(|k| {
                let freq = 523.25 * 2.0f32.powf(k as f32 / 12.0);
                let amp = (templates::MAJOR_PROFILE[k] / 6.35).sqrt() as f32;
                (freq, amp)
            })
            .collect();
        let samples: Vec<f32> = (0..sr as usize * 2)
            .map(|i| {
                let t = i as f32 / sr as f32;
                partials
                    .iter()
                    .map(|(f, a)| a * (2.0 * std::f32::consts::PI * f * t).sin())
                    .sum::<f32>()
                    / 12.0
            })
            .collect();
        let prediction = predict_key(&samples, sr, &ChromaConfig::default()).unwrap();
        assert_eq!(prediction.key, Key::Major(0));
    }

    #[test]
    fn test_predict_key_silence_fails() {
        let samples = vec![0.0f32; 22050];
        assert!(predict_key(&samples, 22050, &ChromaConfig::default()).is_err());
    }
}
