//! Onset detection
//!
//! Spectral novelty onset detection:
//! - STFT (Hann window, centred frames)
//! - Log-compressed spectral novelty function
//! - Adaptive peak picking (Gaussian smoothing + running median threshold)
//!
//! Peak indices are mapped to seconds through the novelty time axis, giving an
//! [`OnsetSet`].

pub mod novelty;
pub mod peak_picking;
pub mod threshold;

use crate::config::{OnsetConfig, PeakPickingConfig};
use crate::error::AnalysisError;
use crate::features::stft::stft;
use novelty::{spectral_novelty, NoveltyFunction};
use peak_picking::pick_peaks;
use serde::{Deserialize, Serialize};

/// Strictly increasing onset timestamps in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct OnsetSet {
    times: Vec<f64>,
}

impl OnsetSet {
    /// Build an onset set, rejecting non-finite or non-increasing timestamps
    pub fn new(times: Vec<f64>) -> Result<Self, AnalysisError> {
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "Onset time {} is not finite",
                t
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnalysisError::InvalidInput(format!(
                "Onset times must be strictly increasing: {} followed by {}",
                times[i],
                times[i + 1]
            )));
        }
        Ok(Self { times })
    }

    /// An onset set with no onsets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Onset timestamps in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of onsets
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when no onset was detected
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl TryFrom<Vec<f64>> for OnsetSet {
    type Error = AnalysisError;

    fn try_from(times: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(times)
    }
}

impl From<OnsetSet> for Vec<f64> {
    fn from(set: OnsetSet) -> Self {
        set.times
    }
}

/// Result of running the onset detector over a waveform
#[derive(Debug, Clone)]
pub struct OnsetDetection {
    /// Detected onsets in seconds
    pub onsets: OnsetSet,

    /// Peak frame indices into `novelty`
    pub peaks: Vec<usize>,

    /// Novelty function and its time axis
    pub novelty: NoveltyFunction,
}

impl OnsetDetection {
    /// Serializable snapshot of the novelty curve and its peaks, for external plotting
    pub fn diagnostics(&self) -> NoveltyDiagnostics {
        NoveltyDiagnostics {
            time: self.novelty.times.clone(),
            novelty: self.novelty.values.clone(),
            peaks: self.peaks.clone(),
        }
    }
}

/// Novelty curve with marked peaks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoveltyDiagnostics {
    /// Frame times in seconds
    pub time: Vec<f64>,
    /// Novelty value per frame
    pub novelty: Vec<f32>,
    /// Indices of the frames picked as onsets
    pub peaks: Vec<usize>,
}

/// Spectral novelty onset detector
#[derive(Debug, Clone, Default)]
pub struct OnsetDetector {
    onset: OnsetConfig,
    peak_picking: PeakPickingConfig,
}

impl OnsetDetector {
    /// Detector with default STFT and peak-picking parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with explicit parameters
    pub fn with_config(onset: OnsetConfig, peak_picking: PeakPickingConfig) -> Self {
        Self {
            onset,
            peak_picking,
        }
    }

    /// Replace the compression constant gamma
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.onset.gamma = gamma;
        self
    }

    /// Detect onsets in a mono signal
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for empty input, a zero sample rate,
    /// or invalid STFT / peak-picking parameters.
    pub fn detect(&self, samples: &[f32], sample_rate: u32) -> Result<OnsetDetection, AnalysisError> {
        log::debug!(
            "Detecting spectral onsets: {} samples at {} Hz, gamma={}",
            samples.len(),
            sample_rate,
            self.onset.gamma
        );

        let spectrogram = stft(samples, sample_rate, self.onset.window_size, self.onset.hop_size)?;
        let novelty = spectral_novelty(&spectrogram, self.onset.gamma);
        let peaks = pick_peaks(&novelty.values, &self.peak_picking)?;

        // Peaks are increasing frame indices, so the mapped times are strictly increasing
        let onsets = OnsetSet::new(peaks.iter().map(|&p| novelty.times[p]).collect())?;

        log::debug!("Detected {} onsets", onsets.len());

        Ok(OnsetDetection {
            onsets,
            peaks,
            novelty,
        })
    }
}

/// Detect onsets with default parameters and the given compression constant
///
/// # Example
///
/// ```no_run
/// use composer_dsp::features::onset::detect_onsets;
///
/// let samples = vec![0.0f32; 22050 * 5];
/// let detection = detect_onsets(&samples, 22050, 100.0)?;
/// println!("{} onsets", detection.onsets.len());
/// # Ok::<(), composer_dsp::AnalysisError>(())
/// ```
pub fn detect_onsets(
    samples: &[f32],
    sample_rate: u32,
    gamma: f32,
) -> Result<OnsetDetection, AnalysisError> {
    OnsetDetector::new().gamma(gamma).detect(samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_track(sample_rate: u32, onsets: &[usize], len: usize) -> Vec<f32> {
        let click_len = sample_rate as usize / 10;
        let mut samples = vec![0.0f32; len];
        for &start in onsets {
            for i in 0..click_len {
                let t = i as f32 / sample_rate as f32;
                samples[start + i] = (2.0 * std::f32::consts::PI * 800.0 * t).sin();
            }
        }
        samples
    }

    #[test]
    fn test_onset_set_validation() {
        assert!(OnsetSet::new(vec![0.1, 0.2, 0.3]).is_ok());
        assert!(OnsetSet::new(vec![0.1, 0.1]).is_err());
        assert!(OnsetSet::new(vec![0.3, 0.2]).is_err());
        assert!(OnsetSet::new(vec![f64::NAN]).is_err());
        assert!(OnsetSet::new(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_onset_set_serde() {
        let set = OnsetSet::new(vec![0.5, 1.0]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[0.5,1.0]");
        assert!(serde_json::from_str::<OnsetSet>("[1.0,0.5]").is_err());
    }

    #[test]
    fn test_detect_onsets_silence() {
        let samples = vec![0.0f32; 22050 * 2];
        let detection = detect_onsets(&samples, 22050, 100.0).unwrap();
        assert!(detection.onsets.is_empty());
        assert!(detection.peaks.is_empty());
        assert_eq!(detection.novelty.len(), 1 + samples.len() / 512);
    }

    #[test]
    fn test_detect_onsets_empty_input() {
        assert!(detect_onsets(&[], 22050, 100.0).is_err());
    }

    #[test]
    fn test_detect_onsets_clicks() {
        // 16384 Hz with hop 512: 0.5 s = 16 frames exactly
        let sr = 16384;
        let starts: Vec<usize> = (0..8).map(|k| 4096 + k * 8192).collect();
        let samples = click_track(sr, &starts, 4096 + 8 * 8192 + 16384);

        let detection = detect_onsets(&samples, sr, 100.0).unwrap();
        let times = detection.onsets.times();
        assert_eq!(times.len(), 8, "onsets: {:?}", times);

        let frame = 512.0 / sr as f64;
        for (k, &t) in times.iter().enumerate() {
            let expected = starts[k] as f64 / sr as f64;
            assert!(
                (t - expected).abs() <= 2.0 * frame,
                "onset {} at {:.4}s, expected near {:.4}s",
                k,
                t,
                expected
            );
        }
        for w in times.windows(2) {
            assert!((w[1] - w[0] - 0.5).abs() <= frame + 1e-9);
        }
    }

    #[test]
    fn test_diagnostics_mirror_detection() {
        let sr = 16384;
        let samples = click_track(sr, &[4096, 12288], 24576);
        let detection = detect_onsets(&samples, sr, 100.0).unwrap();
        let diag = detection.diagnostics();
        assert_eq!(diag.time.len(), diag.novelty.len());
        assert_eq!(diag.peaks, detection.peaks);
    }
}
