//! Mono waveform container

use crate::error::AnalysisError;

/// Mono audio samples together with their sample rate
///
/// A waveform is immutable once loaded; every analysis stage borrows it and
/// produces fresh buffers of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    /// Create a waveform, rejecting a zero sample rate
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Samples, nominally in [-1.0, 1.0]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the waveform holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Consume the waveform and return its samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_rejects_zero_rate() {
        assert!(Waveform::new(vec![0.0; 10], 0).is_err());
    }

    #[test]
    fn test_waveform_duration() {
        let w = Waveform::new(vec![0.0; 22050], 22050).unwrap();
        assert_eq!(w.len(), 22050);
        assert!((w.duration_seconds() - 1.0).abs() < 1e-6);
    }
}
