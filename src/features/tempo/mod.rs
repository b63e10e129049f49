//! Tempo estimation from onset times
//!
//! Two interchangeable strategies share one contract (`OnsetSet` → `TempoEstimate`):
//! - [`TempoStrategy::Naive`]: mean inter-onset interval
//! - [`TempoStrategy::Interval`]: most frequent inter-onset interval
//!
//! Both finish with a single octave-correction pass into the 60-160 BPM band.

pub mod interval;
pub mod intervals;
pub mod naive;
pub mod octave;

pub use interval::estimate_tempo_interval;
pub use intervals::inter_onset_intervals;
pub use naive::estimate_tempo_naive;
pub use octave::normalize_bpm;

use crate::error::AnalysisError;
use crate::features::onset::OnsetSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whole-number tempo in beats per minute, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempoEstimate(u32);

impl TempoEstimate {
    /// Wrap a normalized BPM, rejecting zero
    ///
    /// `interval` is the representative interval the BPM came from and is only
    /// used to report a degenerate estimate.
    pub(crate) fn new(bpm: u32, interval: f64) -> Result<Self, AnalysisError> {
        if bpm == 0 {
            return Err(AnalysisError::DegenerateInterval { interval });
        }
        Ok(Self(bpm))
    }

    /// Tempo in BPM
    pub fn bpm(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TempoEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}

/// Tempo estimation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempoStrategy {
    /// Mean inter-onset interval (outlier-sensitive)
    Naive,

    /// Modal inter-onset interval (robust to isolated outliers)
    #[default]
    Interval,
}

impl TempoStrategy {
    /// Estimate tempo from onset times with this strategy
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InsufficientOnsets` with fewer than two onsets and
    /// `AnalysisError::DegenerateInterval` when the representative interval is
    /// not positive.
    pub fn estimate(self, onsets: &OnsetSet) -> Result<TempoEstimate, AnalysisError> {
        match self {
            TempoStrategy::Naive => estimate_tempo_naive(onsets),
            TempoStrategy::Interval => estimate_tempo_interval(onsets),
        }
    }

    /// Lowercase strategy name
    pub fn as_str(self) -> &'static str {
        match self {
            TempoStrategy::Naive => "naive",
            TempoStrategy::Interval => "interval",
        }
    }
}

impl fmt::Display for TempoStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TempoStrategy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(TempoStrategy::Naive),
            "interval" => Ok(TempoStrategy::Interval),
            other => Err(AnalysisError::InvalidInput(format!(
                "Unknown tempo strategy '{}' (expected 'naive' or 'interval')",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_agree_on_uniform_onsets() {
        let times: Vec<f64> = (0..16).map(|k| 0.25 + k as f64 * 0.5).collect();
        let onsets = OnsetSet::new(times).unwrap();
        for strategy in [TempoStrategy::Naive, TempoStrategy::Interval] {
            assert_eq!(strategy.estimate(&onsets).unwrap().bpm(), 120);
        }
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("naive".parse::<TempoStrategy>().unwrap(), TempoStrategy::Naive);
        assert_eq!("Interval".parse::<TempoStrategy>().unwrap(), TempoStrategy::Interval);
        assert!("mode".parse::<TempoStrategy>().is_err());
        assert_eq!(TempoStrategy::default(), TempoStrategy::Interval);
    }

    #[test]
    fn test_zero_bpm_is_degenerate() {
        assert!(matches!(
            TempoEstimate::new(0, 1000.0),
            Err(AnalysisError::DegenerateInterval { .. })
        ));
        assert_eq!(TempoEstimate::new(120, 0.5).unwrap().to_string(), "120 BPM");
    }

    #[test]
    fn test_silence_fails_with_insufficient_onsets() {
        let err = TempoStrategy::Naive.estimate(&OnsetSet::empty()).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientOnsets { found: 0 });
    }
}
