//! Modal-interval tempo estimation
//!
//! Inter-onset intervals are bucketed to whole milliseconds and counted; the
//! most frequent bucket is taken as the beat period. One outlier interval
//! cannot outvote a run of regular ones, which makes this estimator robust to
//! isolated missed or spurious onsets.

use super::intervals::{inter_onset_intervals, to_millis};
use super::octave::normalize_bpm;
use super::TempoEstimate;
use crate::error::AnalysisError;
use crate::features::onset::OnsetSet;

/// Interval histogram in first-seen order
#[derive(Debug, Clone, Default)]
pub struct IntervalHistogram {
    buckets: Vec<(i64, usize)>,
}

impl IntervalHistogram {
    /// Build a histogram from intervals in seconds
    pub fn from_intervals(intervals: &[f64]) -> Self {
        let mut histogram = Self::default();
        for &interval in intervals {
            histogram.insert(to_millis(interval));
        }
        histogram
    }

    fn insert(&mut self, millis: i64) {
        match self.buckets.iter_mut().find(|(key, _)| *key == millis) {
            Some((_, count)) => *count += 1,
            None => self.buckets.push((millis, 1)),
        }
    }

    /// `(interval_ms, count)` pairs in the order the intervals were first seen
    pub fn buckets(&self) -> &[(i64, usize)] {
        &self.buckets
    }

    /// Most frequent interval in milliseconds; ties go to the first-seen bucket
    pub fn mode(&self) -> Option<(i64, usize)> {
        let mut best: Option<(i64, usize)> = None;
        for &(key, count) in &self.buckets {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((key, count));
            }
        }
        best
    }
}

/// Estimate tempo from the most common inter-onset interval
///
/// # Errors
///
/// - `AnalysisError::InsufficientOnsets` with fewer than two onsets
/// - `AnalysisError::DegenerateInterval` when the modal interval rounds to zero
pub fn estimate_tempo_interval(onsets: &OnsetSet) -> Result<TempoEstimate, AnalysisError> {
    let intervals = inter_onset_intervals(onsets)?;
    let histogram = IntervalHistogram::from_intervals(&intervals);

    let (modal_ms, count) = histogram
        .mode()
        .ok_or(AnalysisError::InsufficientOnsets { found: onsets.len() })?;
    let modal = modal_ms as f64 / 1000.0;

    if modal_ms <= 0 {
        return Err(AnalysisError::DegenerateInterval { interval: modal });
    }

    let bpm = normalize_bpm(60.0 / modal);
    log::debug!(
        "Interval tempo: {} buckets, modal {:.3}s ({} of {}), {} BPM",
        histogram.buckets().len(),
        modal,
        count,
        intervals.len(),
        bpm
    );

    TempoEstimate::new(bpm, modal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(count: usize, ioi: f64) -> Vec<f64> {
        (0..count).map(|k| 0.25 + k as f64 * ioi).collect()
    }

    #[test]
    fn test_histogram_first_seen_wins_ties() {
        let histogram = IntervalHistogram::from_intervals(&[0.6, 0.5, 0.5, 0.6]);
        assert_eq!(histogram.buckets(), &[(600, 2), (500, 2)]);
        assert_eq!(histogram.mode(), Some((600, 2)));
    }

    #[test]
    fn test_histogram_buckets_near_duplicates() {
        let histogram = IntervalHistogram::from_intervals(&[0.5001, 0.4999, 0.7]);
        assert_eq!(histogram.mode(), Some((500, 2)));
        assert!(IntervalHistogram::default().mode().is_none());
    }

    #[test]
    fn test_interval_uniform_120() {
        let onsets = OnsetSet::new(uniform(16, 0.5)).unwrap();
        assert_eq!(estimate_tempo_interval(&onsets).unwrap().bpm(), 120);
    }

    #[test]
    fn test_interval_ignores_delayed_onset() {
        let mut times = uniform(16, 0.5);
        *times.last_mut().unwrap() += 0.3;
        let onsets = OnsetSet::new(times).unwrap();
        assert_eq!(estimate_tempo_interval(&onsets).unwrap().bpm(), 120);
    }

    #[test]
    fn test_interval_ignores_missing_onset() {
        let mut times = uniform(16, 0.5);
        times.remove(8);
        let onsets = OnsetSet::new(times).unwrap();
        assert_eq!(estimate_tempo_interval(&onsets).unwrap().bpm(), 120);
    }

    #[test]
    fn test_interval_slow_tempo_doubled() {
        // 1.2 s spacing is 50 BPM, doubled to 100
        let onsets = OnsetSet::new(uniform(6, 1.2)).unwrap();
        assert_eq!(estimate_tempo_interval(&onsets).unwrap().bpm(), 100);
    }

    #[test]
    fn test_interval_insufficient_onsets() {
        assert_eq!(
            estimate_tempo_interval(&OnsetSet::empty()),
            Err(AnalysisError::InsufficientOnsets { found: 0 })
        );
    }

    #[test]
    fn test_interval_degenerate() {
        let onsets = OnsetSet::new(vec![0.0, 0.0001, 0.0002, 0.5]).unwrap();
        assert!(matches!(
            estimate_tempo_interval(&onsets),
            Err(AnalysisError::DegenerateInterval { .. })
        ));
    }
}
