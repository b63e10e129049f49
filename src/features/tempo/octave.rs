//! Octave-error correction
//!
//! Onset-based estimators often lock onto half or double the perceived tempo.
//! One correction pass folds the estimate towards the 60-160 BPM band: values
//! above 160 are halved, values below 60 are doubled. Only one pass is applied,
//! so inputs outside roughly 30-320 BPM stay out of band.

/// Upper edge of the target band
pub const MAX_BPM: f64 = 160.0;

/// Lower edge of the target band
pub const MIN_BPM: f64 = 60.0;

/// Apply a single halving/doubling pass and round to the nearest integer BPM
///
/// Exact halves round to the even integer, so an odd tempo above the band
/// folds down: 161 becomes 80, 163 becomes 82.
pub fn normalize_bpm(bpm: f64) -> u32 {
    let folded = if bpm > MAX_BPM {
        bpm / 2.0
    } else if bpm < MIN_BPM {
        bpm * 2.0
    } else {
        bpm
    };
    folded.round_ties_even().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_in_band_unchanged() {
        assert_eq!(normalize_bpm(60.0), 60);
        assert_eq!(normalize_bpm(120.0), 120);
        assert_eq!(normalize_bpm(160.0), 160);
        assert_eq!(normalize_bpm(127.6), 128);
    }

    #[test]
    fn test_normalize_folds_once() {
        assert_eq!(normalize_bpm(200.0), 100);
        assert_eq!(normalize_bpm(240.0), 120);
        assert_eq!(normalize_bpm(40.0), 80);
        assert_eq!(normalize_bpm(59.6), 119);
        // Only one pass
        assert_eq!(normalize_bpm(500.0), 250);
        assert_eq!(normalize_bpm(20.0), 40);
    }

    #[test]
    fn test_normalize_rounds_halves_to_even() {
        assert_eq!(normalize_bpm(319.0), 160);
        assert_eq!(normalize_bpm(161.0), 80);
        assert_eq!(normalize_bpm(163.0), 82);
        assert_eq!(normalize_bpm(165.0), 82);
        assert_eq!(normalize_bpm(59.75), 120);
    }

    #[test]
    fn test_normalize_idempotent_in_coverage() {
        for x in 30..=320 {
            let once = normalize_bpm(x as f64);
            assert!((60..=160).contains(&once), "{} -> {}", x, once);
            assert_eq!(normalize_bpm(once as f64), once);
        }
    }
}
