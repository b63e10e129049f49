//! Key prediction by circular template correlation
//!
//! The pitch-class distribution and both key profiles are z-scored; each row of
//! a profile's rotation matrix places the tonic on a different pitch class. The
//! dot product of a row with the z-scored PCD is 12 × the Pearson correlation,
//! so the best row of each mode names that mode's most likely tonic.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). *Cognitive Foundations of Musical Pitch*. Oxford University Press.

use super::templates::{zscore, KeyTemplates, RotationMatrix};
use super::KeyPrediction;
use crate::analysis::result::Key;
use crate::error::AnalysisError;

/// Correlation score of an exact profile match
const PERFECT_SCORE: f64 = 12.0;

/// Score every rotation of a mode against the z-scored PCD
fn score_rotations(matrix: &RotationMatrix, pcd: &[f64; 12]) -> [f64; 12] {
    let mut scores = [0.0; 12];
    for (score, row) in scores.iter_mut().zip(matrix.iter()) {
        *score = row.iter().zip(pcd.iter()).map(|(a, b)| a * b).sum();
    }
    scores
}

/// Index and value of the first maximum
fn best(scores: &[f64; 12]) -> (usize, f64) {
    let mut best = (0, scores[0]);
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > best.1 {
            best = (i, s);
        }
    }
    best
}

/// Predict the key of a pitch-class distribution
///
/// # Arguments
///
/// * `pcd` - 12-element pitch-class energies, index 0 = C (any positive scale)
/// * `templates` - Z-scored rotation matrices
///
/// # Returns
///
/// The winning key and its confidence (`score / 12 × 100`). The major family
/// wins only with a strictly higher score; ties go to minor. The confidence is
/// not clamped and can leave [0, 100] for unusual inputs.
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if the PCD has zero variance, since
/// it carries no tonal information then.
///
/// # Example
///
/// ```
/// use composer_dsp::analysis::result::Key;
/// use composer_dsp::features::key::{detector::detect_key, templates::{KeyTemplates, MAJOR_PROFILE}};
///
/// let pcd = MAJOR_PROFILE.map(|v| v as f32);
/// let prediction = detect_key(&pcd, KeyTemplates::shared())?;
/// assert_eq!(prediction.key, Key::Major(0));
/// assert!((prediction.confidence - 100.0).abs() < 1e-3);
/// # Ok::<(), composer_dsp::AnalysisError>(())
/// ```
pub fn detect_key(pcd: &[f32; 12], templates: &KeyTemplates) -> Result<KeyPrediction, AnalysisError> {
    let pcd = pcd.map(|v| v as f64);
    if pcd.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::InvalidInput(
            "Pitch-class distribution contains non-finite values".to_string(),
        ));
    }
    let z = zscore(&pcd).ok_or_else(|| {
        AnalysisError::ProcessingError(
            "Pitch-class distribution has zero variance".to_string(),
        )
    })?;

    let major_scores = score_rotations(&templates.major, &z);
    let minor_scores = score_rotations(&templates.minor, &z);
    let (major_tonic, major_best) = best(&major_scores);
    let (minor_tonic, minor_best) = best(&minor_scores);

    let (key, score) = if major_best > minor_best {
        (Key::Major(major_tonic as u32), major_best)
    } else {
        (Key::Minor(minor_tonic as u32), minor_best)
    };

    let confidence = (score / PERFECT_SCORE * 100.0) as f32;
    log::debug!(
        "Key scores: best major {} ({:.3}), best minor {} ({:.3}) -> {} ({:.1}%)",
        Key::Major(major_tonic as u32).name(),
        major_best,
        Key::Minor(minor_tonic as u32).name(),
        minor_best,
        key,
        confidence
    );

    Ok(KeyPrediction {
        key,
        confidence,
        major_scores: major_scores.map(|s| s as f32),
        minor_scores: minor_scores.map(|s| s as f32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::key::templates::{MAJOR_PROFILE, MINOR_PROFILE};

    fn rotate(profile: &[f64; 12], tonic: usize) -> [f32; 12] {
        let mut out = [0.0f32; 12];
        for (j, o) in out.iter_mut().enumerate() {
            *o = profile[(j + 12 - tonic) % 12] as f32;
        }
        out
    }

    #[test]
    fn test_c_major_profile_is_perfect_match() {
        let prediction = detect_key(&rotate(&MAJOR_PROFILE, 0), KeyTemplates::shared()).unwrap();
        assert_eq!(prediction.key, Key::Major(0));
        assert!((prediction.confidence - 100.0).abs() < 1e-3);
        let max_major = prediction
            .major_scores
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(max_major, prediction.major_scores[0]);
    }

    #[test]
    fn test_every_rotation_recovers_tonic() {
        for tonic in 0..12 {
            let major = detect_key(&rotate(&MAJOR_PROFILE, tonic), KeyTemplates::shared()).unwrap();
            assert_eq!(major.key, Key::Major(tonic as u32));

            let minor = detect_key(&rotate(&MINOR_PROFILE, tonic), KeyTemplates::shared()).unwrap();
            assert_eq!(minor.key, Key::Minor(tonic as u32));
            assert!((minor.confidence - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scale_invariance() {
        let pcd = rotate(&MINOR_PROFILE, 9);
        let scaled = pcd.map(|v| v / 6.33);
        let a = detect_key(&pcd, KeyTemplates::shared()).unwrap();
        let b = detect_key(&scaled, KeyTemplates::shared()).unwrap();
        assert_eq!(a.key, Key::Minor(9));
        assert_eq!(a.key, b.key);
        assert!((a.confidence - b.confidence).abs() < 1e-3);
    }

    #[test]
    fn test_flat_pcd_rejected() {
        assert!(matches!(
            detect_key(&[1.0; 12], KeyTemplates::shared()),
            Err(AnalysisError::ProcessingError(_))
        ));
        let mut bad = [0.5f32; 12];
        bad[3] = f32::NAN;
        assert!(detect_key(&bad, KeyTemplates::shared()).is_err());
    }

    #[test]
    fn test_single_pitch_class() {
        // Energy only on G: scores are the z-scored profile values at G
        let mut pcd = [0.0f32; 12];
        pcd[7] = 1.0;
        let prediction = detect_key(&pcd, KeyTemplates::shared()).unwrap();
        assert!(prediction.confidence > 0.0);
        assert_eq!(prediction.key.tonic(), 7);
    }
}
