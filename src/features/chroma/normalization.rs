//! Pitch-class distribution
//!
//! Collapses a chromagram over time and rescales it so only the relative
//! energy balance between pitch classes remains.

use super::extractor::N_CHROMA;
use crate::error::AnalysisError;

/// Normalized 12-element pitch-class energy profile, index 0 = C, maximum element 1.0
pub type PitchClassDistribution = [f32; N_CHROMA];

/// Sum chroma frames and divide by the largest pitch-class total
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty chromagram and
/// `AnalysisError::ProcessingError` when every pitch class has zero energy
/// (silence), since no key can be inferred from it.
pub fn pitch_class_distribution(
    chroma: &[[f32; N_CHROMA]],
) -> Result<PitchClassDistribution, AnalysisError> {
    if chroma.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty chromagram".to_string()));
    }

    let mut totals = [0.0f64; N_CHROMA];
    for frame in chroma {
        for (total, &v) in totals.iter_mut().zip(frame.iter()) {
            *total += v as f64;
        }
    }

    let max = totals.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return Err(AnalysisError::ProcessingError(
            "Pitch-class distribution has no energy".to_string(),
        ));
    }

    let mut pcd = [0.0f32; N_CHROMA];
    for (p, &t) in pcd.iter_mut().zip(totals.iter()) {
        *p = (t / max) as f32;
    }
    log::debug!("Pitch-class distribution from {} frames: {:?}", chroma.len(), pcd);
    Ok(pcd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcd_sum_and_scale() {
        let mut a = [0.0f32; 12];
        a[0] = 1.0;
        a[7] = 0.5;
        let mut b = [0.0f32; 12];
        b[0] = 1.0;
        b[4] = 1.0;
        let pcd = pitch_class_distribution(&[a, b]).unwrap();
        assert_eq!(pcd[0], 1.0);
        assert_eq!(pcd[4], 0.5);
        assert_eq!(pcd[7], 0.25);
        assert_eq!(pcd[1], 0.0);
    }

    #[test]
    fn test_pcd_silent_is_error() {
        assert!(matches!(
            pitch_class_distribution(&[[0.0; 12]; 4]),
            Err(AnalysisError::ProcessingError(_))
        ));
        assert!(pitch_class_distribution(&[]).is_err());
    }
}
