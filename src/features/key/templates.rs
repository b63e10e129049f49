//! Krumhansl-Kessler key profiles
//!
//! Probe-tone ratings for the 12 scale degrees of a major and a minor key,
//! tonic first. The z-scored rotation matrices are built once per process.

use std::sync::OnceLock;

/// Major key profile (tonic = index 0)
pub const MAJOR_PROFILE: [f64; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Minor key profile (tonic = index 0)
pub const MINOR_PROFILE: [f64; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Row `i` is the z-scored profile rotated so its tonic sits on pitch class `i`
pub type RotationMatrix = [[f64; 12]; 12];

/// Z-scored rotation matrices for both modes
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    /// Major rotations
    pub major: RotationMatrix,

    /// Minor rotations
    pub minor: RotationMatrix,
}

impl KeyTemplates {
    /// Build the rotation matrices from the profile constants
    pub fn new() -> Self {
        Self {
            major: circulant(&zscore(&MAJOR_PROFILE).unwrap_or([0.0; 12])),
            minor: circulant(&zscore(&MINOR_PROFILE).unwrap_or([0.0; 12])),
        }
    }

    /// Process-wide shared instance
    pub fn shared() -> &'static KeyTemplates {
        static TEMPLATES: OnceLock<KeyTemplates> = OnceLock::new();
        TEMPLATES.get_or_init(KeyTemplates::new)
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}

/// Standardize to zero mean and unit population standard deviation
///
/// Returns `None` when all values are equal.
pub fn zscore(values: &[f64; 12]) -> Option<[f64; 12]> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    if std <= f64::EPSILON * mean.abs().max(1.0) {
        return None;
    }

    let mut out = [0.0; 12];
    for (o, v) in out.iter_mut().zip(values.iter()) {
        *o = (v - mean) / std;
    }
    Some(out)
}

/// Matrix whose row `i` is `profile` rotated right by `i`: `m[i][j] = profile[(j - i) mod 12]`
pub fn circulant(profile: &[f64; 12]) -> RotationMatrix {
    let mut m = [[0.0; 12]; 12];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = profile[(j + 12 - i) % 12];
        }
    }
    m
}
