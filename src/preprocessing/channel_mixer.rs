//! Channel mixing utilities (multi-channel to mono conversion)

/// Average interleaved multi-channel samples down to mono
///
/// # Arguments
///
/// * `interleaved` - Interleaved samples (`[L0, R0, L1, R1, ...]` for stereo)
/// * `channels` - Number of interleaved channels
///
/// # Returns
///
/// Mono samples, one per frame. A trailing partial frame is averaged over the
/// channels it contains.
pub fn downmix_interleaved(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
