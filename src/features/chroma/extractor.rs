//! Chroma vector extraction
//!
//! Projects an STFT power spectrogram onto 12 pitch classes through a fixed
//! filterbank. Each FFT bin contributes a Gaussian bump around its fractional
//! pitch class; bins far from the centre octave are down-weighted.

use crate::error::AnalysisError;
use crate::features::stft::stft;

/// Number of pitch classes
pub const N_CHROMA: usize = 12;

/// Centre octave of the octave weighting (A440 is octave 4)
const CENTER_OCTAVE: f32 = 5.0;

/// Width in octaves of the octave weighting
const OCTAVE_WIDTH: f32 = 2.0;

/// Fractional octave numbers relative to A0 (27.5 Hz at zero tuning)
fn hz_to_octaves(frequency: f32, tuning: f32) -> f32 {
    let a440 = 440.0 * 2.0f32.powf(tuning / N_CHROMA as f32);
    (frequency / (a440 / 16.0)).log2()
}

/// Build the chroma filterbank (12 × `n_fft / 2 + 1`), row 0 = C
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `n_fft` - FFT size
/// * `tuning` - Deviation from A440 in fractions of a chroma bin
pub fn chroma_filterbank(sample_rate: u32, n_fft: usize, tuning: f32) -> Vec<Vec<f32>> {
    let n_bins = n_fft / 2 + 1;
    if n_fft == 0 {
        return vec![Vec::new(); N_CHROMA];
    }
    let n_chroma = N_CHROMA as f32;

    // Fractional chroma bin of every FFT bin; DC gets a made-up value 1.5 octaves below bin 1
    let mut frqbins: Vec<f32> = (1..n_fft)
        .map(|k| n_chroma * hz_to_octaves(k as f32 * sample_rate as f32 / n_fft as f32, tuning))
        .collect();
    let dc = frqbins.first().map_or(0.0, |&first| first - 1.5 * n_chroma);
    frqbins.insert(0, dc);

    let widths: Vec<f32> = (0..frqbins.len())
        .map(|k| match frqbins.get(k + 1) {
            Some(&next) => (next - frqbins[k]).max(1.0),
            None => 1.0,
        })
        .collect();

    let half = (n_chroma / 2.0).round();
    let mut weights = vec![vec![0.0f32; n_bins]; N_CHROMA];
    for (chroma, row) in weights.iter_mut().enumerate() {
        for (bin, w) in row.iter_mut().enumerate() {
            // Distance wrapped into [-6, 6)
            let d = (frqbins[bin] - chroma as f32 + half + 10.0 * n_chroma).rem_euclid(n_chroma) - half;
            *w = (-0.5 * (2.0 * d / widths[bin]).powi(2)).exp();
        }
    }

    for bin in 0..n_bins {
        let norm = weights
            .iter()
            .map(|row| (row[bin] as f64).powi(2))
            .sum::<f64>()
            .sqrt()
            .max(1e-10);
        let octave = frqbins[bin] / n_chroma;
        let octave_weight = (-0.5 * ((octave - CENTER_OCTAVE) / OCTAVE_WIDTH).powi(2)).exp();
        for row in weights.iter_mut() {
            row[bin] = (row[bin] as f64 / norm) as f32 * octave_weight;
        }
    }

    // Rows are built starting at A; rotate so that row 0 is C
    weights.rotate_left(3);
    weights
}

/// Scale a chroma frame so its largest element is 1; silent frames stay zero
pub fn normalize_frame(frame: &mut [f32]) {
    let max = frame.iter().fold(0.0f32, |m, &v| m.max(v.abs()));
    if max > f32::MIN_POSITIVE {
        for v in frame.iter_mut() {
            *v /= max;
        }
    }
}

/// Compute a chromagram from a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `n_fft` - FFT size (default: 2048)
/// * `hop_size` - Hop size (default: 512)
/// * `tuning` - Deviation from A440 in fractions of a chroma bin
///
/// # Returns
///
/// One 12-element chroma vector per STFT frame, each normalized to a maximum of 1
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for empty input or invalid STFT parameters
pub fn chroma_stft(
    samples: &[f32],
    sample_rate: u32,
    n_fft: usize,
    hop_size: usize,
    tuning: f32,
) -> Result<Vec<[f32; N_CHROMA]>, AnalysisError> {
    log::debug!(
        "Extracting chroma: {} samples at {} Hz, n_fft={}, hop={}",
        samples.len(),
        sample_rate,
        n_fft,
        hop_size
    );

    let spectrogram = stft(samples, sample_rate, n_fft, hop_size)?;
    let filterbank = chroma_filterbank(sample_rate, n_fft, tuning);

    let chroma = spectrogram
        .power()
        .iter()
        .map(|power| {
            let mut frame = [0.0f32; N_CHROMA];
            for (value, row) in frame.iter_mut().zip(filterbank.iter()) {
                *value = row
                    .iter()
                    .zip(power.iter())
                    .map(|(&w, &p)| w as f64 * p as f64)
                    .sum::<f64>() as f32;
            }
            normalize_frame(&mut frame);
            frame
        })
        .collect();

    Ok(chroma)
}
