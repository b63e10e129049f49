//! Short-time Fourier transform
//!
//! Produces a complex spectrogram laid out as frames × bins. Frames are centred:
//! the signal is zero-padded by `n_fft / 2` on both sides so that frame `t`
//! is centred on sample `t * hop_size`.

use crate::error::AnalysisError;
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Complex spectrogram (n_frames × n_bins)
#[derive(Debug, Clone)]
pub struct Spectrogram {
    frames: Vec<Vec<Complex<f32>>>,
    n_fft: usize,
    hop_size: usize,
    sample_rate: u32,
}

impl Spectrogram {
    /// Complex frames, one `Vec` of `n_fft / 2 + 1` bins per frame
    pub fn frames(&self) -> &[Vec<Complex<f32>>] {
        &self.frames
    }

    /// Number of time frames
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame
    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// FFT size used to compute the spectrogram
    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// Hop size in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Sample rate of the analysed signal
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Time in seconds of the centre of frame `index`
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 * self.hop_size as f64 / self.sample_rate as f64
    }

    /// Magnitude spectrogram |X|
    pub fn magnitudes(&self) -> Vec<Vec<f32>> {
        self.frames
            .iter()
            .map(|frame| frame.iter().map(|c| c.norm()).collect())
            .collect()
    }

    /// Power spectrogram |X|²
    pub fn power(&self) -> Vec<Vec<f32>> {
        self.frames
            .iter()
            .map(|frame| frame.iter().map(|c| c.norm_sqr()).collect())
            .collect()
    }
}

/// Periodic Hann window of length `n`
pub fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
            0.5 - 0.5 * phase.cos()
        })
        .collect()
}

/// Compute the centred STFT of a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `n_fft` - FFT size, also the Hann window length
/// * `hop_size` - Hop size in samples
///
/// # Returns
///
/// Spectrogram with `1 + samples.len() / hop_size` frames of `n_fft / 2 + 1` bins
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty signal, a zero sample
/// rate, or a zero FFT/hop size.
pub fn stft(
    samples: &[f32],
    sample_rate: u32,
    n_fft: usize,
    hop_size: usize,
) -> Result<Spectrogram, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty audio samples".to_string()));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
    }
    if n_fft == 0 || hop_size == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "FFT size and hop size must be > 0 (n_fft={}, hop={})",
            n_fft, hop_size
        )));
    }

    let pad = n_fft / 2;
    let mut padded = vec![0.0f32; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);

    let n_frames = 1 + (padded.len() - n_fft) / hop_size;
    let n_bins = n_fft / 2 + 1;
    let window = hann_window(n_fft);

    log::debug!(
        "STFT: {} samples, n_fft={}, hop={}, {} frames × {} bins",
        samples.len(),
        n_fft,
        hop_size,
        n_frames,
        n_bins
    );

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);

    let frames: Vec<Vec<Complex<f32>>> = (0..n_frames)
        .into_par_iter()
        .map(|t| {
            let start = t * hop_size;
            let mut buffer: Vec<Complex<f32>> = padded[start..start + n_fft]
                .iter()
                .zip(window.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0))
                .collect();
            fft.process(&mut buffer);
            buffer.truncate(n_bins);
            buffer
        })
        .collect();

    Ok(Spectrogram {
        frames,
        n_fft,
        hop_size,
        sample_rate,
    })
}
