//! Click-track rendering for auditioning detected onsets
//!
//! Every onset becomes a 100 ms sine tone starting at the onset sample. The
//! buffer ends where the last tone ends, so every click fits.

use super::Waveform;
use crate::error::AnalysisError;
use crate::features::onset::OnsetSet;
use std::path::Path;

/// Duration of a single click in seconds
pub const CLICK_DURATION: f64 = 0.1;

/// Default click tone frequency in Hz
pub const DEFAULT_CLICK_FREQUENCY: f32 = 800.0;

/// Render onsets into a mono click track
///
/// # Arguments
///
/// * `onsets` - Onset times in seconds
/// * `sample_rate` - Output sample rate in Hz
/// * `frequency` - Click tone frequency in Hz
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for a zero sample rate
pub fn render_click_track(
    onsets: &OnsetSet,
    sample_rate: u32,
    frequency: f32,
) -> Result<Waveform, AnalysisError> {
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
    }

    let click_len = (CLICK_DURATION * sample_rate as f64) as usize;
    let tone: Vec<f32> = (0..click_len)
        .map(|i| (2.0 * std::f64::consts::PI * frequency as f64 * i as f64 / sample_rate as f64).sin() as f32)
        .collect();

    let starts: Vec<usize> = onsets
        .times()
        .iter()
        .map(|&t| (t * sample_rate as f64).round().max(0.0) as usize)
        .collect();
    let len = starts.last().map_or(0, |&last| last + click_len);

    let mut samples = vec![0.0f32; len];
    for &start in &starts {
        if start + click_len <= len {
            samples[start..start + click_len].copy_from_slice(&tone);
        }
    }

    log::debug!(
        "Rendered {} clicks into {} samples at {} Hz",
        starts.len(),
        len,
        sample_rate
    );
    Waveform::new(samples, sample_rate)
}

/// Render onsets into a click track and write it as a 16-bit mono WAV file
///
/// # Errors
///
/// Returns `AnalysisError::IoError` if the file cannot be written
pub fn write_click_track(
    path: &Path,
    onsets: &OnsetSet,
    sample_rate: u32,
    frequency: f32,
) -> Result<(), AnalysisError> {
    let waveform = render_click_track(onsets, sample_rate, frequency)?;
    let io_error = |e: hound::Error| {
        AnalysisError::IoError(format!("Failed to write click track '{}': {}", path.display(), e))
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(io_error)?;
    for &s in waveform.samples() {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
        writer.write_sample(v).map_err(io_error)?;
    }
    writer.finalize().map_err(io_error)?;

    log::info!("Wrote click track to {}", path.display());
    Ok(())
}
