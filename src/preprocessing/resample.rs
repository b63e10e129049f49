//! Sample-rate conversion for decoded audio

use crate::error::AnalysisError;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Input frames fed to the resampler per call
const CHUNK_SIZE: usize = 1024;

/// Resample mono audio from `from_rate` to `to_rate` with a windowed-sinc resampler
///
/// The signal is fed in fixed-size chunks and the resampler is flushed at the
/// end. Its output delay is removed, so sample `n` of the input lines up with
/// sample `n * to_rate / from_rate` of the output and the output holds
/// `round(len * to_rate / from_rate)` samples. Equal rates return the input
/// unchanged.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AnalysisError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Cannot resample between {} Hz and {} Hz",
            from_rate, to_rate
        )));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    log::debug!(
        "Resampling {} samples from {} Hz to {} Hz",
        samples.len(),
        from_rate,
        to_rate
    );

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_SIZE, 1)
        .map_err(|e| AnalysisError::DecodingError(format!("Failed to create resampler: {}", e)))?;

    let delay = resampler.output_delay();
    let expected = (samples.len() as f64 * ratio).round() as usize;
    let mut output: Vec<f32> = Vec::with_capacity(expected + delay + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        let input = [chunk];
        let out = resampler.process(&input[..], None).map_err(resample_error)?;
        output.extend_from_slice(&out[0]);
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let input = [remainder];
        let out = resampler
            .process_partial(Some(&input[..]), None)
            .map_err(resample_error)?;
        output.extend_from_slice(&out[0]);
    }

    // Flush the samples still held back by the sinc filter
    while output.len() < expected + delay {
        let out = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(resample_error)?;
        if out[0].is_empty() {
            break;
        }
        output.extend_from_slice(&out[0]);
    }

    let mut aligned = output.split_off(delay.min(output.len()));
    aligned.truncate(expected);
    Ok(aligned)
}

fn resample_error(err: rubato::ResampleError) -> AnalysisError {
    AnalysisError::DecodingError(format!("Resampling failed: {}", err))
}
