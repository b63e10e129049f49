//! Audio file loading using Symphonia
//!
//! Decodes any format Symphonia is built with, downmixes to mono and
//! optionally resamples to a fixed analysis rate.

use super::Waveform;
use crate::config::LoadOptions;
use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::downmix_interleaved;
use crate::preprocessing::resample::resample;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

fn decoding_error(context: &str, path: &Path, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::DecodingError(format!("{} '{}': {}", context, path.display(), err))
}

/// Decode an audio file to interleaved samples
///
/// # Returns
///
/// Tuple of (interleaved samples, sample_rate, channels)
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file cannot be opened, has no
/// audio track, or fails to decode
pub fn decode_audio(path: &Path) -> Result<(Vec<f32>, u32, usize), AnalysisError> {
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path).map_err(|e| decoding_error("Failed to open", path, e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| decoding_error("Unsupported or malformed audio in", path, e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decoding_error("No audio track in", path, "no decodable track"))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decoding_error("No decoder for", path, e))?;

    let mut interleaved: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decoding_error("Failed to read", path, e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping corrupt packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(decoding_error("Failed to decode", path, e)),
        };

        let spec = *decoded.spec();
        sample_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count());

        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        interleaved.extend_from_slice(buffer.samples());
    }

    let sample_rate = sample_rate
        .ok_or_else(|| decoding_error("Unknown sample rate in", path, "no rate in stream"))?;
    let channels = channels.unwrap_or(1).max(1);
    Ok((interleaved, sample_rate, channels))
}

/// Load an audio file as a mono waveform
///
/// # Arguments
///
/// * `path` - Audio file (mp3, flac, wav, m4a, ogg, ...)
/// * `options` - Target sample rate; `None` keeps the native rate
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if decoding or resampling fails, and
/// `AnalysisError::InvalidInput` if the file decodes to no samples
///
/// # Example
///
/// ```no_run
/// use composer_dsp::config::LoadOptions;
/// use composer_dsp::io::load_waveform;
///
/// let waveform = load_waveform("track.flac".as_ref(), &LoadOptions::default())?;
/// println!("{:.1}s at {} Hz", waveform.duration_seconds(), waveform.sample_rate());
/// # Ok::<(), composer_dsp::AnalysisError>(())
/// ```
pub fn load_waveform(path: &Path, options: &LoadOptions) -> Result<Waveform, AnalysisError> {
    let (interleaved, native_rate, channels) = decode_audio(path)?;
    let mono = downmix_interleaved(&interleaved, channels);
    if mono.is_empty() {
        return Err(AnalysisError::InvalidInput(format!(
            "'{}' contains no audio samples",
            path.display()
        )));
    }

    let (samples, sample_rate) = match options.target_sample_rate {
        Some(target) if target != native_rate => (resample(&mono, native_rate, target)?, target),
        _ => (mono, native_rate),
    };

    log::info!(
        "Loaded {}: {} samples, {} Hz, {:.1}s",
        path.display(),
        samples.len(),
        sample_rate,
        samples.len() as f32 / sample_rate as f32
    );

    Waveform::new(samples, sample_rate)
}
