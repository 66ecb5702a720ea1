//! WAV payload decoding.
//!
//! Uploads are decoded with `hound`, scaled to [-1, 1], averaged to mono
//! and resampled to 16 kHz with `rubato` when needed.

use std::io::Cursor;

use rubato::{FftFixedIn, Resampler};

use biogate_core::{
    types::{Waveform, TARGET_SAMPLE_RATE},
    Error, Result,
};

/// Input frames per resampler call.
const RESAMPLE_CHUNK: usize = 1024;

/// Highest source rate accepted. The resampler's FFT grows with the rate
/// divided by its gcd with 16 kHz, so header values are bounded first.
const MAX_SAMPLE_RATE: u32 = 384_000;

/// Decode a WAV upload into a 16 kHz mono waveform.
pub fn decode_wav(bytes: &[u8]) -> Result<Waveform> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).map_err(invalid_audio)?;
    let spec = reader.spec();
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(Error::input_decode("Invalid audio data: empty format"));
    }
    if spec.sample_rate > MAX_SAMPLE_RATE {
        return Err(Error::input_decode("Invalid audio data: unsupported sample rate"));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(invalid_audio)?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(invalid_audio)?
        }
    };

    let mono = downmix(&interleaved, spec.channels as usize);
    let samples = if spec.sample_rate == TARGET_SAMPLE_RATE {
        mono
    } else {
        resample(&mono, spec.sample_rate, TARGET_SAMPLE_RATE)?
    };

    let waveform = Waveform::new(samples, TARGET_SAMPLE_RATE);
    tracing::debug!(
        source_rate = spec.sample_rate,
        channels = spec.channels,
        samples = waveform.len(),
        duration_secs = waveform.duration_secs(),
        "Audio decoded"
    );
    Ok(waveform)
}

fn invalid_audio(e: hound::Error) -> Error {
    Error::input_decode(format!("Invalid audio data: {}", e))
}

fn resample_error(e: impl std::fmt::Display) -> Error {
    Error::input_decode(format!("Resampling failed: {}", e))
}

/// Average interleaved channels into one.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn resample(samples: &[f32], from: u32, to: u32) -> Result<Vec<f32>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let mut resampler = FftFixedIn::<f32>::new(from as usize, to as usize, RESAMPLE_CHUNK, 2, 1)
        .map_err(resample_error)?;

    let expected = (samples.len() as u64 * to as u64 / from as u64) as usize;
    let mut out = Vec::with_capacity(expected + RESAMPLE_CHUNK);
    let mut pos = 0;

    while pos + resampler.input_frames_next() <= samples.len() {
        let needed = resampler.input_frames_next();
        let chunk = [&samples[pos..pos + needed]];
        let frames = resampler
            .process(&chunk[..], None)
            .map_err(resample_error)?;
        out.extend_from_slice(&frames[0]);
        pos += needed;
    }

    if pos < samples.len() {
        let tail = [&samples[pos..]];
        let frames = resampler
            .process_partial(Some(&tail[..]), None)
            .map_err(resample_error)?;
        out.extend_from_slice(&frames[0]);
    }

    // Flush the samples still held back by the filter delay.
    let frames = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(resample_error)?;
    out.extend_from_slice(&frames[0]);

    let delay = resampler.output_delay();
    Ok(out.into_iter().skip(delay).take(expected).collect())
}
