//! Decoder chain and post-processing.
//!
//! Mirrors the upload contract: a file is accepted if its extension is in
//! [`SUPPORTED_FORMATS`], then each decoder is tried in order until one
//! succeeds. Whatever a decoder produces is normalised to mono f32 and
//! validated against minimum-duration rules before being handed to
//! feature extraction.

use std::path::Path;

use async_trait::async_trait;

use crate::error::AudioError;
use crate::{ffmpeg, wav};

/// File extensions accepted by the upload endpoint and the loader.
pub const SUPPORTED_FORMATS: [&str; 5] = [".wav", ".mp3", ".aif", ".aiff", ".flac"];

/// Tracks shorter than this are rejected.
pub const MIN_DURATION_SECONDS: f64 = 0.5;

/// Raw decoder output before post-processing.
pub struct DecodedAudio {
    /// Interleaved samples (frame-major for multi-channel audio).
    pub samples: Vec<f32>,
    pub channels: u16,
    pub samplerate: u32,
}

/// Final, normalised loader output: mono samples.
#[derive(Debug)]
pub struct LoadedAudio {
    pub samples: Vec<f32>,
    pub samplerate: u32,
}

impl LoadedAudio {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.samplerate)
    }
}

/// A single decoding strategy in the chain.
#[async_trait]
trait Decoder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn decode(&self, path: &Path) -> Result<DecodedAudio, AudioError>;
}

struct WavDecoder;

#[async_trait]
impl Decoder for WavDecoder {
    fn name(&self) -> &'static str {
        "wav"
    }

    async fn decode(&self, path: &Path) -> Result<DecodedAudio, AudioError> {
        let bytes = tokio::fs::read(path).await?;
        let audio = wav::decode(&bytes)?;
        Ok(DecodedAudio {
            samples: audio.samples,
            channels: audio.channels,
            samplerate: audio.samplerate,
        })
    }
}

struct FfmpegDecoder;

#[async_trait]
impl Decoder for FfmpegDecoder {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    async fn decode(&self, path: &Path) -> Result<DecodedAudio, AudioError> {
        let (samples, samplerate) = ffmpeg::decode(path).await?;
        Ok(DecodedAudio {
            samples,
            channels: 1,
            samplerate,
        })
    }
}

/// Decode audio from disk, normalised to mono f32.
///
/// Tries each decoder in order and keeps the last error; if every decoder
/// fails the file is reported as undecodable with that error attached.
pub async fn load_audio(path: &Path) -> Result<LoadedAudio, AudioError> {
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.display().to_string()));
    }

    check_extension(path)?;

    let decoders: [&dyn Decoder; 2] = [&WavDecoder, &FfmpegDecoder];

    let mut last_error: Option<AudioError> = None;
    for decoder in decoders {
        match decoder.decode(path).await {
            Ok(decoded) => match post_process(decoded) {
                Ok(loaded) => {
                    tracing::debug!(
                        decoder = decoder.name(),
                        path = %path.display(),
                        samplerate = loaded.samplerate,
                        samples = loaded.samples.len(),
                        "Decoder succeeded"
                    );
                    return Ok(loaded);
                }
                Err(e @ (AudioError::Empty | AudioError::TooShort { .. })) => {
                    // Content-level failures will not improve with another
                    // decoder; surface them directly.
                    return Err(e);
                }
                Err(e) => {
                    tracing::debug!(decoder = decoder.name(), error = %e, "Post-process failed");
                    last_error = Some(e);
                }
            },
            Err(e) => {
                tracing::debug!(decoder = decoder.name(), error = %e, "Decoder failed");
                last_error = Some(e);
            }
        }
    }

    let last = last_error.map(|e| e.to_string()).unwrap_or_default();
    Err(AudioError::Decode(format!(
        "Unable to decode audio file {}: {last}",
        path.display()
    )))
}

/// Reject extensions outside [`SUPPORTED_FORMATS`] before any decode attempt.
fn check_extension(path: &Path) -> Result<(), AudioError> {
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    if SUPPORTED_FORMATS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(AudioError::UnsupportedFormat {
            ext,
            supported: SUPPORTED_FORMATS.join(", "),
        })
    }
}

/// Downmix to mono and enforce duration invariants.
fn post_process(decoded: DecodedAudio) -> Result<LoadedAudio, AudioError> {
    if decoded.samples.is_empty() {
        return Err(AudioError::Empty);
    }

    let samples = if decoded.channels > 1 {
        downmix(&decoded.samples, decoded.channels)
    } else {
        decoded.samples
    };

    let loaded = LoadedAudio {
        samples,
        samplerate: decoded.samplerate,
    };

    let duration = loaded.duration_secs();
    if duration <= 0.0 {
        return Err(AudioError::Empty);
    }
    if duration < MIN_DURATION_SECONDS {
        return Err(AudioError::TooShort {
            duration,
            minimum: MIN_DURATION_SECONDS,
        });
    }

    Ok(loaded)
}

/// Average interleaved channels into a mono buffer. Trailing partial
/// frames are dropped.
fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = usize::from(channels);
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
