//! FFmpeg subprocess decoder.
//!
//! Decodes any supported container/codec to mono 32-bit float PCM on
//! stdout. Used as the fallback when the native WAV reader cannot handle
//! a file (mp3, flac, aiff, compressed wav).

use std::path::Path;

use crate::error::AudioError;

/// Samplerate requested from ffmpeg.
pub const OUTPUT_SAMPLERATE: u32 = 44_100;

/// Resolve the ffmpeg binary, overridable via `FFMPEG_BINARY`.
fn ffmpeg_binary() -> String {
    std::env::var("FFMPEG_BINARY").unwrap_or_else(|_| "ffmpeg".into())
}

/// Decode a file to mono f32 samples at [`OUTPUT_SAMPLERATE`].
pub async fn decode(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let output = tokio::process::Command::new(ffmpeg_binary())
        .args(["-loglevel", "error", "-i"])
        .arg(path)
        .args([
            "-ac",
            "1",
            "-ar",
            &OUTPUT_SAMPLERATE.to_string(),
            "-f",
            "f32le",
            "pipe:1",
        ])
        .output()
        .await
        .map_err(|e| AudioError::Decode(format!("Failed to spawn ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AudioError::Decode(format!(
            "ffmpeg failed to decode {} (exit code {:?}): {}",
            path.display(),
            output.status.code(),
            stderr.trim()
        )));
    }

    let samples: Vec<f32> = output
        .stdout
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        "ffmpeg decode finished"
    );

    Ok((samples, OUTPUT_SAMPLERATE))
}
