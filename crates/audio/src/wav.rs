//! Native RIFF/WAVE decoder.
//!
//! Handles the PCM encodings that uploads actually arrive in (8/16/24/32-bit
//! integer and 32-bit float, including the WAVE_FORMAT_EXTENSIBLE wrapper).
//! Compressed WAV payloads fall through to the ffmpeg decoder.

use crate::error::AudioError;

/// Integer PCM format tag.
const FORMAT_PCM: u16 = 0x0001;
/// IEEE float format tag.
const FORMAT_IEEE_FLOAT: u16 = 0x0003;
/// Extensible wrapper; the real format tag is in the fmt chunk extension.
const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Parsed `fmt ` chunk fields we care about.
#[derive(Debug, Clone, Copy)]
struct WavFormat {
    format_tag: u16,
    channels: u16,
    samplerate: u32,
    bits_per_sample: u16,
}

/// Decoded interleaved samples plus stream parameters.
#[derive(Debug)]
pub struct WavAudio {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub samplerate: u32,
}

/// Decode a WAV file from raw bytes.
pub fn decode(bytes: &[u8]) -> Result<WavAudio, AudioError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(AudioError::Decode("Not a RIFF/WAVE file".into()));
    }

    let mut format: Option<WavFormat> = None;
    let mut data: Option<&[u8]> = None;

    // Walk the chunk list. Chunks are 2-byte aligned.
    let mut pos = 12usize;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let size = u32::from_le_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]) as usize;
        let body_start = pos + 8;
        let body_end = body_start
            .checked_add(size)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| AudioError::Decode("Truncated WAV chunk".into()))?;
        let body = &bytes[body_start..body_end];

        match id {
            b"fmt " => format = Some(parse_fmt(body)?),
            b"data" => data = Some(body),
            _ => {}
        }

        pos = body_end + (size & 1);
    }

    let format = format.ok_or_else(|| AudioError::Decode("WAV file has no fmt chunk".into()))?;
    let data = data.ok_or_else(|| AudioError::Decode("WAV file has no data chunk".into()))?;

    if format.channels == 0 {
        return Err(AudioError::Decode("WAV fmt chunk declares 0 channels".into()));
    }

    let samples = decode_samples(&format, data)?;
    Ok(WavAudio {
        samples,
        channels: format.channels,
        samplerate: format.samplerate,
    })
}

fn parse_fmt(body: &[u8]) -> Result<WavFormat, AudioError> {
    if body.len() < 16 {
        return Err(AudioError::Decode("WAV fmt chunk too small".into()));
    }

    let mut format_tag = u16::from_le_bytes([body[0], body[1]]);
    let channels = u16::from_le_bytes([body[2], body[3]]);
    let samplerate = u32::from_le_bytes([body[4], body[5], body[6], body[7]]);
    let bits_per_sample = u16::from_le_bytes([body[14], body[15]]);

    if format_tag == FORMAT_EXTENSIBLE {
        // The sub-format GUID starts at offset 24; its first two bytes
        // are the effective format tag.
        if body.len() < 26 {
            return Err(AudioError::Decode("WAV extensible fmt chunk too small".into()));
        }
        format_tag = u16::from_le_bytes([body[24], body[25]]);
    }

    Ok(WavFormat {
        format_tag,
        channels,
        samplerate,
        bits_per_sample,
    })
}

fn decode_samples(format: &WavFormat, data: &[u8]) -> Result<Vec<f32>, AudioError> {
    match (format.format_tag, format.bits_per_sample) {
        (FORMAT_PCM, 8) => Ok(data
            .iter()
            .map(|&b| (f32::from(b) - 128.0) / 128.0)
            .collect()),
        (FORMAT_PCM, 16) => Ok(data
            .chunks_exact(2)
            .map(|c| f32::from(i16::from_le_bytes([c[0], c[1]])) / 32_768.0)
            .collect()),
        (FORMAT_PCM, 24) => Ok(data
            .chunks_exact(3)
            .map(|c| {
                let raw = i32::from_le_bytes([0, c[0], c[1], c[2]]) >> 8;
                raw as f32 / 8_388_608.0
            })
            .collect()),
        (FORMAT_PCM, 32) => Ok(data
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f32 / 2_147_483_648.0)
            .collect()),
        (FORMAT_IEEE_FLOAT, 32) => Ok(data
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()),
        (tag, bits) => Err(AudioError::Decode(format!(
            "Unsupported WAV encoding (format tag {tag:#06x}, {bits} bits per sample)"
        ))),
    }
}
