//! Audio decoding for the Resona platform.
//!
//! [`load_audio`] is the single entry point used by the worker: it decodes
//! a file from disk into mono f32 samples, trying a chain of decoders in
//! order (native WAV reader, then an ffmpeg subprocess for everything
//! else) and normalising the result.

pub mod error;
pub mod ffmpeg;
pub mod loader;
pub mod wav;

pub use error::AudioError;
pub use loader::{load_audio, DecodedAudio, LoadedAudio, MIN_DURATION_SECONDS, SUPPORTED_FORMATS};
