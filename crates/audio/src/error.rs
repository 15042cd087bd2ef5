/// Error type for audio loading and decoding.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported audio format '{ext}'. Supported formats: {supported}")]
    UnsupportedFormat { ext: String, supported: String },

    #[error("Unable to decode audio: {0}")]
    Decode(String),

    #[error("Decoded audio is empty")]
    Empty,

    #[error("Audio duration {duration:.2}s is less than minimum {minimum:.2}s")]
    TooShort { duration: f64, minimum: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
