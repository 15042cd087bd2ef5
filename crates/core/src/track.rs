//! Track processing lifecycle.
//!
//! A track moves through `uploaded -> loaded -> extracting -> features_ready`
//! as the worker processes it. `error` is terminal and can be entered from
//! any non-terminal state. Status strings are stored verbatim in the
//! `tracks.status` column and returned verbatim over the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Processing state of an uploaded track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    /// File stored on disk, no processing attempted yet.
    Uploaded,
    /// Decoded successfully; samplerate and duration are known.
    Loaded,
    /// Feature extraction in progress.
    Extracting,
    /// Features extracted and persisted.
    FeaturesReady,
    /// Processing failed; `error_message` carries the cause.
    Error,
}

impl TrackStatus {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TrackStatus::Uploaded => "uploaded",
            TrackStatus::Loaded => "loaded",
            TrackStatus::Extracting => "extracting",
            TrackStatus::FeaturesReady => "features_ready",
            TrackStatus::Error => "error",
        }
    }

    /// Whether no further processing will happen to this track.
    pub fn is_terminal(self) -> bool {
        matches!(self, TrackStatus::FeaturesReady | TrackStatus::Error)
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(TrackStatus::Uploaded),
            "loaded" => Ok(TrackStatus::Loaded),
            "extracting" => Ok(TrackStatus::Extracting),
            "features_ready" => Ok(TrackStatus::FeaturesReady),
            "error" => Ok(TrackStatus::Error),
            other => Err(format!("Unknown track status: {other}")),
        }
    }
}
