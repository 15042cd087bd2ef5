//! Audio feature entity model.

use serde::Serialize;
use sqlx::FromRow;

use resona_core::types::{DbId, Timestamp};

/// A row from the `audio_features` table.
///
/// The reserved analysis columns (`bpm`, `key`, `key_strength`) are kept
/// out of API responses until real values are produced.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AudioFeature {
    pub id: DbId,
    pub track_id: String,
    #[serde(skip_serializing)]
    pub bpm: Option<f64>,
    #[serde(skip_serializing)]
    pub key: Option<String>,
    #[serde(skip_serializing)]
    pub key_strength: Option<f64>,
    pub spectral_centroid: Option<f64>,
    pub rms: Option<f64>,
    pub peak_amplitude: Option<f64>,
    pub mfcc: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a track's extracted features.
#[derive(Debug, Clone)]
pub struct UpsertAudioFeature {
    pub track_id: String,
    pub spectral_centroid: f64,
    pub rms: f64,
    pub peak_amplitude: f64,
    pub mfcc: serde_json::Value,
}
