//! Track entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use resona_core::types::Timestamp;

/// A row from the `tracks` table.
///
/// Serializes the primary key as `track_id`, matching the API contract.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    #[serde(rename = "track_id")]
    pub id: String,
    pub original_filename: String,
    pub stored_path: String,
    pub status: String,
    pub samplerate: Option<i32>,
    pub duration: Option<f64>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a freshly uploaded track.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrack {
    pub id: String,
    pub original_filename: String,
    pub stored_path: String,
}

/// Decoded stream metadata recorded when a track loads successfully.
#[derive(Debug, Clone, Copy)]
pub struct LoadedMetadata {
    pub samplerate: i32,
    pub duration: f64,
}
