//! Similarity score entity models.

use serde::Serialize;
use sqlx::FromRow;

use resona_core::types::{DbId, Timestamp};

/// A row from the `similarity_scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SimilarityScore {
    pub id: DbId,
    pub source_track_id: String,
    pub target_track_id: String,
    pub score: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry of a similar-tracks ranking, joined with the target track.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SimilarEntry {
    pub target_track_id: String,
    pub score: f64,
    pub original_filename: Option<String>,
    pub duration: Option<f64>,
}
