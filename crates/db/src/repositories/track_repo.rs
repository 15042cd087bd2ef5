//! Repository for the `tracks` table.

use sqlx::PgPool;

use resona_core::track::TrackStatus;

use crate::models::track::{CreateTrack, LoadedMetadata, Track};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, original_filename, stored_path, status, samplerate, \
     duration, error_message, created_at, updated_at";

/// Provides CRUD operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a freshly uploaded track (status `uploaded`).
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (id, original_filename, stored_path, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(&input.id)
            .bind(&input.original_filename)
            .bind(&input.stored_path)
            .bind(TrackStatus::Uploaded.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a track by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tracks, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks ORDER BY created_at DESC");
        sqlx::query_as::<_, Track>(&query).fetch_all(pool).await
    }

    /// Record a successful decode: status `loaded` plus stream metadata.
    /// Clears any previous error message.
    pub async fn mark_loaded(
        pool: &PgPool,
        id: &str,
        metadata: LoadedMetadata,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET \
                status = $2, samplerate = $3, duration = $4, \
                error_message = NULL, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(TrackStatus::Loaded.as_str())
            .bind(metadata.samplerate)
            .bind(metadata.duration)
            .fetch_optional(pool)
            .await
    }

    /// Move a track to a new processing status, clearing the error message.
    pub async fn set_status(
        pool: &PgPool,
        id: &str,
        status: TrackStatus,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET status = $2, error_message = NULL, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Mark a track failed with the given error message.
    pub async fn set_error(
        pool: &PgPool,
        id: &str,
        message: &str,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET status = $2, error_message = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(TrackStatus::Error.as_str())
            .bind(message)
            .fetch_optional(pool)
            .await
    }

    /// IDs of all tracks whose features have been extracted, excluding
    /// the given track. Used for similarity recomputation.
    pub async fn feature_ready_ids_except(
        pool: &PgPool,
        exclude_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT id FROM tracks WHERE status = $1 AND id <> $2 ORDER BY id",
        )
        .bind(TrackStatus::FeaturesReady.as_str())
        .bind(exclude_id)
        .fetch_all(pool)
        .await
    }
}
