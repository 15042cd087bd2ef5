//! Repository for the `audio_features` table.

use sqlx::PgPool;

use crate::models::audio_feature::{AudioFeature, UpsertAudioFeature};

/// Column list for `audio_features` queries.
const COLUMNS: &str = "id, track_id, bpm, key, key_strength, spectral_centroid, \
     rms, peak_amplitude, mfcc, created_at, updated_at";

/// Provides access to per-track extracted features.
pub struct AudioFeatureRepo;

impl AudioFeatureRepo {
    /// Insert or replace the feature row for a track.
    ///
    /// Re-extraction overwrites previous values; the `uq_audio_features_track_id`
    /// constraint guarantees at most one row per track.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertAudioFeature,
    ) -> Result<AudioFeature, sqlx::Error> {
        let query = format!(
            "INSERT INTO audio_features \
                (track_id, spectral_centroid, rms, peak_amplitude, mfcc) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT ON CONSTRAINT uq_audio_features_track_id DO UPDATE SET \
                spectral_centroid = EXCLUDED.spectral_centroid, \
                rms = EXCLUDED.rms, \
                peak_amplitude = EXCLUDED.peak_amplitude, \
                mfcc = EXCLUDED.mfcc, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AudioFeature>(&query)
            .bind(&input.track_id)
            .bind(input.spectral_centroid)
            .bind(input.rms)
            .bind(input.peak_amplitude)
            .bind(&input.mfcc)
            .fetch_one(pool)
            .await
    }

    /// Find the feature row for a track, if extraction has completed.
    pub async fn find_by_track(
        pool: &PgPool,
        track_id: &str,
    ) -> Result<Option<AudioFeature>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audio_features WHERE track_id = $1");
        sqlx::query_as::<_, AudioFeature>(&query)
            .bind(track_id)
            .fetch_optional(pool)
            .await
    }
}
