//! Repository for the `similarity_scores` table.

use sqlx::PgPool;

use crate::models::similarity::{SimilarEntry, SimilarityScore};

/// Column list for `similarity_scores` queries.
const COLUMNS: &str = "id, source_track_id, target_track_id, score, created_at, updated_at";

/// Maximum entries returned by a similar-tracks ranking.
pub const SIMILAR_LIMIT: i64 = 20;

/// Provides access to pairwise track similarity scores.
pub struct SimilarityRepo;

impl SimilarityRepo {
    /// Insert or refresh the score for a (source, target) pair.
    pub async fn upsert(
        pool: &PgPool,
        source_track_id: &str,
        target_track_id: &str,
        score: f64,
    ) -> Result<SimilarityScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO similarity_scores (source_track_id, target_track_id, score) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_similarity_source_target DO UPDATE SET \
                score = EXCLUDED.score, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SimilarityScore>(&query)
            .bind(source_track_id)
            .bind(target_track_id)
            .bind(score)
            .fetch_one(pool)
            .await
    }

    /// Top similar tracks for a source track, highest score first,
    /// joined with the target track for display fields.
    pub async fn top_similar(
        pool: &PgPool,
        source_track_id: &str,
    ) -> Result<Vec<SimilarEntry>, sqlx::Error> {
        sqlx::query_as::<_, SimilarEntry>(
            "SELECT s.target_track_id, s.score, t.original_filename, t.duration \
             FROM similarity_scores s \
             JOIN tracks t ON t.id = s.target_track_id \
             WHERE s.source_track_id = $1 \
             ORDER BY s.score DESC \
             LIMIT $2",
        )
        .bind(source_track_id)
        .bind(SIMILAR_LIMIT)
        .fetch_all(pool)
        .await
    }
}
