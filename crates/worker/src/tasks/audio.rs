//! Audio processing tasks.
//!
//! `process_audio` decodes an upload and records stream metadata;
//! `extract_features` computes the feature vector and refreshes the
//! similarity scores against every other analysed track.

use std::path::Path;

use serde::Deserialize;
use sqlx::PgPool;

use resona_core::error::CoreError;
use resona_core::features::{compute_features, FeatureVector};
use resona_core::similarity::similarity_score;
use resona_core::track::TrackStatus;
use resona_db::models::audio_feature::{AudioFeature, UpsertAudioFeature};
use resona_db::models::job::SubmitJob;
use resona_db::models::track::LoadedMetadata;
use resona_db::repositories::{AudioFeatureRepo, JobRepo, SimilarityRepo, TrackRepo};

use super::{TaskError, TASK_EXTRACT_FEATURES};

/// Payload shared by both audio tasks.
#[derive(Debug, Deserialize)]
struct AudioTaskPayload {
    track_id: String,
    file_path: String,
}

fn parse_payload(payload: &serde_json::Value) -> Result<AudioTaskPayload, TaskError> {
    serde_json::from_value(payload.clone()).map_err(|e| TaskError::Payload(e.to_string()))
}

/// Decode an uploaded file and record its stream metadata.
///
/// On success the track moves to `loaded` and an `extract_features` job
/// is enqueued. Decode failures mark the track as errored and fail the
/// job with the decoder's message.
pub async fn process_audio(
    pool: &PgPool,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, TaskError> {
    let payload = parse_payload(payload)?;

    let loaded = match resona_audio::load_audio(Path::new(&payload.file_path)).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!(
                track_id = %payload.track_id,
                file_path = %payload.file_path,
                error = %e,
                "Failed to decode uploaded audio"
            );
            TrackRepo::set_error(pool, &payload.track_id, &e.to_string()).await?;
            return Err(e.into());
        }
    };

    let duration = loaded.duration_secs();
    tracing::info!(
        track_id = %payload.track_id,
        samplerate = loaded.samplerate,
        duration,
        "Decoded track"
    );

    let metadata = LoadedMetadata {
        samplerate: loaded.samplerate as i32,
        duration,
    };

    let track = TrackRepo::mark_loaded(pool, &payload.track_id, metadata).await?;
    if track.is_none() {
        // The track row vanished (e.g. cleanup raced the queue); nothing
        // to chain onto.
        tracing::warn!(track_id = %payload.track_id, "Track row missing after decode");
        return Ok(serde_json::json!({
            "track_id": payload.track_id,
            "status": TrackStatus::Loaded.as_str(),
            "samplerate": metadata.samplerate,
            "duration": metadata.duration,
        }));
    }

    JobRepo::submit(
        pool,
        &SubmitJob::new(
            TASK_EXTRACT_FEATURES,
            serde_json::json!({
                "track_id": payload.track_id,
                "file_path": payload.file_path,
            }),
        ),
    )
    .await?;

    serde_json::to_value(track).map_err(|e| TaskError::Payload(e.to_string()))
}

/// Extract features for a track and refresh its similarity scores.
pub async fn extract_features(
    pool: &PgPool,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, TaskError> {
    let payload = parse_payload(payload)?;

    let track = TrackRepo::find_by_id(pool, &payload.track_id).await?;
    if track.is_none() {
        return Err(CoreError::not_found("Track", &payload.track_id).into());
    }

    TrackRepo::set_status(pool, &payload.track_id, TrackStatus::Extracting).await?;

    let loaded = match resona_audio::load_audio(Path::new(&payload.file_path)).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!(
                track_id = %payload.track_id,
                error = %e,
                "Failed to decode audio for feature extraction"
            );
            TrackRepo::set_error(pool, &payload.track_id, &e.to_string()).await?;
            return Err(e.into());
        }
    };

    let features = compute_features(&loaded.samples);

    let row = AudioFeatureRepo::upsert(
        pool,
        &UpsertAudioFeature {
            track_id: payload.track_id.clone(),
            spectral_centroid: features.spectral_centroid,
            rms: features.rms,
            peak_amplitude: features.peak_amplitude,
            mfcc: serde_json::to_value(&features.mfcc)
                .map_err(|e| TaskError::Payload(e.to_string()))?,
        },
    )
    .await?;

    TrackRepo::set_status(pool, &payload.track_id, TrackStatus::FeaturesReady).await?;
    tracing::info!(track_id = %payload.track_id, "Features ready");

    refresh_similarity(pool, &payload.track_id, &features).await?;

    serde_json::to_value(row).map_err(|e| TaskError::Payload(e.to_string()))
}

/// Recompute similarity between the given track and every other track
/// whose features are ready. Scores are stored in both directions so
/// either side's ranking query stays a single indexed lookup.
async fn refresh_similarity(
    pool: &PgPool,
    track_id: &str,
    features: &FeatureVector,
) -> Result<(), TaskError> {
    let others = TrackRepo::feature_ready_ids_except(pool, track_id).await?;

    for other_id in others {
        let Some(other_row) = AudioFeatureRepo::find_by_track(pool, &other_id).await? else {
            // Status says ready but the row is gone; skip rather than fail
            // the whole extraction.
            tracing::warn!(track_id = %other_id, "Feature row missing for ready track");
            continue;
        };

        let other = feature_vector_from_row(&other_row);
        let score = similarity_score(features, &other);

        SimilarityRepo::upsert(pool, track_id, &other_id, score).await?;
        SimilarityRepo::upsert(pool, &other_id, track_id, score).await?;
    }

    Ok(())
}

fn feature_vector_from_row(row: &AudioFeature) -> FeatureVector {
    FeatureVector {
        spectral_centroid: row.spectral_centroid.unwrap_or(0.0),
        rms: row.rms.unwrap_or(0.0),
        peak_amplitude: row.peak_amplitude.unwrap_or(0.0),
        mfcc: row
            .mfcc
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default(),
    }
}
