//! Handlers for the `/tracks` resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use resona_core::error::CoreError;
use resona_db::repositories::{AudioFeatureRepo, SimilarityRepo, TrackRepo};

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /tracks
///
/// List all tracks, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tracks = TrackRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::ok(tracks)))
}

/// GET /tracks/{id}
///
/// Return a specific track.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let track = TrackRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Track", &id)))?;
    Ok(Json(ApiResponse::ok(track)))
}

/// GET /tracks/{id}/features
///
/// Return extracted features for a specific track. 404 until the worker
/// has finished extraction.
pub async fn features(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    TrackRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Track", &id)))?;

    let features = AudioFeatureRepo::find_by_track(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("No features available".to_string()))?;

    Ok(Json(ApiResponse::ok(features)))
}

/// GET /tracks/{id}/similar
///
/// Return the top similar tracks for the given track, best match first.
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    TrackRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Track", &id)))?;

    let entries = SimilarityRepo::top_similar(&state.pool, &id).await?;
    Ok(Json(ApiResponse::ok(entries)))
}
