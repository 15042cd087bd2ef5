//! Handler for the `/upload` endpoint.
//!
//! Accepts a multipart audio upload, stores the file under a
//! track-specific directory, inserts the track row, and enqueues the
//! `process_audio` job for the worker.

use std::path::Path as FsPath;

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use resona_db::models::job::SubmitJob;
use resona_db::models::track::CreateTrack;
use resona_db::repositories::{JobRepo, TrackRepo};

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Multipart field name carrying the audio file.
const FILE_FIELD: &str = "file";

/// Response payload for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub track_id: String,
}

/// POST /upload
///
/// Accept an audio upload, save the file, and dispatch the processing job.
pub async fn upload_track(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::BadRequest("Audio file is required".to_string()));
    };

    // Strip any client-supplied directory components.
    let original_filename = FsPath::new(&filename)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if original_filename.is_empty() {
        return Err(AppError::BadRequest("Audio file is required".to_string()));
    }

    let track_id = new_track_id();

    // Save the file under a track-specific directory.
    let track_dir = state.config.upload_dir.join(&track_id);
    tokio::fs::create_dir_all(&track_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored_path = track_dir.join(&original_filename);
    tokio::fs::write(&stored_path, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let track = TrackRepo::create(
        &state.pool,
        &CreateTrack {
            id: track_id.clone(),
            original_filename,
            stored_path: stored_path.to_string_lossy().to_string(),
        },
    )
    .await?;

    JobRepo::submit(
        &state.pool,
        &SubmitJob::new(
            "process_audio",
            serde_json::json!({
                "track_id": track.id,
                "file_path": track.stored_path,
            }),
        ),
    )
    .await?;

    tracing::info!(track_id = %track_id, "Track uploaded, processing job enqueued");

    Ok(Json(ApiResponse::ok(UploadResult { track_id })))
}

/// Generate an opaque track id: `track-` plus 8 hex chars of a UUIDv4.
fn new_track_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("track-{}", &hex[..8])
}
