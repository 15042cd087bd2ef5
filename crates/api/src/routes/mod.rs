pub mod health;
pub mod tracks;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (health routes are merged
/// alongside this in the application factory).
///
/// ```text
/// POST /upload                    accept an audio file, enqueue processing
/// GET  /tracks                    all tracks, newest first
/// GET  /tracks/{id}               single track
/// GET  /tracks/{id}/features      extracted features
/// GET  /tracks/{id}/similar       top similar tracks
/// ```
pub fn app_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(upload::router(max_upload_bytes))
        .merge(tracks::router())
}
