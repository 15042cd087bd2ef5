//! Route definition for audio upload.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/upload`.
///
/// The default axum body limit is far too small for audio files, so the
/// configured maximum is applied here rather than globally.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload::upload_track))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
