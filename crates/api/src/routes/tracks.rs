//! Route definitions for tracks.

use axum::routing::get;
use axum::Router;

use crate::handlers::tracks;
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// GET /tracks                 -> list
/// GET /tracks/{id}            -> get
/// GET /tracks/{id}/features   -> features
/// GET /tracks/{id}/similar    -> similar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tracks", get(tracks::list))
        .route("/tracks/{id}", get(tracks::get))
        .route("/tracks/{id}/features", get(tracks::features))
        .route("/tracks/{id}/similar", get(tracks::similar))
}
