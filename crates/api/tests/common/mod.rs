use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use resona_api::app::build_app;
use resona_api::config::ServerConfig;
use resona_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the given upload
/// directory.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        max_upload_bytes: 16 * 1024 * 1024,
        worker_ping_timeout_secs: 2,
    }
}

/// Build the application through the same factory the binary uses, with
/// a scratch upload directory.
pub fn build_test_app(pool: PgPool) -> Router {
    let upload_dir = std::env::temp_dir().join("resona-test-uploads");
    build_test_app_with_config(pool, test_config(upload_dir))
}

/// Build the application through the same factory the binary uses, so
/// integration tests exercise the exact production middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app(AppState {
        pool,
        config: Arc::new(config),
    })
}

/// Issue a GET request against the app.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
