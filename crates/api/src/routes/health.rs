use std::time::Duration;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use resona_db::models::job::SubmitJob;
use resona_db::models::status::JobStatus;
use resona_db::repositories::JobRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// How often the worker ping result is polled.
const PING_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub data: HealthData,
}

#[derive(Serialize)]
pub struct HealthData {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = resona_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        success: true,
        data: HealthData {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        },
    })
}

/// Worker health response payload.
#[derive(Serialize)]
pub struct WorkerHealthResponse {
    pub success: bool,
    pub worker: &'static str,
}

/// GET /health/worker -- checks background worker availability.
///
/// Enqueues a lightweight `ping` job and waits briefly for a worker to
/// complete it. Reports unavailable (still HTTP 200) when no worker
/// picks the job up in time.
async fn worker_health(State(state): State<AppState>) -> AppResult<Json<WorkerHealthResponse>> {
    let job = JobRepo::submit(
        &state.pool,
        &SubmitJob::new("ping", serde_json::json!({})),
    )
    .await?;

    let deadline =
        tokio::time::Instant::now() + Duration::from_secs(state.config.worker_ping_timeout_secs);

    while tokio::time::Instant::now() < deadline {
        tokio::time::sleep(PING_POLL_INTERVAL).await;

        let current = JobRepo::find_by_id(&state.pool, job.id).await?;
        if let Some(current) = current {
            if current.status_id == JobStatus::Completed.id()
                && current.result == Some(serde_json::json!("pong"))
            {
                return Ok(Json(WorkerHealthResponse {
                    success: true,
                    worker: "ok",
                }));
            }
            if current.status_id == JobStatus::Failed.id() {
                break;
            }
        }
    }

    Ok(Json(WorkerHealthResponse {
        success: false,
        worker: "unavailable",
    }))
}

/// Mount health check routes at the application root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/worker", get(worker_health))
}
