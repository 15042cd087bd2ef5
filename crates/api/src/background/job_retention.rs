//! Periodic cleanup of finished background jobs.
//!
//! Spawns a background task that deletes terminal rows from `jobs` older
//! than the configured retention period. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use resona_db::repositories::JobRepo;

/// Default retention period: 24 hours.
const DEFAULT_RETENTION_HOURS: i64 = 24;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the job retention cleanup loop.
///
/// Deletes completed/failed jobs older than `JOB_RETENTION_HOURS`
/// (defaults to 24). Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let retention_hours: i64 = std::env::var("JOB_RETENTION_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETENTION_HOURS);

    tracing::info!(
        retention_hours,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Job retention task started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job retention task stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::hours(retention_hours);
                match JobRepo::purge_terminal_older_than(&pool, cutoff).await {
                    Ok(purged) => {
                        if purged > 0 {
                            tracing::info!(purged, "Job retention: purged old jobs");
                        } else {
                            tracing::debug!("Job retention: no jobs to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Job retention: cleanup failed");
                    }
                }
            }
        }
    }
}
