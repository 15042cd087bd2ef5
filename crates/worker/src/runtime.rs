//! Worker poll loop.
//!
//! A single long-lived Tokio task that claims pending jobs via
//! `JobRepo::claim_next` (`FOR UPDATE SKIP LOCKED`, so multiple worker
//! processes can poll the same queue safely) and executes them to
//! completion.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use resona_db::models::job::Job;
use resona_db::repositories::JobRepo;

use crate::tasks;

/// Default polling interval for the claim loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Background job worker.
pub struct WorkerRuntime {
    pool: PgPool,
    name: String,
    poll_interval: Duration,
}

impl WorkerRuntime {
    /// Create a worker with the default 1-second poll interval.
    ///
    /// The worker identity defaults to `worker-<pid>` and can be pinned
    /// via the `WORKER_NAME` env var (useful when running several
    /// workers on one host).
    pub fn new(pool: PgPool) -> Self {
        let name = std::env::var("WORKER_NAME")
            .unwrap_or_else(|_| format!("worker-{}", std::process::id()));
        Self {
            pool,
            name,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Run the claim loop until the cancellation token is triggered.
    ///
    /// Each tick drains the queue: jobs are claimed and executed one at
    /// a time until no pending job remains.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            worker = %self.name,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Worker started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(worker = %self.name, "Worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.drain_queue(&cancel).await;
                }
            }
        }
    }

    /// Claim and execute jobs until the queue is empty or shutdown is
    /// requested. The job in flight always runs to completion.
    async fn drain_queue(&self, cancel: &CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                return;
            }

            let claimed = match JobRepo::claim_next(&self.pool, &self.name).await {
                Ok(claimed) => claimed,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to claim next job");
                    return;
                }
            };

            let Some(job) = claimed else {
                return;
            };

            self.process(job).await;
        }
    }

    async fn process(&self, job: Job) {
        tracing::info!(
            job_id = job.id,
            job_type = %job.job_type,
            worker = %self.name,
            "Job claimed",
        );

        match tasks::execute(&self.pool, &job).await {
            Ok(result) => {
                if let Err(e) = JobRepo::complete(&self.pool, job.id, &result).await {
                    tracing::error!(job_id = job.id, error = %e, "Failed to record job completion");
                } else {
                    tracing::info!(job_id = job.id, job_type = %job.job_type, "Job completed");
                }
            }
            Err(task_err) => {
                tracing::warn!(
                    job_id = job.id,
                    job_type = %job.job_type,
                    error = %task_err,
                    "Job failed",
                );
                if let Err(e) = JobRepo::fail(&self.pool, job.id, &task_err.to_string()).await {
                    tracing::error!(job_id = job.id, error = %e, "Failed to record job failure");
                }
            }
        }
    }
}
