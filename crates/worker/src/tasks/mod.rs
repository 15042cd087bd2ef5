//! Background task definitions and dispatch.
//!
//! Each job row carries a `job_type` and a JSON payload; [`execute`]
//! routes it to the matching task. Tasks return a JSON result that is
//! stored on the job row, or a [`TaskError`] that fails the job.

pub mod audio;

use resona_audio::AudioError;
use resona_core::error::CoreError;
use resona_db::models::job::Job;
use sqlx::PgPool;

/// Job type executed as a worker liveness probe.
pub const TASK_PING: &str = "ping";
/// Job type that decodes a freshly uploaded file.
pub const TASK_PROCESS_AUDIO: &str = "process_audio";
/// Job type that extracts features and refreshes similarity scores.
pub const TASK_EXTRACT_FEATURES: &str = "extract_features";

/// Error produced by task execution. Converted to the job's
/// `error_message` when the job is failed.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid job payload: {0}")]
    Payload(String),

    #[error("Unknown job type: {0}")]
    UnknownJobType(String),
}

/// Execute a claimed job, returning its result payload.
pub async fn execute(pool: &PgPool, job: &Job) -> Result<serde_json::Value, TaskError> {
    match job.job_type.as_str() {
        TASK_PING => Ok(serde_json::json!("pong")),
        TASK_PROCESS_AUDIO => audio::process_audio(pool, &job.payload).await,
        TASK_EXTRACT_FEATURES => audio::extract_features(pool, &job.payload).await,
        other => Err(TaskError::UnknownJobType(other.to_string())),
    }
}
