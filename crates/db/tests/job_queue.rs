//! Integration tests for the jobs queue repository.

use sqlx::PgPool;

use resona_db::models::job::SubmitJob;
use resona_db::models::status::JobStatus;
use resona_db::repositories::JobRepo;

#[sqlx::test]
async fn submit_creates_pending_job(pool: PgPool) {
    let job = JobRepo::submit(
        &pool,
        &SubmitJob::new("ping", serde_json::json!({})),
    )
    .await
    .unwrap();

    assert_eq!(job.job_type, "ping");
    assert_eq!(job.status_id, JobStatus::Pending.id());
    assert!(job.claimed_at.is_none());
    assert!(job.completed_at.is_none());
}

#[sqlx::test]
async fn claim_takes_oldest_job_once(pool: PgPool) {
    let first = JobRepo::submit(&pool, &SubmitJob::new("ping", serde_json::json!({})))
        .await
        .unwrap();
    // Ensure a strict submission order.
    sqlx::query("UPDATE jobs SET submitted_at = submitted_at - INTERVAL '1 minute' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();
    let second = JobRepo::submit(&pool, &SubmitJob::new("ping", serde_json::json!({})))
        .await
        .unwrap();

    let claimed = JobRepo::claim_next(&pool, "worker-a").await.unwrap().unwrap();
    assert_eq!(claimed.id, first.id);
    assert_eq!(claimed.status_id, JobStatus::Running.id());
    assert_eq!(claimed.claimed_by.as_deref(), Some("worker-a"));
    assert!(claimed.claimed_at.is_some());

    // The other worker gets the remaining job, then the queue is empty.
    let next = JobRepo::claim_next(&pool, "worker-b").await.unwrap().unwrap();
    assert_eq!(next.id, second.id);
    assert!(JobRepo::claim_next(&pool, "worker-a").await.unwrap().is_none());
}

#[sqlx::test]
async fn complete_records_result(pool: PgPool) {
    JobRepo::submit(&pool, &SubmitJob::new("ping", serde_json::json!({})))
        .await
        .unwrap();
    let job = JobRepo::claim_next(&pool, "worker-a").await.unwrap().unwrap();

    JobRepo::complete(&pool, job.id, &serde_json::json!("pong"))
        .await
        .unwrap();

    let done = JobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(done.status_id, JobStatus::Completed.id());
    assert_eq!(done.result, Some(serde_json::json!("pong")));
    assert!(done.completed_at.is_some());
}

#[sqlx::test]
async fn fail_records_error_message(pool: PgPool) {
    JobRepo::submit(
        &pool,
        &SubmitJob::new("process_audio", serde_json::json!({"track_id": "track-x"})),
    )
    .await
    .unwrap();
    let job = JobRepo::claim_next(&pool, "worker-a").await.unwrap().unwrap();

    JobRepo::fail(&pool, job.id, "Decoded audio is empty").await.unwrap();

    let failed = JobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(failed.status_id, JobStatus::Failed.id());
    assert_eq!(failed.error_message.as_deref(), Some("Decoded audio is empty"));
}

#[sqlx::test]
async fn purge_removes_only_old_terminal_jobs(pool: PgPool) {
    // One old completed job, one fresh completed job, one pending job.
    for _ in 0..2 {
        JobRepo::submit(&pool, &SubmitJob::new("ping", serde_json::json!({})))
            .await
            .unwrap();
        let job = JobRepo::claim_next(&pool, "worker-a").await.unwrap().unwrap();
        JobRepo::complete(&pool, job.id, &serde_json::json!("pong"))
            .await
            .unwrap();
    }
    sqlx::query(
        "UPDATE jobs SET completed_at = NOW() - INTERVAL '2 days' \
         WHERE id = (SELECT MIN(id) FROM jobs)",
    )
    .execute(&pool)
    .await
    .unwrap();
    JobRepo::submit(&pool, &SubmitJob::new("ping", serde_json::json!({})))
        .await
        .unwrap();

    let cutoff = chrono::Utc::now() - chrono::Duration::hours(24);
    let purged = JobRepo::purge_terminal_older_than(&pool, cutoff).await.unwrap();
    assert_eq!(purged, 1);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 2);
}
