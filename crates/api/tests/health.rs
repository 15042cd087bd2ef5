//! Integration tests for the health endpoints and general HTTP behaviour.

mod common;

use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use resona_db::repositories::JobRepo;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
    assert!(json["data"]["version"].is_string());
    assert_eq!(json["data"]["db_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn cors_preflight_returns_correct_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    // CORS preflight requires custom headers, so we build the request manually.
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tracks")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // CORS preflight should return 200.
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");
}

// ---------------------------------------------------------------------------
// Test: GET /health/worker reports unavailable with no worker running
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn worker_health_unavailable_without_worker(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/health/worker").await;

    // Always 200; availability is reported in the body.
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["worker"], "unavailable");

    // The probe job was still enqueued.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE job_type = 'ping'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Test: GET /health/worker reports ok when a worker answers the ping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn worker_health_ok_with_simulated_worker(pool: PgPool) {
    // Simulate a worker: claim pending jobs and answer pings.
    let worker_pool = pool.clone();
    let worker = tokio::spawn(async move {
        loop {
            if let Ok(Some(job)) = JobRepo::claim_next(&worker_pool, "test-worker").await {
                let _ = JobRepo::complete(&worker_pool, job.id, &serde_json::json!("pong")).await;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
    });

    let app = common::build_test_app(pool);
    let response = get(app, "/health/worker").await;
    worker.abort();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["worker"], "ok");
}
