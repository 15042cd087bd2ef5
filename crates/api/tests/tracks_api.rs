//! Integration tests for the `/tracks` endpoints.

mod common;

use common::{body_json, get};
use sqlx::PgPool;

use axum::http::StatusCode;
use resona_db::models::audio_feature::UpsertAudioFeature;
use resona_db::models::track::CreateTrack;
use resona_db::repositories::{AudioFeatureRepo, SimilarityRepo, TrackRepo};

async fn seed_track(pool: &PgPool, id: &str) {
    TrackRepo::create(
        pool,
        &CreateTrack {
            id: id.to_string(),
            original_filename: format!("{id}.wav"),
            stored_path: format!("uploads/{id}/{id}.wav"),
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// GET /tracks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_tracks_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/tracks").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_tracks_newest_first_with_wire_fields(pool: PgPool) {
    seed_track(&pool, "track-earlier1").await;
    sqlx::query("UPDATE tracks SET created_at = created_at - INTERVAL '1 hour' WHERE id = $1")
        .bind("track-earlier1")
        .execute(&pool)
        .await
        .unwrap();
    seed_track(&pool, "track-later001").await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/tracks").await).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["track_id"], "track-later001");
    assert_eq!(data[1]["track_id"], "track-earlier1");
    // The primary key serializes as `track_id`, never `id`.
    assert!(data[0].get("id").is_none());
    assert_eq!(data[0]["status"], "uploaded");
}

// ---------------------------------------------------------------------------
// GET /tracks/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_track_found(pool: PgPool) {
    seed_track(&pool, "track-deadbeef").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-deadbeef").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["track_id"], "track-deadbeef");
    assert_eq!(json["data"]["original_filename"], "track-deadbeef.wav");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_track_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-missing1").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Track not found");
}

// ---------------------------------------------------------------------------
// GET /tracks/{id}/features
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn features_not_yet_extracted_returns_404(pool: PgPool) {
    seed_track(&pool, "track-pending1").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-pending1/features").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No features available");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn features_returned_after_extraction(pool: PgPool) {
    seed_track(&pool, "track-ready001").await;
    AudioFeatureRepo::upsert(
        &pool,
        &UpsertAudioFeature {
            track_id: "track-ready001".to_string(),
            spectral_centroid: 0.42,
            rms: 0.3,
            peak_amplitude: 0.99,
            mfcc: serde_json::json!(vec![0.0; 13]),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-ready001/features").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["track_id"], "track-ready001");
    assert_eq!(json["data"]["spectral_centroid"], 0.42);
    assert_eq!(json["data"]["mfcc"].as_array().unwrap().len(), 13);
    // Reserved analysis columns stay off the wire until populated.
    assert!(json["data"].get("bpm").is_none());
    assert!(json["data"].get("key").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn features_for_unknown_track_returns_track_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-nothere1/features").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Track not found");
}

// ---------------------------------------------------------------------------
// GET /tracks/{id}/similar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn similar_tracks_ranked_by_score(pool: PgPool) {
    for id in ["track-src00001", "track-close001", "track-far00001"] {
        seed_track(&pool, id).await;
    }
    sqlx::query("UPDATE tracks SET duration = 7.5 WHERE id = $1")
        .bind("track-close001")
        .execute(&pool)
        .await
        .unwrap();

    SimilarityRepo::upsert(&pool, "track-src00001", "track-far00001", 0.41)
        .await
        .unwrap();
    SimilarityRepo::upsert(&pool, "track-src00001", "track-close001", 0.97)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-src00001/similar").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["target_track_id"], "track-close001");
    assert_eq!(data[0]["score"], 0.97);
    assert_eq!(data[0]["original_filename"], "track-close001.wav");
    assert_eq!(data[0]["duration"], 7.5);
    assert_eq!(data[1]["target_track_id"], "track-far00001");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn similar_for_unknown_track_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/tracks/track-nothere1/similar").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
