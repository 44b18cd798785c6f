//! HTTP-level integration tests for the `/monitoring` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! The test app wires a simulated feed and a short tick interval, so
//! sessions started here begin persisting rows almost immediately.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{assert_error_response, auth_token, body_json, build_test_app, get_auth, post_auth};
use sqlx::PgPool;

use pulsewatch_db::repositories::PredictionRepo;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn monitoring_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/monitoring/status").await;
    assert_error_response(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    let response = post_auth(app, "/api/v1/monitoring/start", "not-a-valid-token").await;
    assert_error_response(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn start_then_status_reports_monitoring_active(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token(1);

    let response = post_auth(app.clone(), "/api/v1/monitoring/start", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "started");

    let response = get_auth(app, "/api/v1/monitoring/status", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["monitoring"], true);
    assert!(
        json["latest_data"]["label"].is_string(),
        "an active session always has a snapshot, placeholder or real"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn double_start_reports_already_active(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token(1);

    let response = post_auth(app.clone(), "/api/v1/monitoring/start", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "started");

    let response = post_auth(app, "/api/v1/monitoring/start", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "already_active");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stop_then_status_reports_inactive(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token(1);

    post_auth(app.clone(), "/api/v1/monitoring/start", &token).await;

    let response = post_auth(app.clone(), "/api/v1/monitoring/stop", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "stopped");

    let response = get_auth(app, "/api/v1/monitoring/status", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["monitoring"], false);
    assert!(json["latest_data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stop_without_session_reports_not_active(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token(1);

    let response = post_auth(app, "/api/v1/monitoring/stop", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "not_active");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sessions_are_scoped_per_user(pool: PgPool) {
    let app = build_test_app(pool);
    let alice = auth_token(1);
    let bob = auth_token(2);

    post_auth(app.clone(), "/api/v1/monitoring/start", &alice).await;

    // Alice's session must not show up for Bob.
    let response = get_auth(app.clone(), "/api/v1/monitoring/status", &bob).await;
    let json = body_json(response).await;
    assert_eq!(json["monitoring"], false);

    let response = get_auth(app, "/api/v1/monitoring/status", &alice).await;
    let json = body_json(response).await;
    assert_eq!(json["monitoring"], true);
}

// ---------------------------------------------------------------------------
// Data flow: a running session persists prediction rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn running_session_persists_prediction_rows(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = auth_token(7);

    let response = post_auth(app.clone(), "/api/v1/monitoring/start", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The test app ticks every 50ms; poll until rows land.
    let mut count = 0;
    for _ in 0..100 {
        count = PredictionRepo::count_for_user(&pool, 7).await.unwrap();
        if count >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(count >= 2, "expected persisted rows from the session loop");

    post_auth(app, "/api/v1/monitoring/stop", &token).await;
}
