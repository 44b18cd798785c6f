#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pulsewatch_api::auth::jwt::{generate_access_token, JwtConfig};
use pulsewatch_api::config::ServerConfig;
use pulsewatch_api::router::build_app_router;
use pulsewatch_api::state::AppState;
use pulsewatch_api::ws::WsManager;
use pulsewatch_core::classify::HeuristicClassifier;
use pulsewatch_core::types::DbId;
use pulsewatch_events::EventBus;
use pulsewatch_monitor::{
    FixedSessionFactory, MonitorConfig, MonitorRegistry, PgPredictionSink, SessionDeps,
    SimulatedFeed,
};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        monitor_tick_secs: 3,
        monitor_max_sessions: None,
        prediction_retention_days: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Generate a valid access token for the given user id.
pub fn auth_token(user_id: DbId) -> String {
    generate_access_token(user_id, "user", &test_config().jwt)
        .expect("token generation should succeed")
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the wiring in `main.rs` (simulated feed, heuristic
/// classifier, Postgres sink) so integration tests exercise the same stack
/// that production uses. The monitoring tick is shortened so session loops
/// produce data within a test's time budget.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let ws_manager = Arc::new(WsManager::new());
    let event_bus = Arc::new(EventBus::default());

    let deps = SessionDeps {
        feed: Arc::new(SimulatedFeed::default()),
        classifier: Some(Arc::new(HeuristicClassifier)),
        sink: Arc::new(PgPredictionSink::new(pool.clone())),
        events: Some(Arc::clone(&event_bus)),
    };
    let registry = MonitorRegistry::new(
        Arc::new(FixedSessionFactory::new(deps)),
        MonitorConfig {
            tick_interval: Duration::from_millis(50),
            max_sessions: None,
        },
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager,
        registry,
        event_bus,
    };

    build_app_router(state, &config)
}

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a bodyless POST request with a Bearer token.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a response carries the standard `{"error", "code"}` envelope
/// with the given status and code.
pub async fn assert_error_response(response: Response, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}
