use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsewatch_api::config::ServerConfig;
use pulsewatch_api::fanout::UpdateFanout;
use pulsewatch_api::router::build_app_router;
use pulsewatch_api::{background, state, ws};
use pulsewatch_core::classify::HeuristicClassifier;
use pulsewatch_events::EventBus;
use pulsewatch_monitor::{
    FixedSessionFactory, MonitorConfig, MonitorRegistry, PgPredictionSink, SessionDeps,
    SimulatedFeed,
};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulsewatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pulsewatch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pulsewatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pulsewatch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // Spawn the fan-out task (routes monitor updates to WebSocket clients).
    let fanout = UpdateFanout::new(Arc::clone(&ws_manager));
    let fanout_cancel = tokio_util::sync::CancellationToken::new();
    let fanout_handle = tokio::spawn(fanout.run(event_bus.subscribe(), fanout_cancel.clone()));

    // --- Monitoring registry ---
    let deps = SessionDeps {
        feed: Arc::new(SimulatedFeed::default()),
        classifier: Some(Arc::new(HeuristicClassifier)),
        sink: Arc::new(PgPredictionSink::new(pool.clone())),
        events: Some(Arc::clone(&event_bus)),
    };
    let registry = MonitorRegistry::new(
        Arc::new(FixedSessionFactory::new(deps)),
        MonitorConfig {
            tick_interval: config.tick_interval(),
            max_sessions: config.monitor_max_sessions,
        },
    );
    tracing::info!(
        tick_secs = config.monitor_tick_secs,
        max_sessions = ?config.monitor_max_sessions,
        "Monitoring registry created"
    );

    // --- Prediction retention job ---
    let retention_cancel = tokio_util::sync::CancellationToken::new();
    let retention_handle = tokio::spawn(background::retention::run(
        pool.clone(),
        config.prediction_retention_days,
        retention_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        registry: Arc::clone(&registry),
        event_bus: Arc::clone(&event_bus),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop all monitoring sessions first (they may have in-flight ticks).
    registry.shutdown().await;
    tracing::info!("Monitoring registry shut down");

    // Stop the retention job.
    retention_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), retention_handle).await;
    tracing::info!("Prediction retention job stopped");

    // Stop the fan-out via its token. The session factory still holds a bus
    // sender clone at this point, so the broadcast channel never closes on
    // its own.
    fanout_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), fanout_handle).await;
    tracing::info!("Update fan-out shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
