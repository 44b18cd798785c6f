use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Monitoring loop cadence in seconds (default: `3`).
    pub monitor_tick_secs: u64,
    /// Optional cap on concurrently active monitoring sessions.
    pub monitor_max_sessions: Option<usize>,
    /// How long prediction rows are kept before the retention job deletes
    /// them, in days (default: `30`).
    pub prediction_retention_days: i64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `MONITOR_TICK_SECS`        | `3`                     |
    /// | `MONITOR_MAX_SESSIONS`     | unbounded               |
    /// | `PREDICTION_RETENTION_DAYS`| `30`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let monitor_tick_secs: u64 = std::env::var("MONITOR_TICK_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("MONITOR_TICK_SECS must be a valid u64");

        let monitor_max_sessions: Option<usize> = std::env::var("MONITOR_MAX_SESSIONS")
            .ok()
            .map(|v| v.parse().expect("MONITOR_MAX_SESSIONS must be a valid usize"));

        let prediction_retention_days: i64 = std::env::var("PREDICTION_RETENTION_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("PREDICTION_RETENTION_DAYS must be a valid i64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            monitor_tick_secs,
            monitor_max_sessions,
            prediction_retention_days,
            jwt,
        }
    }

    /// Monitoring loop cadence as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.monitor_tick_secs)
    }
}
