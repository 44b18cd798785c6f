//! WebSocket infrastructure for real-time monitor updates.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes. Connections authenticate with a
//! `?token=` query parameter at upgrade time and only ever receive frames
//! scoped to their own user.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
