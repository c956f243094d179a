//! Pulse - a minimal JSON HTTP service.
//!
//! Exposes a liveness check (`GET /health`), a process uptime report
//! (`GET /status`) and a payload intake endpoint (`POST /process`) that
//! forwards each payload to a diagnostic sink and acknowledges it.

pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod sink;
pub mod state;

pub use clock::ProcessClock;
pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
