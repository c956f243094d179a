//! Process uptime report.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Seconds since process start
    pub uptime: f64,
}

/// Reports seconds elapsed since the process clock was started.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        uptime: state.clock.uptime_secs(),
    })
}
