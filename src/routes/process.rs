//! Payload intake endpoint.
//!
//! Accepts any payload the JSON stage let through, hands it to the configured
//! diagnostic sink, and acknowledges with a fixed body. The payload itself is
//! never inspected.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::Payload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub result: &'static str,
}

pub async fn process(
    State(state): State<AppState>,
    payload: Option<Extension<Payload>>,
) -> Json<ProcessResponse> {
    let payload = payload.map(|Extension(p)| p).unwrap_or(Payload::Empty);
    state.sink.record(&payload);

    Json(ProcessResponse {
        result: "processed",
    })
}
