//! HTTP route handlers.
//!
//! Three JSON endpoints: `/health`, `/status` and `/process`. Every request
//! passes through two router-wide layers: the request ID middleware (outermost)
//! and the JSON body stage, which rejects malformed bodies before dispatch.
//! Unknown paths and methods fall through to axum's default 404/405.

pub mod health;
pub mod process;
pub mod status;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::{json_body_layer, request_id_layer};
use crate::state::AppState;

/// Creates the Axum router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    // Uptime changes on every call
    let status_routes = Router::new()
        .route("/status", get(status::status))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    let process_routes = Router::new().route("/process", post(process::process));

    Router::new()
        .merge(health_routes)
        .merge(status_routes)
        .merge(process_routes)
        .with_state(state.clone())
        // JSON stage - decodes bodies and short-circuits on malformed input
        .layer(middleware::from_fn_with_state(state, json_body_layer))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
