//! Route handlers. One function per route, no side effects.

use axum::{extract::State, Json};

use crate::http::response::{HealthResponse, PingResponse};
use crate::http::server::AppState;

/// `GET /ping`
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// `GET /health`
///
/// Always 200; zone resolution already degraded to a fixed offset at startup
/// if it had to.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let timestamp = state.zone.format(state.clock.now());
    Json(HealthResponse::ok(timestamp))
}
