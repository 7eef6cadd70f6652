//! Response bodies.
//!
//! Field order matches the JSON the service has always emitted.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingResponse {
    pub message: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            message: "pong".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Civil time at UTC+7, e.g. `2024-01-15T14:30:00.123+07`.
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok(timestamp: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp,
        }
    }
}
