//! Configuration validation.
//!
//! # Responsibilities
//! - Validate raw environment values before they enter [`ServerConfig`]
//! - Report every problem at once rather than stopping at the first
//!
//! [`ServerConfig`]: crate::config::ServerConfig

use thiserror::Error;

use crate::config::schema::LogFormat;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("PORT must be an integer between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("LOG_FORMAT must be \"pretty\" or \"json\", got {0:?}")]
    InvalidLogFormat(String),
}

/// Parse a `PORT` value.
///
/// Port 0 is accepted and asks the OS for an ephemeral port.
pub fn validate_port(raw: &str) -> Result<u16, ValidationError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ValidationError::InvalidPort(raw.to_string()))
}

pub fn validate_log_format(raw: &str) -> Result<LogFormat, ValidationError> {
    raw.parse::<LogFormat>()
        .map_err(|_| ValidationError::InvalidLogFormat(raw.to_string()))
}
