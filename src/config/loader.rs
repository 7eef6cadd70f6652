//! Configuration loading from the environment.

use thiserror::Error;

use crate::config::schema::{ListenerConfig, LogFormat, ServerConfig, DEFAULT_PORT};
use crate::config::validation::{validate_log_format, validate_port, ValidationError};

pub const PORT_VAR: &str = "PORT";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<ServerConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable lookup.
///
/// Empty values are treated the same as unset ones.
pub fn load_with<F>(lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let mut config = ServerConfig::default();
    let mut errors = Vec::new();

    let port = match get(PORT_VAR) {
        Some(raw) => validate_port(&raw).unwrap_or_else(|e| {
            errors.push(e);
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    };
    config.listener = ListenerConfig::on_port(port);

    if let Some(raw) = get(LOG_FORMAT_VAR) {
        match validate_log_format(&raw) {
            Ok(format) => config.logging.format = format,
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Validation(errors))
    }
}

/// Log format from the process environment, independent of the rest of
/// the configuration so a bad `PORT` is still reported in the right format.
pub fn log_format_from_env() -> LogFormat {
    log_format_with(|key| std::env::var(key).ok())
}

/// Unset, empty or invalid values give the default format.
pub fn log_format_with<F>(lookup: F) -> LogFormat
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_FORMAT_VAR)
        .filter(|v| !v.is_empty())
        .and_then(|raw| validate_log_format(&raw).ok())
        .unwrap_or_default()
}
