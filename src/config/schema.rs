//! Configuration schema definitions.
//!
//! The whole server is described by [`ServerConfig`], resolved once at
//! startup and never mutated afterwards.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;

/// Time allowed for in-flight requests once shutdown is requested.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Zone used to present `/health` timestamps (UTC+7).
pub const DEFAULT_CIVIL_ZONE: &str = "Asia/Jakarta";

/// Root configuration for the server.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// IANA zone name for civil timestamps.
    pub civil_zone: CivilZoneName,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "[::]:8080").
    pub bind_address: String,
}

impl ListenerConfig {
    /// Listen on every interface at `port`, IPv6 and IPv4 alike.
    pub fn on_port(port: u16) -> Self {
        Self {
            bind_address: format!("[::]:{port}"),
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::on_port(DEFAULT_PORT)
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// Deadline for the drain, measured from the first signal.
    pub grace_period: Duration,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Output format of the `fmt` layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines, for development.
    #[default]
    Pretty,
    /// One JSON object per event, for log aggregation.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CivilZoneName(pub String);

impl Default for CivilZoneName {
    fn default() -> Self {
        Self(DEFAULT_CIVIL_ZONE.to_string())
    }
}

impl AsRef<str> for CivilZoneName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
