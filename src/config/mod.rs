//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, LOG_FORMAT)
//!     → loader.rs (lookup, empty == unset)
//!     → validation.rs (parse & range checks)
//!     → ServerConfig (validated, immutable)
//!     → passed by value into startup
//! ```
//!
//! # Design Decisions
//! - Config is resolved once; there is no reload
//! - Every field has a default so an empty environment is valid
//! - Lookup is injectable so tests never touch the real environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_with, log_format_from_env, ConfigError};
pub use schema::{
    CivilZoneName, ListenerConfig, LogFormat, LoggingConfig, ServerConfig, ShutdownConfig,
};
