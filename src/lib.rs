//! Ping/health HTTP service with signal-driven graceful shutdown.

pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownPhase};
