//! Top-level error type. Every variant is fatal to the process.

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::ServerError;
use crate::lifecycle::ShutdownError;
use crate::net::ListenerError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("server stopped before any shutdown signal")]
    UnexpectedExit,

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
