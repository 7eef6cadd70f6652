//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGTERM and SIGINT handlers (Ctrl+C elsewhere)
//! - Report which signal arrived first
//!
//! Handlers are registered up front so a signal that lands while the server
//! is still starting is not lost. Signals after the first are absorbed.

use std::io;

/// Registered termination signal streams.
#[cfg(unix)]
pub struct Signals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    /// Install handlers. Must be called inside a tokio runtime.
    pub fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for SIGTERM or SIGINT. Returns the signal name.
    pub async fn recv(&mut self) -> io::Result<&'static str> {
        tokio::select! {
            _ = self.sigterm.recv() => Ok("SIGTERM"),
            _ = self.sigint.recv() => Ok("SIGINT"),
        }
    }
}

#[cfg(not(unix))]
pub struct Signals;

#[cfg(not(unix))]
impl Signals {
    pub fn register() -> io::Result<Self> {
        Ok(Self)
    }

    /// Wait for Ctrl+C.
    pub async fn recv(&mut self) -> io::Result<&'static str> {
        tokio::signal::ctrl_c().await?;
        Ok("CTRL_C")
    }
}
