//! Startup orchestration.
//!
//! # Responsibilities
//! - Install signal handlers before anything can receive traffic
//! - Bind the listener (a bind failure ends the process)
//! - Spawn the server and block until the first termination signal
//! - Drain within the configured grace period
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A server that exits on its own before a signal is treated as a failure

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::millis;
use crate::lifecycle::{Shutdown, Signals};
use crate::net;

/// Run the service until a termination signal has been handled.
///
/// `Ok(())` means every in-flight request finished inside the grace period.
pub async fn run(config: ServerConfig) -> Result<()> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        grace_period_ms = millis(config.shutdown.grace_period),
        civil_zone = config.civil_zone.as_ref(),
        log_format = %config.logging.format,
        "Configuration loaded"
    );

    let signals = Signals::register().map_err(Error::Signal)?;
    let listener = net::bind(&config.listener).await?;
    let server = HttpServer::new(&config);

    serve_until_signal(&config, signals, listener, server).await
}

/// Serve `server` on an already bound `listener` until SIGINT/SIGTERM, then
/// drain within the configured grace period.
pub async fn serve(config: &ServerConfig, listener: TcpListener, server: HttpServer) -> Result<()> {
    let signals = Signals::register().map_err(Error::Signal)?;
    serve_until_signal(config, signals, listener, server).await
}

async fn serve_until_signal(
    config: &ServerConfig,
    mut signals: Signals,
    listener: TcpListener,
    server: HttpServer,
) -> Result<()> {
    let shutdown = Shutdown::new();
    let mut server = server.spawn(listener, shutdown.subscribe())?;

    tokio::select! {
        received = signals.recv() => {
            let name = received.map_err(Error::Signal)?;
            tracing::info!(signal = name, "Shutdown signal received");
        }
        result = server.join() => {
            result?;
            return Err(Error::UnexpectedExit);
        }
    }

    shutdown
        .drain(server, config.shutdown.grace_period)
        .await?;
    Ok(())
}
