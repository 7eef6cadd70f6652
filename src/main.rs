//! pulse-server
//!
//! A minimal HTTP service with two endpoints and a bounded graceful drain.
//!
//! # Architecture Overview
//!
//! ```text
//!   PORT ──▶ config ──▶ net::bind ──▶ http::HttpServer (spawned task)
//!                                          │  GET /ping    → {"message":"pong"}
//!                                          │  GET /health  → {"status":"ok","timestamp":…}
//!                                          ▲
//!   SIGINT/SIGTERM ──▶ lifecycle::signals ─┴─▶ lifecycle::shutdown
//!                                               Running → Draining → Stopped | ForcedStop
//! ```
//!
//! Exit status is 0 after a clean drain and 1 for any fatal error: bad
//! configuration, bind failure, or a drain that outlives the grace period.

use std::process::ExitCode;

use pulse_server::{config, lifecycle, observability};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = observability::logging::init(config::log_format_from_env()) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("pulse-server v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match config::load_from_env() {
        Ok(config) => lifecycle::run(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}
