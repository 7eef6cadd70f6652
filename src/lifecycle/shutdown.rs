//! Shutdown coordination for the server.
//!
//! ```text
//! Running ──trigger()──▶ Draining ──drained in time──▶ Stopped
//!                            │
//!                            └──grace period elapsed──▶ ForcedStop
//! ```
//!
//! Only the first trigger moves the phase out of `Running`; later triggers
//! are no-ops.

use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::watch;

use crate::http::server::{ServerError, ServerHandle};

/// Where the server is in its shutdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    /// Accepting connections; nobody has asked us to stop.
    Running,
    /// No new connections; in-flight requests are finishing.
    Draining,
    /// Every in-flight request finished before the deadline.
    Stopped,
    /// The deadline passed with requests still in flight.
    ForcedStop,
}

impl ShutdownPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, ShutdownPhase::Stopped | ShutdownPhase::ForcedStop)
    }
}

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("server forced to shutdown: {in_flight} request(s) still in flight after {grace:?}")]
    DeadlineExceeded { grace: Duration, in_flight: u64 },

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Coordinator for graceful shutdown.
///
/// Holds the phase in a watch channel so subscribers created after the
/// trigger still observe it.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<ShutdownPhase>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ShutdownPhase::Running);
        Self { tx }
    }

    /// Subscribe to the stop request.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request a stop. Returns `true` only for the call that moved the
    /// phase from `Running` to `Draining`.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|phase| {
            if *phase == ShutdownPhase::Running {
                *phase = ShutdownPhase::Draining;
                true
            } else {
                false
            }
        })
    }

    pub fn phase(&self) -> ShutdownPhase {
        *self.tx.borrow()
    }

    fn finish(&self, phase: ShutdownPhase) {
        debug_assert!(phase.is_terminal());
        self.tx.send_replace(phase);
    }

    /// Stop the server and wait up to `grace` for in-flight requests.
    ///
    /// Past the deadline the server task is aborted and
    /// [`ShutdownError::DeadlineExceeded`] is returned.
    pub async fn drain(&self, mut server: ServerHandle, grace: Duration) -> Result<(), ShutdownError> {
        if !self.trigger() {
            tracing::debug!(phase = ?self.phase(), "Shutdown already requested");
        }

        let started = Instant::now();
        tracing::info!(
            grace_ms = millis(grace),
            in_flight = server.in_flight().active_count(),
            "Draining connections"
        );

        let outcome = tokio::time::timeout(grace, server.join()).await;
        match outcome {
            Ok(Ok(())) => {
                self.finish(ShutdownPhase::Stopped);
                tracing::info!(
                    elapsed_ms = millis(started.elapsed()),
                    "Server gracefully stopped"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                self.finish(ShutdownPhase::ForcedStop);
                Err(e.into())
            }
            Err(_) => {
                let in_flight = server.in_flight().active_count();
                server.abort();
                self.finish(ShutdownPhase::ForcedStop);
                Err(ShutdownError::DeadlineExceeded { grace, in_flight })
            }
        }
    }
}

/// Whole milliseconds for log fields, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of [`Shutdown`], handed to the server.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<ShutdownPhase>,
}

impl ShutdownSignal {
    /// Resolve once a stop has been requested.
    pub async fn wait(&mut self) {
        // Err means the coordinator is gone, which is a stop as well.
        let _ = self
            .rx
            .wait_for(|phase| *phase != ShutdownPhase::Running)
            .await;
    }
}
