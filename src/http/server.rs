//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/ping` and `/health` handlers
//! - Wire up middleware (tracing, request ID, panic recovery, in-flight count)
//! - Serve on a spawned task until the shutdown signal fires
//! - Hand back a [`ServerHandle`] the coordinator can drain or abort

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinHandle};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::clock::{CivilZone, Clock, SystemClock};
use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::middleware::{track_in_flight, InFlightTracker};
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub zone: CivilZone,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] JoinError),
}

/// HTTP server for the ping/health service.
pub struct HttpServer {
    routes: Router,
    in_flight: InFlightTracker,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &ServerConfig, clock: Arc<dyn Clock>) -> Self {
        let state = AppState {
            clock,
            zone: CivilZone::resolve(config.civil_zone.as_ref()),
        };

        let routes = Router::new()
            .route("/ping", get(handlers::ping))
            .route("/health", get(handlers::health))
            .with_state(state);

        Self {
            routes,
            in_flight: InFlightTracker::new(),
        }
    }

    /// Mount extra routes behind the same middleware stack.
    pub fn merge(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    pub fn in_flight(&self) -> &InFlightTracker {
        &self.in_flight
    }

    /// The routes wrapped in every middleware layer.
    pub fn router(&self) -> Router {
        self.routes
            .clone()
            .layer(middleware::from_fn_with_state(
                self.in_flight.clone(),
                track_in_flight,
            ))
            .layer(CatchPanicLayer::new())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request),
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Start serving on a background task.
    ///
    /// Once `signal` fires the listener is closed and the task ends when the
    /// last open connection finishes.
    pub fn spawn(
        self,
        listener: TcpListener,
        mut signal: ShutdownSignal,
    ) -> Result<ServerHandle, ServerError> {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!(address = %local_addr, "HTTP server listening");

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { signal.wait().await })
                .await
        });

        Ok(ServerHandle {
            task,
            local_addr,
            in_flight: self.in_flight,
        })
    }
}

/// A running server task.
#[derive(Debug)]
pub struct ServerHandle {
    task: JoinHandle<std::io::Result<()>>,
    local_addr: SocketAddr,
    in_flight: InFlightTracker,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn in_flight(&self) -> &InFlightTracker {
        &self.in_flight
    }

    /// Wait for the serve loop to end.
    pub async fn join(&mut self) -> Result<(), ServerError> {
        (&mut self.task).await??;
        Ok(())
    }

    /// Cancel the serve loop. Connections already handed off keep running
    /// until the runtime shuts down.
    pub fn abort(&self) {
        self.task.abort();
    }
}
