//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{extract::Path, routing::get, Router};
use std::time::Duration;

use pulse_server::config::ListenerConfig;
use pulse_server::http::middleware::InFlightTracker;
use pulse_server::http::{HttpServer, ServerHandle};
use pulse_server::lifecycle::Shutdown;
use pulse_server::net;

pub struct TestServer {
    pub shutdown: Shutdown,
    pub handle: ServerHandle,
    pub base_url: String,
}

/// Serve `server` on an ephemeral loopback port.
pub async fn start(server: HttpServer) -> TestServer {
    let listener = loopback_listener().await;

    let shutdown = Shutdown::new();
    let handle = server.spawn(listener, shutdown.subscribe()).unwrap();
    let base_url = format!("http://{}", handle.local_addr());

    TestServer {
        shutdown,
        handle,
        base_url,
    }
}

/// `GET /slow/{ms}` sleeps for `ms` milliseconds, then answers "done".
pub fn slow_routes() -> Router {
    Router::new().route(
        "/slow/{ms}",
        get(|Path(ms): Path<u64>| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            "done"
        }),
    )
}

/// Deliver `signal` (e.g. "TERM") to this test process.
#[cfg(unix)]
pub fn signal_self(signal: &str) {
    let status = std::process::Command::new("kill")
        .arg(format!("-{signal}"))
        .arg(std::process::id().to_string())
        .status()
        .expect("failed to run kill");
    assert!(status.success());
}

/// Bind an ephemeral loopback port.
pub async fn loopback_listener() -> tokio::net::TcpListener {
    net::bind(&ListenerConfig {
        bind_address: "127.0.0.1:0".into(),
    })
    .await
    .unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Poll until at least `n` requests are inside a handler.
pub async fn wait_for_in_flight(handle: &ServerHandle, n: u64) {
    wait_for_tracker(handle.in_flight(), n).await
}

pub async fn wait_for_tracker(tracker: &InFlightTracker, n: u64) {
    for _ in 0..200 {
        if tracker.active_count() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("never saw {n} request(s) in flight");
}

/// Matches `YYYY-MM-DDTHH:mm:ss.SSS+07`.
pub fn is_civil_timestamp(s: &str) -> bool {
    const SHAPE: &str = "dddd-dd-ddTdd:dd:dd.ddd+07";
    s.len() == SHAPE.len()
        && s.chars().zip(SHAPE.chars()).all(|(c, want)| match want {
            'd' => c.is_ascii_digit(),
            other => c == other,
        })
}
