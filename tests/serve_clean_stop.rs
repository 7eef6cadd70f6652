//! SIGTERM while a short request is in flight.
//!
//! Kept in its own test binary: the signal goes to the whole process.

#![cfg(unix)]

use std::time::Duration;

use pulse_server::config::ServerConfig;
use pulse_server::http::HttpServer;
use pulse_server::lifecycle;

mod common;

#[tokio::test]
async fn sigterm_during_short_request_stops_cleanly() {
    let config = ServerConfig::default();

    let listener = common::loopback_listener().await;
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&config).merge(common::slow_routes());
    let in_flight = server.in_flight().clone();

    let running = tokio::spawn(async move { lifecycle::serve(&config, listener, server).await });
    let request = tokio::spawn(async move {
        let res = common::client()
            .get(format!("http://{addr}/slow/300"))
            .send()
            .await
            .unwrap();
        (res.status(), res.text().await.unwrap())
    });
    common::wait_for_tracker(&in_flight, 1).await;

    common::signal_self("TERM");
    let result = tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("serve did not return inside the grace period")
        .unwrap();

    assert!(result.is_ok(), "expected clean stop, got {result:?}");
    let (status, body) = request.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body, "done");
}
