//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured bind address
//! - Bind the socket before any traffic is expected
//! - Surface bind failures as a distinct, fatal error

use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured address is not a socket address.
    #[error("invalid bind address {address:?}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr =
        config
            .bind_address
            .parse()
            .map_err(|source| ListenerError::Address {
                address: config.bind_address.clone(),
                source,
            })?;

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if ipv6_unavailable(addr, &e) => {
            let fallback = SocketAddr::from((Ipv4Addr::UNSPECIFIED, addr.port()));
            tracing::warn!(
                address = %addr,
                fallback = %fallback,
                error = %e,
                "IPv6 unavailable, listening on IPv4 only"
            );
            TcpListener::bind(fallback)
                .await
                .map_err(|source| ListenerError::Bind { address: fallback, source })?
        }
        Err(source) => return Err(ListenerError::Bind { address: addr, source }),
    };

    let local_addr = listener
        .local_addr()
        .map_err(|source| ListenerError::Bind { address: addr, source })?;

    tracing::info!(address = %local_addr, "Listener bound");

    Ok(listener)
}

/// `[::]` failed for a reason other than the port itself.
fn ipv6_unavailable(addr: SocketAddr, err: &std::io::Error) -> bool {
    addr.ip() == IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        && !matches!(
            err.kind(),
            ErrorKind::AddrInUse | ErrorKind::PermissionDenied
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(addr: &str) -> ListenerConfig {
        ListenerConfig {
            bind_address: addr.to_string(),
        }
    }

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let listener = bind(&config("127.0.0.1:0")).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn address_in_use_is_a_bind_error() {
        let taken = bind(&config("127.0.0.1:0")).await.unwrap();
        let addr = taken.local_addr().unwrap();

        let err = bind(&config(&addr.to_string())).await.unwrap_err();
        match err {
            ListenerError::Bind { address, source } => {
                assert_eq!(address, addr);
                assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
            }
            other => panic!("expected bind error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn default_listener_accepts_ipv4_and_ipv6() {
        let listener = bind(&ListenerConfig::on_port(0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept = tokio::spawn(async move {
            for _ in 0..2 {
                let _ = listener.accept().await;
            }
        });

        tokio::net::TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("IPv4 loopback should connect");

        if std::net::TcpListener::bind("[::1]:0").is_ok() {
            tokio::net::TcpStream::connect(("::1", port))
                .await
                .expect("IPv6 loopback should connect");
        }
        accept.abort();
    }

    #[test]
    fn only_non_port_errors_trigger_ipv4_fallback() {
        let any_v6: SocketAddr = "[::]:8080".parse().unwrap();
        let any_v4: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let unsupported = std::io::Error::from_raw_os_error(97); // EAFNOSUPPORT on Linux
        let in_use = std::io::Error::from(ErrorKind::AddrInUse);

        assert!(ipv6_unavailable(any_v6, &unsupported));
        assert!(!ipv6_unavailable(any_v6, &in_use));
        assert!(!ipv6_unavailable(any_v4, &unsupported));
    }

    #[tokio::test]
    async fn malformed_address_is_rejected() {
        let err = bind(&config(":8080")).await.unwrap_err();
        assert!(matches!(err, ListenerError::Address { .. }));
    }
}
