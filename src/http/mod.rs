//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum::serve)
//!     → request.rs (x-request-id assigned / kept)
//!     → middleware/ (in-flight accounting)
//!     → handlers.rs (/ping, /health)
//!     → response.rs (JSON bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{HealthResponse, PingResponse};
pub use server::{HttpServer, ServerError, ServerHandle};
