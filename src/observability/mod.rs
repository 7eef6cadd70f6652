//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer, pretty or JSON)
//!     → stdout
//! ```

pub mod logging;
