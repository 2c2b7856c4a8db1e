//! Logging for Hermes.
//!
//! Structured logs go through `tracing`; this crate installs the subscriber.
//! Pretty output is the default for interactive use, JSON for production.
//!
//! ```rust,ignore
//! use hermes_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! ```

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, DEFAULT_SERVICE_NAME};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
