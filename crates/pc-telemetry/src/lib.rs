//! # Purchases-Core Telemetry
//!
//! Structured logging for the verification engine's binaries and test suites.
//! Library crates only emit `tracing` events; this crate installs the
//! subscriber that renders them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Verification events are now rendered to stderr
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PC_SERVICE_NAME` | `purchases-core` | Service name in the startup event |
//! | `PC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PC_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `PC_CONSOLE_OUTPUT` | `true` | Disable to silence all output |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global subscriber.
///
/// Returns a guard that should be held for the lifetime of the application.
///
/// # Errors
/// * `Config` - the log level is not a valid filter directive
/// * `AlreadyInitialized` - a subscriber was installed earlier in this process
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Convenience macro for a span around one response verification.
///
/// # Example
///
/// ```rust,ignore
/// use pc_telemetry::verification_span;
///
/// let span = verification_span!("/v1/subscribers/abc", status_code = 200);
/// let _enter = span.enter();
/// ```
#[macro_export]
macro_rules! verification_span {
    ($path:expr) => {
        tracing::info_span!("verification", path = %$path)
    };
    ($path:expr, $($field:tt)*) => {
        tracing::info_span!("verification", path = %$path, $($field)*)
    };
}
