//! # Response Signature Verification
//!
//! Decides whether an HTTP response really came from the purchases backend
//! and was not altered in transit.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): signature codec, canonical message, trust chain, modes
//! - **Ports Layer** (`ports/`): trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): the orchestrator that returns a verdict
//!
//! ## Trust Chain
//!
//! ```text
//! compiled-in root key
//!        │ signs (intermediate key ‖ expiration)
//!        ▼
//! intermediate key (cached until expiration)
//!        │ signs (salt ‖ nonce ‖ path ‖ body-or-etag ‖ request time)
//!        ▼
//! response payload
//! ```
//!
//! ## Security Notes
//!
//! - Every malformed input resolves to `FAILED`; nothing on the response path panics
//! - A fresh nonce per request binds each signature to one request
//! - Callers in `Informational` mode keep data that failed verification

pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export public API
pub use config::{SigningConfig, DEFAULT_ROOT_PUBLIC_KEY};
pub use domain::entities::{ResponseVerificationRequest, VerificationOutcome, VerificationResult};
pub use domain::errors::{ConfigError, VerificationError};
pub use domain::intermediate::{CacheLookup, IntermediateKeyCache, IntermediateKeyVerifier};
pub use domain::mode::{ResponseVerifier, VerificationMode, VerificationPolicy};
pub use domain::signature::{Signature, SIGNATURE_SIZE};
pub use metrics::{MetricsSnapshot, VerificationMetrics};
pub use ports::inbound::ResponseVerificationApi;
pub use ports::outbound::{FixedTimeSource, SystemTimeSource, TimeSource};
pub use service::ResponseVerificationService;
