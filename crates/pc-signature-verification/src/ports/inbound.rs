//! # Inbound Ports (Driving Ports / API)
//!
//! The surface the networking layer uses for every signed response.

use crate::domain::entities::{ResponseVerificationRequest, VerificationResult};

/// Response verification API.
///
/// Implementations must be thread-safe (`Send + Sync`): responses are
/// verified concurrently from whichever worker received them.
pub trait ResponseVerificationApi: Send + Sync {
    /// Verify one response.
    ///
    /// Never panics on response input: malformed or hostile responses
    /// resolve to `VerificationResult::Failed`.
    fn verify_response(&self, request: &ResponseVerificationRequest<'_>) -> VerificationResult;

    /// Fresh base64 nonce to attach to the next request.
    fn create_random_nonce(&self) -> String;
}
