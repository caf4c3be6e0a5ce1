//! # Canonical Response Message
//!
//! The exact bytes the backend signs for one response:
//!
//! ```text
//! salt || base64_decode(nonce) || path || (body | etag) || request_time
//! ```
//!
//! Field order is fixed by the backend signer. Any reordering still produces
//! well-formed messages that simply never verify.

use super::errors::VerificationError;
use base64::Engine as _;

/// Decode the base64 request nonce into raw bytes.
pub fn decode_nonce(nonce: &str) -> Result<Vec<u8>, VerificationError> {
    base64::engine::general_purpose::STANDARD
        .decode(nonce)
        .map_err(|_| VerificationError::InvalidNonce)
}

/// The content-identity field of a response: its body, or its ETag when the
/// body is absent (e.g. "not modified" replies).
pub fn content_identity<'a>(body: Option<&'a str>, etag: Option<&'a str>) -> Option<&'a str> {
    body.or(etag)
}

/// Assemble the canonical message.
pub fn build_message(
    salt: &[u8],
    nonce: &[u8],
    request_path: &str,
    content: &str,
    request_time: &str,
) -> Vec<u8> {
    let mut message = Vec::with_capacity(
        salt.len() + nonce.len() + request_path.len() + content.len() + request_time.len(),
    );
    message.extend_from_slice(salt);
    message.extend_from_slice(nonce);
    message.extend_from_slice(request_path.as_bytes());
    message.extend_from_slice(content.as_bytes());
    message.extend_from_slice(request_time.as_bytes());
    message
}
