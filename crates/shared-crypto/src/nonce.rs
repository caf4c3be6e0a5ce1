//! # Request Nonces
//!
//! Fresh random tokens the client attaches to a request and the backend
//! mixes into the signed response, so a captured response cannot be replayed
//! against a different request.

use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

/// Raw nonce length in bytes (before base64).
pub const NONCE_LENGTH: usize = 12;

/// Produce a base64 encoding of 12 bytes from the operating system CSPRNG.
pub fn create_random_nonce() -> String {
    let mut bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
