//! # Shared Crypto - Verification Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Root, intermediate and payload signature checks |
//! | `nonce` | OS CSPRNG + base64 | Per-request replay tokens |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic signatures, no RNG dependency on verify
//! - **Fail closed**: wrong-length keys or signatures verify as `false`
//! - **Nonces**: 96 bits from `OsRng`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod nonce;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use nonce::{create_random_nonce, NONCE_LENGTH};
pub use signatures::{
    verify_ed25519, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, Ed25519Verifier,
    SignatureVerifier, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
