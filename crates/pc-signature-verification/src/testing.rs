//! Fixture helpers for tests: a backend-side response signer and a verifier
//! wrapper that counts calls.
//!
//! Compiled for this crate's unit tests and, through the `test-utils`
//! feature, for the workspace test suite.

use crate::domain::message::{build_message, decode_nonce};
use crate::domain::signature::{Signature, SALT_SIZE};
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, SignatureVerifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 2100-01-01T00:00:00Z
pub const FAR_FUTURE_EXPIRATION: u32 = 4_102_444_800;

pub const ROOT_SEED: [u8; 32] = [0x11; 32];
pub const INTERMEDIATE_SEED: [u8; 32] = [0x22; 32];

/// A captured, known-good response signed with `ROOT_SEED` / `INTERMEDIATE_SEED`.
pub mod fixture {
    pub const ROOT_PUBLIC_KEY: &str = "0EqyMnQrtKs6E2i9RhXk5tAiSrcaAWuvhSCjMsl3hzc=";
    pub const NONCE: &str = "MTIzNDU2Nzg5MGFi";
    pub const PATH: &str = "test-url-path";
    pub const BODY: &str = r#"{"request_date":"2023-02-21T18:58:36Z","request_date_ms":1677005916011,"subscriber":{"original_app_user_id":"user-42","entitlements":{}}}"#;
    pub const REQUEST_TIME: &str = "1677005916012";
    pub const SIGNATURE: &str = "oJql9HpnWYAv+VX43C0qFKXJnSO+l/hkEn/5ODRVpPD0hlcA3av2mqiawo9oLoMvpB4iNkfgKwf5Jm5z5CYjfeAmr4xM27KrDCouz+khqNTp7fjoWg+nWb6r8dpWqjDN8tWoAwABAgMEBQYHCAkKCwwNDg+FYZHWVB0DosOFIvLdgM2tfJNOcsjsYzaagXlscr1mG41D3+MEa7lo2+bxltoY8ohvRJ/MRMePBPLCDt6CT64D";
}

/// Plays the backend: certifies an intermediate key with a root key and signs
/// responses with the intermediate key.
pub struct ResponseSigner {
    root: Ed25519KeyPair,
    intermediate: Ed25519KeyPair,
    expiration: u32,
    salt: [u8; SALT_SIZE],
}

impl Default for ResponseSigner {
    fn default() -> Self {
        Self::from_seeds(ROOT_SEED, INTERMEDIATE_SEED)
    }
}

impl ResponseSigner {
    pub fn from_seeds(root_seed: [u8; 32], intermediate_seed: [u8; 32]) -> Self {
        let mut salt = [0u8; SALT_SIZE];
        for (i, b) in salt.iter_mut().enumerate() {
            *b = i as u8;
        }
        Self {
            root: Ed25519KeyPair::from_seed(root_seed),
            intermediate: Ed25519KeyPair::from_seed(intermediate_seed),
            expiration: FAR_FUTURE_EXPIRATION,
            salt,
        }
    }

    pub fn with_expiration(mut self, expiration: u32) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn with_salt(mut self, salt: [u8; SALT_SIZE]) -> Self {
        self.salt = salt;
        self
    }

    pub fn root_public_key(&self) -> Ed25519PublicKey {
        self.root.public_key()
    }

    pub fn intermediate_public_key(&self) -> Ed25519PublicKey {
        self.intermediate.public_key()
    }

    /// The canonical message this signer would sign.
    pub fn message(&self, nonce: &str, path: &str, content: &str, request_time: &str) -> Vec<u8> {
        let nonce = decode_nonce(nonce).expect("fixture nonce must be base64");
        build_message(&self.salt, &nonce, path, content, request_time)
    }

    pub fn sign(&self, nonce: &str, path: &str, content: &str, request_time: &str) -> Signature {
        let intermediate_key = *self.intermediate.public_key().as_bytes();
        let intermediate_key_expiration = self.expiration.to_be_bytes();

        let mut certified = Vec::with_capacity(36);
        certified.extend_from_slice(&intermediate_key);
        certified.extend_from_slice(&intermediate_key_expiration);
        let intermediate_key_signature = *self.root.sign(&certified).as_bytes();

        let payload = *self
            .intermediate
            .sign(&self.message(nonce, path, content, request_time))
            .as_bytes();

        Signature {
            intermediate_key,
            intermediate_key_expiration,
            intermediate_key_signature,
            salt: self.salt,
            payload,
        }
    }

    pub fn sign_base64(
        &self,
        nonce: &str,
        path: &str,
        content: &str,
        request_time: &str,
    ) -> String {
        self.sign(nonce, path, content, request_time).to_base64()
    }
}

/// Delegates to an inner verifier and counts invocations.
pub struct CountingVerifier {
    inner: Arc<dyn SignatureVerifier>,
    calls: AtomicUsize,
}

impl CountingVerifier {
    pub fn new(inner: Arc<dyn SignatureVerifier>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SignatureVerifier for CountingVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(message, signature)
    }
}
