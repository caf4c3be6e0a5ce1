//! # Intermediate Key Trust Chain
//!
//! Responses are signed by a short-lived intermediate key. The intermediate
//! key travels inside every signature header together with its expiration and
//! a root signature over both. This module checks that link and hands back a
//! verifier scoped to the intermediate key.
//!
//! Successfully validated keys are cached until their expiration, so a warm
//! engine performs one Ed25519 verification per response instead of two.
//!
//! ## Concurrency
//!
//! The cache is the only shared mutable state of the engine. Lookups take a
//! read lock; inserts take a write lock. Signature math runs outside both, so
//! two threads may validate the same new key concurrently. Both produce the
//! same entry; the later insert overwrites it with an equal value.

use super::errors::VerificationError;
use super::signature::{Signature, INTERMEDIATE_KEY_SIZE};
use crate::ports::outbound::TimeSource;
use parking_lot::RwLock;
use shared_crypto::{Ed25519Verifier, SignatureVerifier};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type IntermediateKey = [u8; INTERMEDIATE_KEY_SIZE];

#[derive(Clone)]
struct CachedVerifier {
    verifier: Arc<Ed25519Verifier>,
    expiration: u64,
}

/// In-memory map of validated intermediate keys.
///
/// Entries are immutable once inserted and are treated as absent once
/// `now >= expiration`.
#[derive(Default)]
pub struct IntermediateKeyCache {
    entries: RwLock<HashMap<IntermediateKey, CachedVerifier>>,
}

impl IntermediateKeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &IntermediateKey, now: u64) -> Option<Arc<Ed25519Verifier>> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| now < entry.expiration)
            .map(|entry| Arc::clone(&entry.verifier))
    }

    fn insert(&self, key: IntermediateKey, verifier: Arc<Ed25519Verifier>, expiration: u64) {
        let mut entries = self.entries.write();
        entries.insert(
            key,
            CachedVerifier {
                verifier,
                expiration,
            },
        );
    }

    /// Number of entries that are still valid at `now`.
    pub fn live_entries(&self, now: u64) -> usize {
        self.entries
            .read()
            .values()
            .filter(|entry| now < entry.expiration)
            .count()
    }

    /// Drop entries that expired at or before `now`. Returns how many were removed.
    pub fn purge_expired(&self, now: u64) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expiration);
        before - entries.len()
    }
}

/// Whether a resolved intermediate verifier came from the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheLookup {
    Hit,
    Miss,
}

/// Validates intermediate keys against the root key and caches the result.
pub struct IntermediateKeyVerifier {
    root: Arc<dyn SignatureVerifier>,
    time: Arc<dyn TimeSource>,
    cache: IntermediateKeyCache,
}

impl IntermediateKeyVerifier {
    /// Create a verifier with an empty cache.
    pub fn new(root: Arc<dyn SignatureVerifier>, time: Arc<dyn TimeSource>) -> Self {
        Self::with_cache(root, time, IntermediateKeyCache::new())
    }

    /// Create a verifier around an existing cache.
    pub fn with_cache(
        root: Arc<dyn SignatureVerifier>,
        time: Arc<dyn TimeSource>,
        cache: IntermediateKeyCache,
    ) -> Self {
        Self { root, time, cache }
    }

    /// Return a verifier for `signature.intermediate_key` if the key is
    /// authentic (signed by the root key) and not expired.
    ///
    /// # Errors
    /// * `IntermediateKeyInvalid` - the root signature does not verify
    /// * `IntermediateKeyExpired` - expiration is at or before now
    pub fn create_intermediate_key_verifier_if_verified(
        &self,
        signature: &Signature,
    ) -> Result<Arc<dyn SignatureVerifier>, VerificationError> {
        self.resolve(signature).map(|(verifier, _)| verifier)
    }

    /// Same as [`Self::create_intermediate_key_verifier_if_verified`], also
    /// reporting whether the cache answered.
    pub fn resolve(
        &self,
        signature: &Signature,
    ) -> Result<(Arc<dyn SignatureVerifier>, CacheLookup), VerificationError> {
        let now = self.time.now();

        if let Some(verifier) = self.cache.get(&signature.intermediate_key, now) {
            tracing::trace!("Intermediate key served from cache");
            let verifier: Arc<dyn SignatureVerifier> = verifier;
            return Ok((verifier, CacheLookup::Hit));
        }

        if !self
            .root
            .verify(&signature.intermediate_key_message(), &signature.intermediate_key_signature)
        {
            return Err(VerificationError::IntermediateKeyInvalid);
        }

        let expiration = signature.expiration_secs();
        if expiration <= now {
            return Err(VerificationError::IntermediateKeyExpired { expiration, now });
        }

        // Root-signed but not a curve point: the backend never produces this.
        let verifier = Ed25519Verifier::from_slice(&signature.intermediate_key)
            .map(Arc::new)
            .map_err(|_| VerificationError::IntermediateKeyInvalid)?;

        self.cache
            .insert(signature.intermediate_key, Arc::clone(&verifier), expiration);
        tracing::debug!(expiration, "Intermediate key validated and cached");

        let verifier: Arc<dyn SignatureVerifier> = verifier;
        Ok((verifier, CacheLookup::Miss))
    }

    /// Number of cached keys that are still valid.
    pub fn cached_keys(&self) -> usize {
        self.cache.live_entries(self.time.now())
    }

    /// Evict expired cache entries.
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired(self.time.now())
    }
}

impl fmt::Debug for IntermediateKeyVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntermediateKeyVerifier")
            .field("cached_keys", &self.cached_keys())
            .finish_non_exhaustive()
    }
}
