//! Counters for response verification outcomes and trust chain cache use.
//!
//! ## Usage
//!
//! ```ignore
//! let service = ResponseVerificationService::from_config(&config)?;
//! service.verify_response(&request);
//!
//! let snapshot = service.metrics().snapshot();
//! tracing::info!(failed = snapshot.failed, "verification stats");
//! ```

use crate::domain::entities::VerificationResult;
use crate::domain::intermediate::CacheLookup;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe verification counters.
#[derive(Debug, Default)]
pub struct VerificationMetrics {
    /// Responses verified successfully
    pub verified: AtomicU64,
    /// Responses that failed verification
    pub failed: AtomicU64,
    /// Responses not verified (disabled or skipped)
    pub not_requested: AtomicU64,
    /// Intermediate keys served from cache
    pub cache_hits: AtomicU64,
    /// Intermediate keys that required a root-level check
    pub cache_misses: AtomicU64,
}

impl VerificationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_result(&self, result: VerificationResult) {
        let counter = match result {
            VerificationResult::Verified => &self.verified,
            VerificationResult::Failed => &self.failed,
            VerificationResult::NotRequested => &self.not_requested,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_lookup(&self, lookup: CacheLookup) {
        let counter = match lookup {
            CacheLookup::Hit => &self.cache_hits,
            CacheLookup::Miss => &self.cache_misses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            verified: self.verified.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            not_requested: self.not_requested.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`VerificationMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub verified: u64,
    pub failed: u64,
    pub not_requested: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl MetricsSnapshot {
    pub fn total(&self) -> u64 {
        self.verified + self.failed + self.not_requested
    }

    /// Fraction of trust chain lookups answered by the cache.
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / lookups as f64
    }
}
