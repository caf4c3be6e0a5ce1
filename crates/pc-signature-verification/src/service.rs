//! # Response Verification Service
//!
//! Application service layer that implements the `ResponseVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`ResponseVerificationApi`)
//! - Uses the outbound port (`TimeSource`) through the trust chain verifier
//! - Delegates decoding and signature math to the domain layer
//!
//! ## Decision Order
//!
//! 1. Mode `Disabled` -> `NOT_REQUESTED`
//! 2. `force_signing_errors` -> `FAILED`
//! 3. Caller skip override -> `NOT_REQUESTED`
//! 4. Missing signature, request time, or both body and ETag -> `FAILED`
//! 5. Decode signature and nonce; failure -> `FAILED`
//! 6. Resolve the payload verifier (trust chain); failure -> `FAILED`
//! 7. Verify the payload over the canonical message

use crate::config::SigningConfig;
use crate::domain::entities::{ResponseVerificationRequest, VerificationOutcome, VerificationResult};
use crate::domain::errors::{ConfigError, VerificationError};
use crate::domain::message::{build_message, content_identity, decode_nonce};
use crate::domain::mode::{ResponseVerifier, VerificationMode, VerificationPolicy};
use crate::domain::signature::Signature;
use crate::metrics::VerificationMetrics;
use crate::ports::inbound::ResponseVerificationApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};
use shared_crypto::{Ed25519Verifier, SignatureVerifier};
use std::sync::Arc;

/// Response verification service.
///
/// One instance lives for the lifetime of the SDK configuration and is shared
/// by every request worker.
#[derive(Debug)]
pub struct ResponseVerificationService {
    mode: VerificationMode,
    force_signing_errors: bool,
    metrics: Arc<VerificationMetrics>,
}

impl ResponseVerificationService {
    /// Create a service around an already-built mode.
    pub fn new(mode: VerificationMode, force_signing_errors: bool) -> Self {
        Self {
            mode,
            force_signing_errors,
            metrics: Arc::new(VerificationMetrics::new()),
        }
    }

    /// Build the service from configuration using the system clock.
    ///
    /// # Errors
    /// * `ConfigError::InvalidRootKey` - the configured root key is unusable
    pub fn from_config(config: &SigningConfig) -> Result<Self, ConfigError> {
        Self::from_config_with_time(config, Arc::new(SystemTimeSource))
    }

    /// Build the service from configuration with an explicit clock.
    pub fn from_config_with_time(
        config: &SigningConfig,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        let root_key = config.root_public_key()?;
        let root: Arc<dyn SignatureVerifier> = Arc::new(Ed25519Verifier::new(&root_key)?);
        let mode = VerificationMode::from_policy(config.mode, root, time);

        tracing::info!(
            mode = %config.mode,
            force_signing_errors = config.force_signing_errors,
            "Response verification configured"
        );
        Ok(Self::new(mode, config.force_signing_errors))
    }

    pub fn mode(&self) -> &VerificationMode {
        &self.mode
    }

    pub fn policy(&self) -> VerificationPolicy {
        self.mode.policy()
    }

    pub fn metrics(&self) -> Arc<VerificationMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Verify one response and report why it failed, if it did.
    ///
    /// Updates metrics and emits exactly one log event per call.
    pub fn verify_response_detailed(
        &self,
        request: &ResponseVerificationRequest<'_>,
    ) -> Result<VerificationOutcome, VerificationError> {
        let span = tracing::debug_span!(
            "verify_response",
            path = request.request_path,
            status_code = request.status_code,
            mode = %self.mode.policy(),
        );
        let _guard = span.enter();

        let outcome = self.evaluate(request);
        match &outcome {
            Ok(VerificationOutcome::Verified) => {
                tracing::debug!("Response signature verified");
            }
            Ok(VerificationOutcome::NotRequested) => {
                tracing::trace!(
                    skipped = request.skip_verification,
                    "Response verification not requested"
                );
            }
            Err(error) => {
                tracing::warn!(
                    reason = error.reason(),
                    error = %error,
                    enforced = self.mode.is_enforced(),
                    "Response signature verification failed"
                );
            }
        }

        let result = match &outcome {
            Ok(outcome) => VerificationResult::from(*outcome),
            Err(_) => VerificationResult::Failed,
        };
        self.metrics.record_result(result);
        outcome
    }

    fn evaluate(
        &self,
        request: &ResponseVerificationRequest<'_>,
    ) -> Result<VerificationOutcome, VerificationError> {
        let Some(response_verifier) = self.mode.verifier() else {
            return Ok(VerificationOutcome::NotRequested);
        };
        if self.force_signing_errors {
            return Err(VerificationError::ForcedFailure);
        }
        if request.skip_verification {
            return Ok(VerificationOutcome::NotRequested);
        }

        let encoded = request
            .signature
            .ok_or(VerificationError::MissingSignature)?;
        let request_time = request
            .request_time
            .ok_or(VerificationError::MissingRequestTime)?;
        let content = content_identity(request.body, request.etag)
            .ok_or(VerificationError::MissingBodyAndEtag)?;

        let signature = Signature::parse(encoded)?;
        let nonce = decode_nonce(request.nonce)?;

        let verifier = match response_verifier {
            ResponseVerifier::Root(verifier) => Arc::clone(verifier),
            ResponseVerifier::Chained(chain) => {
                let (verifier, lookup) = chain.resolve(&signature)?;
                self.metrics.record_cache_lookup(lookup);
                verifier
            }
        };

        let message = build_message(
            &signature.salt,
            &nonce,
            request.request_path,
            content,
            request_time,
        );
        if !verifier.verify(&message, &signature.payload) {
            return Err(VerificationError::PayloadMismatch);
        }

        Ok(VerificationOutcome::Verified)
    }
}

impl ResponseVerificationApi for ResponseVerificationService {
    fn verify_response(&self, request: &ResponseVerificationRequest<'_>) -> VerificationResult {
        match self.verify_response_detailed(request) {
            Ok(outcome) => outcome.into(),
            Err(_) => VerificationResult::Failed,
        }
    }

    fn create_random_nonce(&self) -> String {
        shared_crypto::create_random_nonce()
    }
}
