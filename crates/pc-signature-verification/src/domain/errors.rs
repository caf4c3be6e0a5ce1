//! # Verification Errors
//!
//! Every reason a single response can fail verification, plus the
//! construction-time configuration errors.
//!
//! Response-level errors never escape the orchestrator: they collapse to
//! `VerificationResult::Failed` and survive only as log fields.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Why a response failed verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The response carried no signature header
    #[error("Signature header is missing")]
    MissingSignature,

    /// The caller supplied no request time
    #[error("Request time is missing")]
    MissingRequestTime,

    /// Neither a body nor an ETag is available to verify
    #[error("Both body and ETag are missing")]
    MissingBodyAndEtag,

    /// The signature header is not valid base64
    #[error("Signature header is not valid base64: {0}")]
    InvalidBase64(String),

    /// The decoded signature has the wrong length
    #[error("Invalid signature size: expected {expected} bytes, got {actual}")]
    InvalidSignatureSize { expected: usize, actual: usize },

    /// The request nonce is not valid base64
    #[error("Nonce is not valid base64")]
    InvalidNonce,

    /// The root signature over the intermediate key does not verify
    #[error("Error verifying intermediate key.")]
    IntermediateKeyInvalid,

    /// The intermediate key is authentic but past its expiration
    #[error("Intermediate key expired (expiration {expiration}, now {now})")]
    IntermediateKeyExpired { expiration: u64, now: u64 },

    /// The payload signature does not match the canonical message
    #[error("Signature payload does not match the response")]
    PayloadMismatch,

    /// Debug override forcing every verification to fail
    #[error("Signing errors forced by configuration")]
    ForcedFailure,
}

impl VerificationError {
    /// Stable short reason, used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingSignature => "missing signature",
            Self::MissingRequestTime => "missing request time",
            Self::MissingBodyAndEtag => "missing body and etag",
            Self::InvalidBase64(_) => "invalid signature encoding",
            Self::InvalidSignatureSize { .. } => "invalid signature size",
            Self::InvalidNonce => "invalid nonce",
            Self::IntermediateKeyInvalid => "intermediate key invalid",
            Self::IntermediateKeyExpired { .. } => "intermediate key expired",
            Self::PayloadMismatch => "payload mismatch",
            Self::ForcedFailure => "forced failure",
        }
    }

    /// Decode errors are rejected before any signature math runs.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64(_) | Self::InvalidSignatureSize { .. } | Self::InvalidNonce
        )
    }

    /// Errors raised while validating the root -> intermediate link.
    pub fn is_trust_chain_error(&self) -> bool {
        matches!(
            self,
            Self::IntermediateKeyInvalid | Self::IntermediateKeyExpired { .. }
        )
    }
}

/// Errors detected while building the engine from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured root public key is unusable
    #[error("Invalid root public key: {0}")]
    InvalidRootKey(#[from] CryptoError),

    /// Unknown verification mode name
    #[error("Unknown verification mode: {0} (expected disabled, informational or enforced)")]
    UnknownMode(String),

    /// An environment variable held an unparsable value
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}
