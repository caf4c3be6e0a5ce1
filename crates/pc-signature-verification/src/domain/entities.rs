//! # Domain Entities
//!
//! Inputs and outputs of one response verification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-visible verdict for one response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationResult {
    /// The response was produced by the backend and is untampered
    Verified,
    /// Verification ran and did not succeed, for any reason
    Failed,
    /// Verification did not run (disabled mode or caller override)
    NotRequested,
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Failed => "FAILED",
            Self::NotRequested => "NOT_REQUESTED",
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-failure outcome of the detailed API; failures are `VerificationError`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    NotRequested,
}

impl From<VerificationOutcome> for VerificationResult {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Verified => Self::Verified,
            VerificationOutcome::NotRequested => Self::NotRequested,
        }
    }
}

/// Everything the HTTP layer hands over for one response.
///
/// `status_code` is carried for diagnostics only; the content-identity field
/// is whichever of `body` / `etag` is present, body first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseVerificationRequest<'a> {
    /// Logical endpoint path that was signed
    pub request_path: &'a str,
    /// HTTP status of the response
    pub status_code: u16,
    /// Base64 signature header, if the response had one
    pub signature: Option<&'a str>,
    /// Base64 nonce sent with the request
    pub nonce: &'a str,
    /// Response body
    pub body: Option<&'a str>,
    /// Request time echoed by the backend, opaque
    pub request_time: Option<&'a str>,
    /// ETag of a "not modified" response
    pub etag: Option<&'a str>,
    /// Caller-level override: skip verification for this response
    pub skip_verification: bool,
}

impl<'a> ResponseVerificationRequest<'a> {
    pub fn new(request_path: &'a str, status_code: u16, nonce: &'a str) -> Self {
        Self {
            request_path,
            status_code,
            signature: None,
            nonce,
            body: None,
            request_time: None,
            etag: None,
            skip_verification: false,
        }
    }

    pub fn with_signature(mut self, signature: &'a str) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn with_body(mut self, body: &'a str) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_request_time(mut self, request_time: &'a str) -> Self {
        self.request_time = Some(request_time);
        self
    }

    pub fn with_etag(mut self, etag: &'a str) -> Self {
        self.etag = Some(etag);
        self
    }

    pub fn skip_verification(mut self) -> Self {
        self.skip_verification = true;
        self
    }
}
