//! # Verification Mode
//!
//! How strictly the host application treats response signatures. Chosen once
//! when the engine is built; changing it means building a new engine.
//!
//! | Mode | Engine verifies | Caller on `FAILED` |
//! |------|-----------------|--------------------|
//! | `Disabled` | never (`NOT_REQUESTED`) | n/a |
//! | `Informational` | yes | logs, keeps the data |
//! | `Enforced` | yes | discards the data |

use super::intermediate::IntermediateKeyVerifier;
use crate::domain::errors::ConfigError;
use crate::ports::outbound::TimeSource;
use serde::{Deserialize, Serialize};
use shared_crypto::SignatureVerifier;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Configuration-level name of a mode, without any verifier attached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPolicy {
    #[default]
    Disabled,
    Informational,
    Enforced,
}

impl VerificationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Informational => "informational",
            Self::Enforced => "enforced",
        }
    }
}

impl fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" => Ok(Self::Disabled),
            "informational" => Ok(Self::Informational),
            "enforced" => Ok(Self::Enforced),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Where the payload verifier for a response comes from.
#[derive(Clone)]
pub enum ResponseVerifier {
    /// Payloads are signed directly by a fixed key; no trust chain.
    Root(Arc<dyn SignatureVerifier>),
    /// Payloads are signed by an intermediate key certified by the root key.
    Chained(Arc<IntermediateKeyVerifier>),
}

impl fmt::Debug for ResponseVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root(_) => f.write_str("Root(..)"),
            Self::Chained(chain) => f.debug_tuple("Chained").field(chain).finish(),
        }
    }
}

/// The active verification mode.
#[derive(Clone, Debug)]
pub enum VerificationMode {
    Disabled,
    Informational(ResponseVerifier),
    Enforced(ResponseVerifier),
}

impl VerificationMode {
    /// Build the mode for `policy`, creating the single long-lived trust
    /// chain verifier (and its cache) for the enabled policies.
    pub fn from_policy(
        policy: VerificationPolicy,
        root: Arc<dyn SignatureVerifier>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        let chained =
            || ResponseVerifier::Chained(Arc::new(IntermediateKeyVerifier::new(root, time)));
        match policy {
            VerificationPolicy::Disabled => Self::Disabled,
            VerificationPolicy::Informational => Self::Informational(chained()),
            VerificationPolicy::Enforced => Self::Enforced(chained()),
        }
    }

    pub fn policy(&self) -> VerificationPolicy {
        match self {
            Self::Disabled => VerificationPolicy::Disabled,
            Self::Informational(_) => VerificationPolicy::Informational,
            Self::Enforced(_) => VerificationPolicy::Enforced,
        }
    }

    pub fn should_verify(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub fn is_enforced(&self) -> bool {
        matches!(self, Self::Enforced(_))
    }

    pub fn verifier(&self) -> Option<&ResponseVerifier> {
        match self {
            Self::Disabled => None,
            Self::Informational(verifier) | Self::Enforced(verifier) => Some(verifier),
        }
    }
}
