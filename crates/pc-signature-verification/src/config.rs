//! Engine configuration.
//!
//! # Example
//!
//! ```ignore
//! use pc_signature_verification::{SigningConfig, VerificationPolicy};
//!
//! let config = SigningConfig::new(VerificationPolicy::Enforced)
//!     .with_force_signing_errors(false);
//! config.validate()?;
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PC_VERIFICATION_MODE` | `disabled` | `disabled`, `informational` or `enforced` |
//! | `PC_ROOT_PUBLIC_KEY` | compiled-in key | base64 Ed25519 root key override |
//! | `PC_FORCE_SIGNING_ERRORS` | `false` | report every verification as failed |

use crate::domain::errors::ConfigError;
use crate::domain::mode::VerificationPolicy;
use serde::{Deserialize, Serialize};
use shared_crypto::Ed25519PublicKey;

/// Production root public key. The matching private key never leaves the
/// backend's top-level signer.
pub const DEFAULT_ROOT_PUBLIC_KEY: [u8; 32] = [
    0x17, 0xCF, 0x5C, 0xD1, 0x1F, 0x07, 0xDA, 0xEE, 0x36, 0x25, 0x4B, 0x66, 0x37, 0xF8, 0xDD, 0x6B,
    0xBF, 0x36, 0x4F, 0xCF, 0x09, 0xC8, 0xE0, 0x81, 0xBF, 0x97, 0xD1, 0xDF, 0x09, 0x71, 0xB3, 0xE7,
];

pub const ENV_VERIFICATION_MODE: &str = "PC_VERIFICATION_MODE";
pub const ENV_ROOT_PUBLIC_KEY: &str = "PC_ROOT_PUBLIC_KEY";
pub const ENV_FORCE_SIGNING_ERRORS: &str = "PC_FORCE_SIGNING_ERRORS";

/// Construction-time settings for the verification engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Which verification mode to run
    pub mode: VerificationPolicy,
    /// Base64 root key override (staging backends, tests)
    pub root_public_key: Option<String>,
    /// Debug toggle: every enabled verification reports `FAILED`
    pub force_signing_errors: bool,
}

impl SigningConfig {
    pub fn new(mode: VerificationPolicy) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(ENV_VERIFICATION_MODE) {
            Some(value) => value.parse()?,
            None => VerificationPolicy::default(),
        };

        let force_signing_errors = match lookup(ENV_FORCE_SIGNING_ERRORS) {
            Some(value) => parse_flag(ENV_FORCE_SIGNING_ERRORS, &value)?,
            None => false,
        };

        let config = Self {
            mode,
            root_public_key: lookup(ENV_ROOT_PUBLIC_KEY).filter(|v| !v.trim().is_empty()),
            force_signing_errors,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set the mode
    pub fn with_mode(mut self, mode: VerificationPolicy) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style method to override the root key
    pub fn with_root_public_key(mut self, key: impl Into<String>) -> Self {
        self.root_public_key = Some(key.into());
        self
    }

    /// Builder-style method to force signing errors
    pub fn with_force_signing_errors(mut self, force: bool) -> Self {
        self.force_signing_errors = force;
        self
    }

    /// Fail fast on an unusable root key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.root_public_key().map(|_| ())
    }

    /// The root key to trust: the override if set, otherwise the compiled-in key.
    pub fn root_public_key(&self) -> Result<Ed25519PublicKey, ConfigError> {
        let key = match &self.root_public_key {
            Some(encoded) => Ed25519PublicKey::from_base64(encoded)?,
            None => Ed25519PublicKey::from_bytes(DEFAULT_ROOT_PUBLIC_KEY)?,
        };
        Ok(key)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
        }),
    }
}
