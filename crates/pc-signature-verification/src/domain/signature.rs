//! # Binary Signature Codec
//!
//! The backend sends one base64 header that decodes to exactly 180 bytes:
//!
//! ```text
//! offset  len  field
//! 0       32   intermediate_key              Ed25519 public key
//! 32      4    intermediate_key_expiration   u32 big-endian, Unix seconds
//! 36      64   intermediate_key_signature    root sig over key || expiration
//! 100     16   salt                          per-response random salt
//! 116     64   payload                       intermediate sig over the message
//! ```
//!
//! The layout is an interop contract with the backend signer.

use super::errors::VerificationError;
use base64::Engine as _;

/// Total decoded size of a signature header.
pub const SIGNATURE_SIZE: usize = 180;

pub const INTERMEDIATE_KEY_SIZE: usize = 32;
pub const INTERMEDIATE_KEY_EXPIRATION_SIZE: usize = 4;
pub const INTERMEDIATE_KEY_SIGNATURE_SIZE: usize = 64;
pub const SALT_SIZE: usize = 16;
pub const PAYLOAD_SIZE: usize = 64;

const EXPIRATION_OFFSET: usize = INTERMEDIATE_KEY_SIZE;
const KEY_SIGNATURE_OFFSET: usize = EXPIRATION_OFFSET + INTERMEDIATE_KEY_EXPIRATION_SIZE;
const SALT_OFFSET: usize = KEY_SIGNATURE_OFFSET + INTERMEDIATE_KEY_SIGNATURE_SIZE;
const PAYLOAD_OFFSET: usize = SALT_OFFSET + SALT_SIZE;

/// A decoded response signature.
///
/// Equality and hashing cover all five fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub intermediate_key: [u8; INTERMEDIATE_KEY_SIZE],
    pub intermediate_key_expiration: [u8; INTERMEDIATE_KEY_EXPIRATION_SIZE],
    pub intermediate_key_signature: [u8; INTERMEDIATE_KEY_SIGNATURE_SIZE],
    pub salt: [u8; SALT_SIZE],
    pub payload: [u8; PAYLOAD_SIZE],
}

impl Signature {
    /// Decode a base64 signature header.
    ///
    /// # Errors
    /// * `InvalidBase64` - the header is not standard base64
    /// * `InvalidSignatureSize` - the decoded length is not 180 bytes
    pub fn parse(encoded: &str) -> Result<Self, VerificationError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| VerificationError::InvalidBase64(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Split a raw 180-byte buffer into its fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VerificationError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(VerificationError::InvalidSignatureSize {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }

        let mut signature = Self {
            intermediate_key: [0u8; INTERMEDIATE_KEY_SIZE],
            intermediate_key_expiration: [0u8; INTERMEDIATE_KEY_EXPIRATION_SIZE],
            intermediate_key_signature: [0u8; INTERMEDIATE_KEY_SIGNATURE_SIZE],
            salt: [0u8; SALT_SIZE],
            payload: [0u8; PAYLOAD_SIZE],
        };
        signature
            .intermediate_key
            .copy_from_slice(&bytes[..EXPIRATION_OFFSET]);
        signature
            .intermediate_key_expiration
            .copy_from_slice(&bytes[EXPIRATION_OFFSET..KEY_SIGNATURE_OFFSET]);
        signature
            .intermediate_key_signature
            .copy_from_slice(&bytes[KEY_SIGNATURE_OFFSET..SALT_OFFSET]);
        signature
            .salt
            .copy_from_slice(&bytes[SALT_OFFSET..PAYLOAD_OFFSET]);
        signature.payload.copy_from_slice(&bytes[PAYLOAD_OFFSET..]);

        Ok(signature)
    }

    /// Concatenate the fields back into the wire layout.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..EXPIRATION_OFFSET].copy_from_slice(&self.intermediate_key);
        bytes[EXPIRATION_OFFSET..KEY_SIGNATURE_OFFSET]
            .copy_from_slice(&self.intermediate_key_expiration);
        bytes[KEY_SIGNATURE_OFFSET..SALT_OFFSET].copy_from_slice(&self.intermediate_key_signature);
        bytes[SALT_OFFSET..PAYLOAD_OFFSET].copy_from_slice(&self.salt);
        bytes[PAYLOAD_OFFSET..].copy_from_slice(&self.payload);
        bytes
    }

    /// Base64 encoding of [`Signature::to_bytes`].
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    /// Intermediate key expiration in Unix seconds.
    pub fn expiration_secs(&self) -> u64 {
        u64::from(u32::from_be_bytes(self.intermediate_key_expiration))
    }

    /// The bytes the root key signed: `intermediate_key || expiration`.
    pub fn intermediate_key_message(
        &self,
    ) -> [u8; INTERMEDIATE_KEY_SIZE + INTERMEDIATE_KEY_EXPIRATION_SIZE] {
        let mut message = [0u8; INTERMEDIATE_KEY_SIZE + INTERMEDIATE_KEY_EXPIRATION_SIZE];
        message[..INTERMEDIATE_KEY_SIZE].copy_from_slice(&self.intermediate_key);
        message[INTERMEDIATE_KEY_SIZE..].copy_from_slice(&self.intermediate_key_expiration);
        message
    }
}
