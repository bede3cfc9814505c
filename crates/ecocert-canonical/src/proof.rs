//! Fixed-width proof digests attached to certifications.

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::validation::ValidationError;

/// Required proof digest width in bytes.
pub const PROOF_HASH_LEN: usize = 32;

/// 32-byte content digest of the audit evidence behind a certification.
///
/// Serializes as base64url without padding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProofHash([u8; PROOF_HASH_LEN]);

impl ProofHash {
    /// Wraps an already fixed-width digest.
    pub fn from_bytes(bytes: [u8; PROOF_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Accepts a byte slice only if it is exactly [`PROOF_HASH_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let fixed: [u8; PROOF_HASH_LEN] =
            bytes.try_into().map_err(|_| ValidationError::InvalidLength {
                field: "proof_hash",
                expected: PROOF_HASH_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(fixed))
    }

    /// SHA-256 of an evidence document.
    pub fn of(content: &[u8]) -> Self {
        Self(Sha256::digest(content).into())
    }

    /// Decodes a base64url (no padding) string.
    pub fn from_b64(value: &str) -> Result<Self, ValidationError> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|_| ValidationError::PatternMismatch {
                field: "proof_hash",
                value: value.to_string(),
            })?;
        Self::from_slice(&bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; PROOF_HASH_LEN] {
        &self.0
    }

    /// Base64url (no padding) encoding.
    pub fn to_b64(&self) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(self.0)
    }
}

impl fmt::Debug for ProofHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProofHash({})", self.to_b64())
    }
}

impl Serialize for ProofHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_b64())
    }
}

impl<'de> Deserialize<'de> for ProofHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_b64(&encoded).map_err(serde::de::Error::custom)
    }
}
