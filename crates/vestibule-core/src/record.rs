//! Verification records: the TTL-bounded proof that a role was verified.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// A stored verification result for a single role.
///
/// A record is written on successful verification and re-validated on every
/// read: freshness against the TTL, and the stored digest against the
/// currently configured digest. Changing the configured digest therefore
/// silently invalidates old records. Nothing ever deletes a record; stale
/// ones are simply ignored and overwritten by the next success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Whether verification succeeded. Only `true` records are written.
    pub verified: bool,

    /// Epoch milliseconds at which verification succeeded.
    pub timestamp: i64,

    /// The configured digest that was matched.
    ///
    /// Stored under the wire name `passwordHash` so records written by
    /// earlier releases remain readable.
    #[serde(rename = "passwordHash")]
    pub digest: String,
}

/// Errors decoding or encoding a stored record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The stored value is not a well-formed record.
    #[error("malformed verification record: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl VerificationRecord {
    /// Build a record stamped at `now_ms` for a matched digest.
    #[must_use]
    pub fn new(now_ms: i64, digest: impl Into<String>) -> Self {
        Self {
            verified: true,
            timestamp: now_ms,
            digest: digest.into(),
        }
    }

    /// Decode a record from its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] when the value does not parse;
    /// callers treat that as not-verified.
    pub fn from_json(raw: &str) -> Result<Self, RecordError> {
        serde_json::from_str(raw).map_err(Into::into)
    }

    /// Encode the record to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] when serialization fails.
    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Whether the record is still inside its TTL window at `now_ms`.
    ///
    /// Expiry is inclusive: a record exactly `ttl_ms` old is stale.
    #[must_use]
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.verified && now_ms.saturating_sub(self.timestamp) < ttl_ms
    }

    /// Whether the stored digest matches the currently configured one.
    ///
    /// Comparison is case-sensitive, constant-time over equal lengths.
    #[must_use]
    pub fn matches_digest(&self, configured: &str) -> bool {
        self.digest.len() == configured.len()
            && bool::from(self.digest.as_bytes().ct_eq(configured.as_bytes()))
    }
}
