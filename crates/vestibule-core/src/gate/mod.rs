//! The verification gate engine.
//!
//! The gate decides three things: whether protection is configured at all,
//! whether a candidate secret matches a role's configured digest, and
//! whether a previously stored verification still holds.
//!
//! ```text
//! Locked --(successful verify)--> Unlocked --(TTL expiry or digest
//!                                             change)--> Locked
//! ```
//!
//! The unlocked state is never stored as such; it is derived on every check
//! from the stored [`VerificationRecord`], the currently configured digest,
//! and the clock. There is no terminal state.
//!
//! # Security Model
//!
//! - **Fail closed**: hashing failures deny the single attempt; storage
//!   read/write failures and corrupt records read as not-verified. Errors
//!   are logged, never surfaced as success.
//! - **Not a boundary**: the configured digest and this logic run on the
//!   client being gated. The gate keeps casual visitors out; it does not
//!   resist a user reading the configuration.
//! - **Digest rebinding**: records store the digest they matched, and a
//!   configuration change silently invalidates them within the TTL window.
//!
//! # Concurrency
//!
//! All operations are synchronous and run on the caller's thread. Callers
//! driving the gate from multiple tasks should serialize checks per role;
//! concurrent checks race only on which record write lands last.

mod error;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::GateConfig;
use crate::digest::DigesterChain;
use crate::record::VerificationRecord;
use crate::role::Role;
use crate::store::RecordStore;

pub use error::GateError;

/// Derived verification state for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// No valid digest configured for this role; the gate does not apply.
    Unconfigured,

    /// Verification required.
    Locked,

    /// A fresh record unlocks the role until `expires_at_ms`.
    Unlocked {
        /// Epoch milliseconds at which the stored verification goes stale.
        expires_at_ms: i64,
    },
}

/// The verification gate.
///
/// Holds the immutable configuration, the record store, the clock, and the
/// digester chain. All checks go through this type.
pub struct Gate {
    config: GateConfig,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    digesters: DigesterChain,
}

impl Gate {
    /// Build a gate over `config` and `store`, with the system clock and
    /// the default digester chain.
    #[must_use]
    pub fn new(config: GateConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config,
            store,
            clock: Arc::new(SystemClock),
            digesters: DigesterChain::default(),
        }
    }

    /// Replace the clock (tests and embedders with their own time source).
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the digester chain.
    #[must_use]
    pub fn with_digesters(mut self, digesters: DigesterChain) -> Self {
        self.digesters = digesters;
        self
    }

    /// The gate's configuration.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether at least one role has a valid-format digest configured.
    /// No side effects.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.config.is_protected()
    }

    /// Hash a candidate secret to its lowercase hex digest.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::HashUnavailable`] when no digester is reachable.
    pub fn compute_digest(&self, secret: &str) -> Result<String, GateError> {
        self.digesters
            .digest_hex(secret.as_bytes())
            .map_err(Into::into)
    }

    /// Verify a candidate secret for `role`.
    ///
    /// On a match, a verification record stamped with the current time and
    /// the matched digest is written under the role's storage key. Hashing
    /// or storage failures deny the attempt (logged, fail closed); the
    /// caller may retry.
    pub fn verify(&self, secret: &str, role: Role) -> bool {
        match self.try_verify(secret, role) {
            Ok(matched) => matched,
            Err(error) => {
                warn!(%role, %error, "verification attempt failed; denying");
                false
            },
        }
    }

    fn try_verify(&self, secret: &str, role: Role) -> Result<bool, GateError> {
        let Some(configured) = self.config.digest_for(role) else {
            return Ok(false);
        };

        let candidate = self.compute_digest(secret)?;
        let matched = candidate.len() == configured.len()
            && bool::from(candidate.as_bytes().ct_eq(configured.as_bytes()));

        if matched {
            let record = VerificationRecord::new(self.clock.now_ms(), configured);
            self.store.put(role.storage_key(), &record.to_json()?)?;
            debug!(%role, "verification succeeded; record persisted");
        }
        Ok(matched)
    }

    /// Whether `role` currently counts as verified.
    ///
    /// Trivially true when the gate is not protected at all. Otherwise the
    /// stored record must exist, match the currently configured digest, and
    /// be younger than the TTL. Storage failures and corrupt records read
    /// as not-verified.
    #[must_use]
    pub fn is_verified(&self, role: Role) -> bool {
        if !self.is_protected() {
            return true;
        }
        match self.stored_record(role) {
            Ok(Some(record)) => self.record_unlocks(&record, role),
            Ok(None) => false,
            Err(error) => {
                warn!(%role, %error, "failed to read verification record; treating as locked");
                false
            },
        }
    }

    /// Derived status for `role`, for diagnostics and status displays.
    #[must_use]
    pub fn status(&self, role: Role) -> GateStatus {
        if self.config.digest_for(role).is_none() {
            return GateStatus::Unconfigured;
        }
        match self.stored_record(role) {
            Ok(Some(record)) if self.record_unlocks(&record, role) => GateStatus::Unlocked {
                expires_at_ms: record.timestamp + self.config.verification_ttl_ms(),
            },
            Ok(_) => GateStatus::Locked,
            Err(error) => {
                warn!(%role, %error, "failed to read verification record; treating as locked");
                GateStatus::Locked
            },
        }
    }

    fn record_unlocks(&self, record: &VerificationRecord, role: Role) -> bool {
        let Some(configured) = self.config.digest_for(role) else {
            return false;
        };
        record.matches_digest(configured)
            && record.is_fresh(self.clock.now_ms(), self.config.verification_ttl_ms())
    }

    fn stored_record(&self, role: Role) -> Result<Option<VerificationRecord>, GateError> {
        let Some(raw) = self.store.get(role.storage_key())? else {
            return Ok(None);
        };
        Ok(Some(VerificationRecord::from_json(&raw)?))
    }
}
