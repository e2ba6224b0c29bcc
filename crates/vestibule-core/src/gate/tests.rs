//! Gate engine tests: verification, TTL expiry, digest rebinding, and
//! fail-closed behavior under storage and hashing failures.

use std::sync::Arc;

use proptest::prelude::*;

use super::{Gate, GateError, GateStatus};
use crate::clock::ManualClock;
use crate::config::GateConfig;
use crate::digest::DigesterChain;
use crate::record::VerificationRecord;
use crate::role::Role;
use crate::store::{MemoryStore, RecordStore, StoreError};

/// SHA-256("951951").
const DIGEST: &str = "b5a184e01536e38d6ebad96cf6059546ac4b5000ed4df493665cb58c8974b645";

/// SHA-256("otherpassword") computed with the digester under test, so the
/// admin role gets a distinct, valid digest.
const OTHER_DIGEST: &str = "a493045d35286289acf9c36202f08f61678967607a99eb749744980ad8fc422e";

const TTL_MS: i64 = 24 * 60 * 60 * 1000;

fn protected_config() -> GateConfig {
    let mut config = GateConfig::default();
    config.gate.password = Some(DIGEST.to_string());
    config
}

fn gate_at(config: GateConfig, store: Arc<dyn RecordStore>, now_ms: i64) -> Gate {
    Gate::new(config, store).with_clock(Arc::new(ManualClock::new(now_ms)))
}

/// Store double that fails on demand.
struct FailingStore {
    fail_get: bool,
    fail_put: bool,
    inner: MemoryStore,
}

impl FailingStore {
    fn new(fail_get: bool, fail_put: bool) -> Self {
        Self {
            fail_get,
            fail_put,
            inner: MemoryStore::new(),
        }
    }
}

impl RecordStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_get {
            return Err(StoreError::Io(std::io::Error::other("injected get failure")));
        }
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_put {
            return Err(StoreError::Io(std::io::Error::other("injected put failure")));
        }
        self.inner.put(key, value)
    }
}

#[test]
fn verify_success_persists_record() {
    let store = Arc::new(MemoryStore::new());
    let gate = gate_at(protected_config(), store.clone(), 1_000);

    assert!(gate.verify("951951", Role::Password));
    assert!(gate.is_verified(Role::Password));

    let raw = store.get(Role::Password.storage_key()).unwrap().unwrap();
    let record = VerificationRecord::from_json(&raw).unwrap();
    assert!(record.verified);
    assert_eq!(record.timestamp, 1_000);
    assert_eq!(record.digest, DIGEST);
}

#[test]
fn wrong_secret_denies_and_leaves_record_unchanged() {
    let store = Arc::new(MemoryStore::new());
    let gate = gate_at(protected_config(), store.clone(), 1_000);

    assert!(gate.verify("951951", Role::Password));
    let before = store.get(Role::Password.storage_key()).unwrap();

    assert!(!gate.verify("wrong", Role::Password));
    let after = store.get(Role::Password.storage_key()).unwrap();

    assert_eq!(before, after);
    assert!(gate.is_verified(Role::Password));
}

#[test]
fn candidate_comparison_is_case_sensitive() {
    let gate = gate_at(protected_config(), Arc::new(MemoryStore::new()), 0);
    // Digest of a different string never matches, whatever the case of the
    // configured digest.
    assert!(!gate.verify("951952", Role::Password));
    assert!(!gate.verify("", Role::Password));
}

#[test]
fn verification_expires_at_ttl() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(0));
    let gate = Gate::new(protected_config(), store).with_clock(clock.clone());

    assert!(gate.verify("951951", Role::Password));

    clock.set(TTL_MS - 1);
    assert!(gate.is_verified(Role::Password));

    // Exactly TTL old: stale.
    clock.set(TTL_MS);
    assert!(!gate.is_verified(Role::Password));
}

#[test]
fn record_from_25_hours_ago_is_stale() {
    let store = Arc::new(MemoryStore::new());
    let now = 100 * TTL_MS;
    let record = VerificationRecord::new(now - 25 * 60 * 60 * 1000, DIGEST);
    store
        .put(Role::Password.storage_key(), &record.to_json().unwrap())
        .unwrap();

    let gate = gate_at(protected_config(), store, now);
    assert!(!gate.is_verified(Role::Password));
}

#[test]
fn digest_change_invalidates_stored_record() {
    let store = Arc::new(MemoryStore::new());
    let gate = gate_at(protected_config(), store.clone(), 0);
    assert!(gate.verify("951951", Role::Password));

    // Same store, new configuration with a different digest. The old record
    // is well inside its TTL but bound to the old digest.
    let mut changed = GateConfig::default();
    changed.gate.password = Some(OTHER_DIGEST.to_string());
    let rekeyed = gate_at(changed, store, 1);

    assert!(!rekeyed.is_verified(Role::Password));
}

#[test]
fn unprotected_gate_reports_verified_but_never_matches() {
    let gate = gate_at(GateConfig::default(), Arc::new(MemoryStore::new()), 0);

    assert!(!gate.is_protected());
    // Nothing to verify: checks pass trivially.
    assert!(gate.is_verified(Role::Password));
    assert!(gate.is_verified(Role::AdminPassword));
    // But no candidate can match an absent digest.
    assert!(!gate.verify("951951", Role::Password));
}

#[test]
fn invalid_format_digest_is_not_protection() {
    let mut config = GateConfig::default();
    config.gate.password = Some("0".repeat(64));
    let gate = gate_at(config, Arc::new(MemoryStore::new()), 0);

    assert!(!gate.is_protected());
    assert!(gate.is_verified(Role::Password));
}

#[test]
fn roles_are_verified_independently() {
    let mut config = protected_config();
    config.gate.admin_password = Some(OTHER_DIGEST.to_string());
    let gate = gate_at(config, Arc::new(MemoryStore::new()), 0);

    assert!(gate.verify("951951", Role::Password));
    assert!(gate.is_verified(Role::Password));
    assert!(!gate.is_verified(Role::AdminPassword));

    assert!(gate.verify("otherpassword", Role::AdminPassword));
    assert!(gate.is_verified(Role::AdminPassword));
}

#[test]
fn configured_role_without_record_is_locked_while_other_protects() {
    // Only the admin digest is configured; the general role has nothing to
    // match and stays locked while the gate as a whole is protected.
    let mut config = GateConfig::default();
    config.gate.admin_password = Some(OTHER_DIGEST.to_string());
    let gate = gate_at(config, Arc::new(MemoryStore::new()), 0);

    assert!(gate.is_protected());
    assert!(!gate.is_verified(Role::Password));
}

#[test]
fn storage_read_failure_reads_as_locked() {
    let store = Arc::new(FailingStore::new(true, false));
    let gate = gate_at(protected_config(), store, 0);
    assert!(!gate.is_verified(Role::Password));
}

#[test]
fn storage_write_failure_denies_verification() {
    let store = Arc::new(FailingStore::new(false, true));
    let gate = gate_at(protected_config(), store, 0);
    assert!(!gate.verify("951951", Role::Password));
}

#[test]
fn corrupt_record_reads_as_locked() {
    let store = Arc::new(MemoryStore::new());
    store
        .put(Role::Password.storage_key(), "not a record")
        .unwrap();
    let gate = gate_at(protected_config(), store, 0);
    assert!(!gate.is_verified(Role::Password));
}

#[test]
fn exhausted_digester_chain_fails_closed() {
    let gate = gate_at(protected_config(), Arc::new(MemoryStore::new()), 0)
        .with_digesters(DigesterChain::new(vec![]));

    assert!(matches!(
        gate.compute_digest("951951"),
        Err(GateError::HashUnavailable)
    ));
    assert!(!gate.verify("951951", Role::Password));
}

#[test]
fn status_reflects_the_derived_state() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(5_000));
    let gate = Gate::new(protected_config(), store).with_clock(clock.clone());

    assert_eq!(gate.status(Role::AdminPassword), GateStatus::Unconfigured);
    assert_eq!(gate.status(Role::Password), GateStatus::Locked);

    assert!(gate.verify("951951", Role::Password));
    assert_eq!(
        gate.status(Role::Password),
        GateStatus::Unlocked {
            expires_at_ms: 5_000 + TTL_MS,
        }
    );

    clock.advance(TTL_MS);
    assert_eq!(gate.status(Role::Password), GateStatus::Locked);
}

proptest! {
    /// verify(S) succeeds exactly when the digest of S equals the
    /// configured digest.
    #[test]
    fn verify_iff_digest_matches(secret in ".{0,64}") {
        let gate = gate_at(protected_config(), Arc::new(MemoryStore::new()), 0);
        let digest = gate.compute_digest(&secret).unwrap();
        prop_assert_eq!(gate.verify(&secret, Role::Password), digest == DIGEST);
    }

    /// Digests are deterministic, lowercase hex, and digest-length.
    #[test]
    fn digests_are_canonical(secret in ".{0,64}") {
        let gate = gate_at(protected_config(), Arc::new(MemoryStore::new()), 0);
        let first = gate.compute_digest(&secret).unwrap();
        let second = gate.compute_digest(&secret).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }
}
