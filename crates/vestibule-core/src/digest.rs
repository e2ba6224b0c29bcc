//! Digest computation for gate verification.
//!
//! Candidate secrets are hashed with SHA-256 and rendered as lowercase hex.
//! Implementations sit behind the [`Digester`] trait so the engine can fall
//! back across them in order and fail closed when none is reachable.

use thiserror::Error;

/// Length in hex characters of a configured digest (SHA-256).
pub const DIGEST_HEX_LEN: usize = 64;

/// Errors from digest computation.
#[derive(Debug, Error)]
pub enum DigestError {
    /// No digester in the chain is reachable in this environment.
    #[error("no digest implementation available")]
    Unavailable,
}

/// A one-way hash implementation.
pub trait Digester: Send + Sync {
    /// Whether this digester can run in the current environment.
    fn is_available(&self) -> bool;

    /// Hash `input` and render the digest as lowercase hex.
    fn digest_hex(&self, input: &[u8]) -> String;
}

/// SHA-256 digester over the `sha2` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn is_available(&self) -> bool {
        true
    }

    fn digest_hex(&self, input: &[u8]) -> String {
        use sha2::{Digest, Sha256};

        hex::encode(&Sha256::digest(input))
    }
}

/// Ordered fallback chain of digesters.
///
/// The first available implementation wins. An empty chain, or one where no
/// implementation is reachable, fails with [`DigestError::Unavailable`]; the
/// caller treats that as a failed verification attempt.
pub struct DigesterChain {
    digesters: Vec<Box<dyn Digester>>,
}

impl DigesterChain {
    /// Build a chain from an ordered list of digesters.
    #[must_use]
    pub fn new(digesters: Vec<Box<dyn Digester>>) -> Self {
        Self { digesters }
    }

    /// Hash `input` with the first available digester.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Unavailable`] when no digester is reachable.
    pub fn digest_hex(&self, input: &[u8]) -> Result<String, DigestError> {
        for digester in &self.digesters {
            if digester.is_available() {
                return Ok(digester.digest_hex(input));
            }
        }
        Err(DigestError::Unavailable)
    }
}

impl Default for DigesterChain {
    fn default() -> Self {
        Self::new(vec![Box::new(Sha256Digester)])
    }
}

/// Whether `value` has the shape of a configured digest: exactly 64 hex
/// characters and not all zero.
///
/// An all-zero digest is a placeholder left in a configuration template, not
/// a real secret, and does not count as protection.
#[must_use]
pub fn is_valid_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value.bytes().all(|b| b.is_ascii_hexdigit())
        && !value.bytes().all(|b| b == b'0')
}

/// Utility module for hex encoding digests.
mod hex {
    use std::fmt::Write;

    /// Encodes bytes as a lowercase hex string.
    pub fn encode(bytes: &[u8]) -> String {
        bytes
            .iter()
            .fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
                let _ = write!(acc, "{b:02x}");
                acc
            })
    }
}
