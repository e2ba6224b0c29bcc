//! Gate error types.

use thiserror::Error;

use crate::digest::DigestError;
use crate::record::RecordError;
use crate::store::StoreError;

/// Errors from gate operations.
///
/// These never escape the boolean gate checks: [`crate::gate::Gate::verify`]
/// and [`crate::gate::Gate::is_verified`] log the error and fail closed.
/// Only [`crate::gate::Gate::compute_digest`] surfaces them to callers.
#[derive(Debug, Error)]
pub enum GateError {
    /// No digest implementation is reachable; fatal to the current attempt
    /// only. The user may retry.
    #[error("no digest implementation available")]
    HashUnavailable,

    /// The record store failed; treated as not-verified by gate checks.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A stored record could not be decoded; treated as not-verified.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl From<DigestError> for GateError {
    fn from(error: DigestError) -> Self {
        match error {
            DigestError::Unavailable => Self::HashUnavailable,
        }
    }
}
