//! vestibule: a client-side verification gate.
//!
//! Hashes a candidate secret, compares it to a configured digest, and caches
//! the successful result in client-local storage for a TTL window (24 hours
//! by default). Gated surfaces stay hidden until verification succeeds.
//!
//! The gate is cosmetic by design. The digest and the verification logic
//! ship to the client being gated, so this keeps casual visitors out of a
//! page or a settings panel; it is not a security boundary and must not be
//! used as one.
//!
//! # Architecture
//!
//! - [`config`]: per-role digests and TTL, loaded once and read-only after.
//! - [`digest`]: SHA-256 hashing behind a fallback chain of [`Digester`]s.
//! - [`record`]: the stored proof of verification, re-validated on read.
//! - [`store`]: the client-local key-value persistence seam.
//! - [`gate`]: the engine tying those together, fail-closed throughout.
//! - [`present`] / [`flow`]: the capability seam to a UI and the lifecycle
//!   wiring over it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vestibule_core::{Gate, GateConfig, MemoryStore, Role};
//!
//! let mut config = GateConfig::default();
//! config.gate.password =
//!     Some("b5a184e01536e38d6ebad96cf6059546ac4b5000ed4df493665cb58c8974b645".into());
//!
//! let gate = Gate::new(config, Arc::new(MemoryStore::new()));
//! assert!(gate.is_protected());
//! assert!(!gate.is_verified(Role::Password));
//! assert!(gate.verify("951951", Role::Password));
//! assert!(gate.is_verified(Role::Password));
//! ```

pub mod clock;
pub mod config;
pub mod digest;
pub mod flow;
pub mod gate;
pub mod present;
pub mod record;
pub mod redact;
pub mod role;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, GateConfig, GateSection, StorageSection};
pub use digest::{DigestError, Digester, DigesterChain, Sha256Digester, is_valid_digest};
pub use flow::GateFlow;
pub use gate::{Gate, GateError, GateStatus};
pub use present::{GatePresenter, NullPresenter, NullSink, VerifiedSink};
pub use record::{RecordError, VerificationRecord};
pub use role::Role;
pub use store::{FileStore, MemoryStore, RecordStore, StoreError};
