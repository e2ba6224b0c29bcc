//! Gate configuration: per-role digests, storage location, TTL.
//!
//! Configuration is loaded once at startup and is immutable afterwards; the
//! gate only ever reads it. Digests may come from a TOML file, from the
//! environment, or both (the environment wins, mirroring an injected
//! configuration object).
//!
//! A digest that is present but not valid in format is diagnosed and the
//! role is treated as unconfigured. Absence of any valid digest disables the
//! gate entirely; that is an explicit policy, not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::digest::is_valid_digest;
use crate::redact::digest_preview;
use crate::role::Role;

/// Environment variable prefix for digest overrides
/// (`VESTIBULE_PASSWORD`, `VESTIBULE_ADMINPASSWORD`).
pub const ENV_PREFIX: &str = "VESTIBULE_";

/// Top-level gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Gate settings.
    #[serde(default)]
    pub gate: GateSection,

    /// Storage settings.
    #[serde(default)]
    pub storage: StorageSection,
}

/// The `[gate]` section: digests and TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSection {
    /// SHA-256 digest of the general password, 64 lowercase hex characters.
    #[serde(default)]
    pub password: Option<String>,

    /// SHA-256 digest of the administrative password.
    #[serde(default)]
    pub admin_password: Option<String>,

    /// How long a successful verification stays trusted, in hours.
    #[serde(default = "default_verification_ttl_hours")]
    pub verification_ttl_hours: u32,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            password: None,
            admin_password: None,
            verification_ttl_hours: default_verification_ttl_hours(),
        }
    }
}

const fn default_verification_ttl_hours() -> u32 {
    24
}

/// The `[storage]` section: where verification records live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    /// Path of the records file. A relative path is resolved against the
    /// directory containing the configuration file.
    #[serde(default = "default_records_file")]
    pub records_file: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            records_file: default_records_file(),
        }
    }
}

fn default_records_file() -> PathBuf {
    PathBuf::from("vestibule-records.json")
}

impl StorageSection {
    /// Resolve the records file against the directory containing the
    /// configuration file when the configured path is relative.
    #[must_use]
    pub fn resolve_records_file(&self, config_path: &Path) -> PathBuf {
        if self.records_file.is_absolute() {
            return self.records_file.clone();
        }
        config_path.parent().map_or_else(
            || self.records_file.clone(),
            |dir| dir.join(&self.records_file),
        )
    }
}

impl GateConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Overlay digests from the process environment.
    ///
    /// `VESTIBULE_PASSWORD` and `VESTIBULE_ADMINPASSWORD` override the file
    /// values when set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Overlay digests from an arbitrary environment lookup (testable form
    /// of [`Self::apply_env`]).
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for role in Role::ALL {
            let name = format!("{ENV_PREFIX}{}", role.as_str());
            if let Some(value) = lookup(&name) {
                if !value.is_empty() {
                    self.set_raw_digest(role, Some(value));
                }
            }
        }
    }

    /// The raw configured digest for `role`, valid or not.
    #[must_use]
    pub fn raw_digest(&self, role: Role) -> Option<&str> {
        match role {
            Role::Password => self.gate.password.as_deref(),
            Role::AdminPassword => self.gate.admin_password.as_deref(),
        }
    }

    fn set_raw_digest(&mut self, role: Role, value: Option<String>) {
        match role {
            Role::Password => self.gate.password = value,
            Role::AdminPassword => self.gate.admin_password = value,
        }
    }

    /// The configured digest for `role`, only when valid in format.
    ///
    /// A present-but-invalid digest does not count as configuration; the
    /// role is bypassed. Use [`Self::report_invalid_digests`] at startup to
    /// surface such values.
    #[must_use]
    pub fn digest_for(&self, role: Role) -> Option<&str> {
        self.raw_digest(role).filter(|d| is_valid_digest(d))
    }

    /// Whether at least one role has a valid-format digest configured.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        Role::ALL.iter().any(|role| self.digest_for(*role).is_some())
    }

    /// The verification TTL in milliseconds.
    #[must_use]
    pub fn verification_ttl_ms(&self) -> i64 {
        i64::from(self.gate.verification_ttl_hours) * 60 * 60 * 1000
    }

    /// Emit diagnostics for digests that are present but invalid in format.
    /// Such roles are treated as unconfigured.
    pub fn report_invalid_digests(&self) {
        for role in Role::ALL {
            if let Some(raw) = self.raw_digest(role) {
                if !is_valid_digest(raw) {
                    warn!(
                        %role,
                        digest = %digest_preview(raw),
                        "configured digest is not 64 hex characters; role treated as unconfigured"
                    );
                }
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
