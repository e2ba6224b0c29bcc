//! Verification roles: the contexts a gate check runs under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A verification context.
///
/// The general role gates the page as a whole; the admin role gates the
/// settings surface. Each role has its own configured digest and its own
/// stored verification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// General page access.
    #[serde(rename = "PASSWORD")]
    Password,

    /// Administrative access (settings surface).
    #[serde(rename = "ADMINPASSWORD")]
    AdminPassword,
}

impl Role {
    /// All roles, in configuration order.
    pub const ALL: [Self; 2] = [Self::Password, Self::AdminPassword];

    /// Configuration key name for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "PASSWORD",
            Self::AdminPassword => "ADMINPASSWORD",
        }
    }

    /// Storage key under which this role's verification record lives.
    ///
    /// The keys are fixed constants so records written before a restart (or
    /// by an earlier release) remain readable.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Password => "userPasswordVerified",
            Self::AdminPassword => "adminPasswordVerified",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name does not parse.
#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASSWORD" => Ok(Self::Password),
            "ADMINPASSWORD" => Ok(Self::AdminPassword),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}
