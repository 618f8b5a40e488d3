//! Enumerations shared by requests and responses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Two-factor and lock-on-request policy of an application or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TwoFactorPolicy {
    /// Always required.
    Mandatory,
    /// Chosen by the user.
    OptIn,
    /// Never required.
    Disabled,
}

impl TwoFactorPolicy {
    /// Wire value of the policy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mandatory => "MANDATORY",
            Self::OptIn => "OPT_IN",
            Self::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for TwoFactorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TwoFactorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "MANDATORY" => Ok(Self::Mandatory),
            "OPT_IN" => Ok(Self::OptIn),
            "DISABLED" => Ok(Self::Disabled),
            _ => Err(format!("unknown policy: {s}")),
        }
    }
}

/// Latch state of an account or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatchStatus {
    /// Open: the protected action is allowed.
    On,
    /// Closed: the protected action must be refused.
    Off,
}

impl LatchStatus {
    /// Wire value of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for LatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
