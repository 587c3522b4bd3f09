//! Stored credential kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distinguishes the two persisted credential kinds.
///
/// Access credentials are never persisted and therefore have no kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "credential_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// Longer-lived credential exchanged for a fresh access credential.
    Renewal,
    /// Single-use credential consumed when registration completes.
    Registration,
}

impl CredentialKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Renewal => "renewal",
            Self::Registration => "registration",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CredentialKind {
    type Err = credhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "renewal" => Ok(Self::Renewal),
            "registration" => Ok(Self::Registration),
            _ => Err(credhub_core::AppError::validation(format!(
                "Invalid credential kind: '{s}'. Expected one of: renewal, registration"
            ))),
        }
    }
}
