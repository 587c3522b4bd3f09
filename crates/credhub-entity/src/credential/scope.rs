//! Access credential scope enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scope tag embedded in every access credential.
///
/// Scopes live only inside the signed token; they are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Issued after login while the profile is incomplete. Sufficient
    /// only for the registration endpoint.
    Provisional,
    /// Issued once registration has completed. Grants resource access.
    Full,
}

impl Scope {
    /// Whether a credential carrying this scope satisfies `required`.
    ///
    /// `Full` satisfies everything; `Provisional` satisfies only a
    /// provisional requirement.
    pub fn satisfies(&self, required: Scope) -> bool {
        match (self, required) {
            (Self::Full, _) => true,
            (Self::Provisional, Self::Provisional) => true,
            (Self::Provisional, Self::Full) => false,
        }
    }

    /// Return the scope as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisional => "provisional",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = credhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "provisional" => Ok(Self::Provisional),
            "full" => Ok(Self::Full),
            _ => Err(credhub_core::AppError::validation(format!(
                "Invalid scope: '{s}'. Expected one of: provisional, full"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_satisfies_both_requirements() {
        assert!(Scope::Full.satisfies(Scope::Full));
        assert!(Scope::Full.satisfies(Scope::Provisional));
    }

    #[test]
    fn provisional_never_satisfies_full() {
        assert!(Scope::Provisional.satisfies(Scope::Provisional));
        assert!(!Scope::Provisional.satisfies(Scope::Full));
    }
}
