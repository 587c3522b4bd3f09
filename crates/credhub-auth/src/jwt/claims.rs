//! Claims payload embedded in every access credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use credhub_entity::credential::Scope;

/// JWT claims payload of an access credential.
///
/// Access credentials are self-contained: validity is computed from these
/// fields plus the clock, never from a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Family identifier binding this credential to the stored credential
    /// it was issued alongside.
    pub fam: Uuid,
    /// Scope granted at issuance.
    pub scope: Scope,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the subject (user ID).
    pub fn subject(&self) -> Uuid {
        self.sub
    }

    /// Returns the family identifier.
    pub fn family(&self) -> Uuid {
        self.fam
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this credential has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
