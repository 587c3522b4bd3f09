//! Stored credential entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::CredentialKind;

/// A persisted renewal or registration credential record.
///
/// The token value is opaque and random; validity is a function of the
/// `revoked` flag (monotonic false→true) and `expires_at`. Expired rows
/// are invisible to lookups but stay in the table for audit until the
/// maintenance purge removes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredCredential {
    /// Opaque token value. Unique across all records.
    pub token: String,
    /// Owning subject (user id).
    pub subject: Uuid,
    /// Family identifier binding this record to the access credential it
    /// was issued alongside, carried unchanged across rotations.
    pub family: Uuid,
    /// Which credential kind this record represents.
    pub kind: CredentialKind,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Whether the credential has been revoked or consumed.
    pub revoked: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl StoredCredential {
    /// Whether the record is currently active (unrevoked and unexpired).
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}
