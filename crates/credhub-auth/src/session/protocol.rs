//! The rotation state machine.
//!
//! A family moves Active → Rotated on every successful rotation and
//! reaches the terminal Revoked state through logout or the
//! binding-violation hardening below. Exactly one of any number of
//! concurrent rotations presenting the same renewal credential succeeds;
//! the rest observe the record already consumed.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use credhub_core::error::AppError;
use credhub_core::result::AppResult;
use credhub_entity::credential::CredentialKind;

use crate::jwt::TokenDecoder;
use crate::store::CredentialStore;

use super::issuer::{IssuedSession, SessionIssuer};

/// The binding invariant: an access credential and a stored credential
/// belong together only when their family identifiers agree.
pub fn binding_holds(access_family: Uuid, stored_family: Uuid) -> bool {
    access_family == stored_family
}

/// Exchanges a bound access/renewal pair for a fresh one.
#[derive(Clone)]
pub struct RenewalProtocol {
    /// Access credential decoder.
    decoder: Arc<TokenDecoder>,
    /// Persisted credential store.
    store: Arc<dyn CredentialStore>,
    /// Issuer for the replacement pair.
    issuer: Arc<SessionIssuer>,
}

impl RenewalProtocol {
    /// Creates a new renewal protocol.
    pub fn new(
        decoder: Arc<TokenDecoder>,
        store: Arc<dyn CredentialStore>,
        issuer: Arc<SessionIssuer>,
    ) -> Self {
        Self {
            decoder,
            store,
            issuer,
        }
    }

    /// Rotates the presented pair.
    ///
    /// The access credential may be expired (that is the point of
    /// renewal) or still valid (early renewal). It must decode and its
    /// family must match the renewal record. A family mismatch is
    /// treated as evidence of credential replay across sessions: the
    /// renewal record's whole family is revoked before the request is
    /// rejected.
    pub async fn rotate(
        &self,
        access_token: &str,
        renewal_token: &str,
    ) -> AppResult<IssuedSession> {
        let claims = self.decoder.verify(access_token, false)?;

        let record = self
            .store
            .find_active(renewal_token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown renewal credential"))?;

        if record.kind != CredentialKind::Renewal {
            return Err(AppError::unauthorized("Credential cannot be rotated"));
        }

        if !binding_holds(claims.fam, record.family) {
            warn!(
                subject = %record.subject,
                presented_family = %claims.fam,
                stored_family = %record.family,
                "Family binding violation during rotation, revoking family"
            );
            self.store.revoke_family(record.family).await?;
            return Err(AppError::unauthorized("Credential binding violation"));
        }

        if !self.store.consume(renewal_token).await? {
            return Err(AppError::unauthorized("Renewal credential already used"));
        }

        // Same family across generations keeps the mismatch hardening
        // meaningful against the original session.
        self.issuer.issue_full(record.subject, record.family).await
    }
}
