//! Registration-gated session upgrade.
//!
//! Completing registration consumes the single-use registration
//! credential, records the profile, and replaces the provisional session
//! with a full one under a fresh family.

use std::sync::Arc;

use tracing::{info, warn};

use credhub_core::error::AppError;
use credhub_core::result::AppResult;
use credhub_entity::credential::CredentialKind;
use credhub_entity::user::ProfileDetails;

use crate::directory::{Identity, UserDirectory};
use crate::jwt::TokenDecoder;
use crate::store::CredentialStore;

use super::issuer::{IssuedSession, SessionIssuer};
use super::protocol::binding_holds;

/// Completes registration for provisional sessions.
#[derive(Clone)]
pub struct RegistrationProtocol {
    /// Access credential decoder.
    decoder: Arc<TokenDecoder>,
    /// Persisted credential store.
    store: Arc<dyn CredentialStore>,
    /// Issuer for the upgraded session.
    issuer: Arc<SessionIssuer>,
    /// User directory collaborator.
    directory: Arc<dyn UserDirectory>,
}

impl RegistrationProtocol {
    /// Creates a new registration protocol.
    pub fn new(
        decoder: Arc<TokenDecoder>,
        store: Arc<dyn CredentialStore>,
        issuer: Arc<SessionIssuer>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            decoder,
            store,
            issuer,
            directory,
        }
    }

    /// Completes registration with a provisional access credential and
    /// its bound registration credential.
    ///
    /// Unlike rotation, expiry of the access credential is enforced here:
    /// the registration window bounds both credentials, and an expired
    /// window means logging in again for a fresh provisional session.
    pub async fn complete(
        &self,
        access_token: &str,
        registration_token: &str,
        details: &ProfileDetails,
    ) -> AppResult<IssuedSession> {
        let claims = self.decoder.verify(access_token, true)?;

        let record = self
            .store
            .find_active(registration_token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown registration credential"))?;

        if record.kind != CredentialKind::Registration {
            return Err(AppError::unauthorized("Credential cannot complete registration"));
        }

        if !binding_holds(claims.fam, record.family) {
            warn!(
                subject = %record.subject,
                presented_family = %claims.fam,
                stored_family = %record.family,
                "Family binding violation during registration, revoking family"
            );
            self.store.revoke_family(record.family).await?;
            return Err(AppError::unauthorized("Credential binding violation"));
        }

        if !self.store.consume(registration_token).await? {
            return Err(AppError::unauthorized("Registration credential already used"));
        }

        self.directory
            .mark_profile_complete(record.subject, details)
            .await?;

        info!(subject = %record.subject, "Registration completed");

        // A fresh family: the provisional session ends here.
        self.issuer
            .issue(&Identity {
                subject: record.subject,
                profile_complete: true,
            })
            .await
    }
}
