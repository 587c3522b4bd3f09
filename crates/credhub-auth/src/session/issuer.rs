//! Bound credential pair issuance.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use credhub_core::config::auth::AuthConfig;
use credhub_core::result::AppResult;
use credhub_entity::credential::{CredentialKind, Scope, StoredCredential};

use crate::directory::Identity;
use crate::jwt::TokenEncoder;
use crate::store::{CredentialStore, generate_token};

/// The credentials handed to a client after login, registration, or
/// rotation.
///
/// A complete profile receives an access/renewal pair; an incomplete one
/// receives a provisional access credential plus a single-use
/// registration credential instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedSession {
    /// Scope of the access credential.
    pub scope: Scope,
    /// Signed access credential.
    pub access_token: String,
    /// Access credential expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Bound renewal credential (full sessions only).
    pub renewal_token: Option<String>,
    /// Renewal credential expiry.
    pub renewal_expires_at: Option<DateTime<Utc>>,
    /// Single-use registration credential (provisional sessions only).
    pub registration_token: Option<String>,
}

/// Issues bound credential pairs sharing one family identifier.
#[derive(Clone)]
pub struct SessionIssuer {
    /// Access credential encoder.
    encoder: Arc<TokenEncoder>,
    /// Persisted credential store.
    store: Arc<dyn CredentialStore>,
    /// Credential window configuration.
    config: AuthConfig,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionIssuer {
    /// Creates a new session issuer.
    pub fn new(
        encoder: Arc<TokenEncoder>,
        store: Arc<dyn CredentialStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            encoder,
            store,
            config,
        }
    }

    /// Issues a session for a verified identity under a fresh family.
    ///
    /// Profile completeness decides between a full pair and a provisional
    /// access + registration credential.
    pub async fn issue(&self, identity: &Identity) -> AppResult<IssuedSession> {
        let family = Uuid::new_v4();
        if identity.profile_complete {
            self.issue_full(identity.subject, family).await
        } else {
            self.issue_provisional(identity.subject, family).await
        }
    }

    /// Issues a full access/renewal pair under an existing family.
    ///
    /// Rotation calls this with the presented pair's family so the
    /// binding stays meaningful across generations.
    pub async fn issue_full(&self, subject: Uuid, family: Uuid) -> AppResult<IssuedSession> {
        let access = self.encoder.issue(
            subject,
            Scope::Full,
            family,
            Duration::seconds(self.config.access_ttl_seconds as i64),
        )?;

        let renewal_expires_at = Utc::now() + Duration::hours(self.config.renewal_ttl_hours as i64);
        let renewal_token = generate_token();

        self.store
            .put(StoredCredential {
                token: renewal_token.clone(),
                subject,
                family,
                kind: CredentialKind::Renewal,
                expires_at: renewal_expires_at,
                revoked: false,
                created_at: Utc::now(),
            })
            .await?;

        info!(subject = %subject, family = %family, "Issued full session");

        Ok(IssuedSession {
            scope: Scope::Full,
            access_token: access.token,
            access_expires_at: access.expires_at,
            renewal_token: Some(renewal_token),
            renewal_expires_at: Some(renewal_expires_at),
            registration_token: None,
        })
    }

    /// Issues a provisional access credential plus a single-use
    /// registration credential, both bound to the same family and both
    /// confined to the registration window.
    async fn issue_provisional(&self, subject: Uuid, family: Uuid) -> AppResult<IssuedSession> {
        let window = Duration::seconds(self.config.registration_ttl_seconds as i64);
        let access = self
            .encoder
            .issue(subject, Scope::Provisional, family, window)?;

        let registration_token = generate_token();
        self.store
            .put(StoredCredential {
                token: registration_token.clone(),
                subject,
                family,
                kind: CredentialKind::Registration,
                expires_at: Utc::now() + window,
                revoked: false,
                created_at: Utc::now(),
            })
            .await?;

        info!(subject = %subject, family = %family, "Issued provisional session");

        Ok(IssuedSession {
            scope: Scope::Provisional,
            access_token: access.token,
            access_expires_at: access.expires_at,
            renewal_token: None,
            renewal_expires_at: None,
            registration_token: Some(registration_token),
        })
    }
}
