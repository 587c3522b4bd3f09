//! PostgreSQL-backed credential store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use credhub_core::result::AppResult;
use credhub_database::repositories::credential::CredentialRepository;
use credhub_entity::credential::StoredCredential;

use super::CredentialStore;

/// Credential store backed by the `stored_credentials` table.
///
/// The compare-and-set in `consume` is delegated to a conditional UPDATE,
/// so concurrent rotations across nodes still elect a single winner.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    /// Underlying repository.
    repo: Arc<CredentialRepository>,
}

impl PgCredentialStore {
    /// Creates a store over the given repository.
    pub fn new(repo: Arc<CredentialRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn put(&self, credential: StoredCredential) -> AppResult<()> {
        self.repo.insert(&credential).await
    }

    async fn find_active(&self, token: &str) -> AppResult<Option<StoredCredential>> {
        self.repo.find_active(token, Utc::now()).await
    }

    async fn consume(&self, token: &str) -> AppResult<bool> {
        self.repo.consume(token, Utc::now()).await
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        self.repo.revoke(token).await
    }

    async fn revoke_family(&self, family: Uuid) -> AppResult<u64> {
        self.repo.revoke_family(family).await
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        self.repo.purge_expired(cutoff).await
    }
}
