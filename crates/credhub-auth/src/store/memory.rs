//! In-memory credential store using a Tokio mutex for single-node
//! deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use credhub_core::result::AppResult;
use credhub_entity::credential::StoredCredential;

use super::CredentialStore;

/// In-memory credential store.
///
/// Every operation takes the single mutex, so `consume` is trivially a
/// compare-and-set: the check of `revoked` and the flip happen under one
/// lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    /// Records keyed by token value.
    records: Arc<Mutex<HashMap<String, StoredCredential>>>,
}

impl MemoryCredentialStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn put(&self, credential: StoredCredential) -> AppResult<()> {
        let mut records = self.records.lock().await;
        debug!(
            family = %credential.family,
            kind = %credential.kind,
            "Storing credential record"
        );
        records.insert(credential.token.clone(), credential);
        Ok(())
    }

    async fn find_active(&self, token: &str) -> AppResult<Option<StoredCredential>> {
        let records = self.records.lock().await;
        Ok(records
            .get(token)
            .filter(|record| record.is_active(Utc::now()))
            .cloned())
    }

    async fn consume(&self, token: &str) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        match records.get_mut(token) {
            Some(record) if record.is_active(Utc::now()) => {
                record.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        let mut records = self.records.lock().await;
        if let Some(record) = records.get_mut(token) {
            record.revoked = true;
        }
        Ok(())
    }

    async fn revoke_family(&self, family: Uuid) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let mut revoked = 0u64;
        for record in records.values_mut() {
            if record.family == family && !record.revoked {
                record.revoked = true;
                revoked += 1;
            }
        }
        if revoked > 0 {
            info!(family = %family, revoked, "Revoked credential family");
        }
        Ok(revoked)
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}
