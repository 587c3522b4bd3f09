//! The renewal store abstraction.
//!
//! The store is the only cross-request shared mutable state in the core.
//! Implementations must make [`CredentialStore::consume`] an atomic
//! compare-and-set on the `revoked` flag: of two concurrent consumers of
//! the same token, exactly one wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::{RngExt, distr::Alphanumeric};
use uuid::Uuid;

use credhub_core::result::AppResult;
use credhub_entity::credential::StoredCredential;

pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;

/// Length of generated opaque token values.
const TOKEN_LENGTH: usize = 48;

/// Persistence contract for renewal and registration credentials.
///
/// Store failures surface as `ErrorKind::Database` and are fatal for the
/// current request; callers never fall back or retry.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new active credential record.
    async fn put(&self, credential: StoredCredential) -> AppResult<()>;

    /// Return the record only if unrevoked and unexpired. Expired or
    /// revoked records are indistinguishable from absent ones.
    async fn find_active(&self, token: &str) -> AppResult<Option<StoredCredential>>;

    /// Atomically flip `revoked` false→true. Returns whether this caller
    /// won the compare-and-set; a loser observes the record already
    /// revoked (or expired, or absent) and gets `false`.
    async fn consume(&self, token: &str) -> AppResult<bool>;

    /// Idempotently revoke a credential.
    async fn revoke(&self, token: &str) -> AppResult<()>;

    /// Revoke every credential sharing the given family identifier.
    async fn revoke_family(&self, family: Uuid) -> AppResult<u64>;

    /// Delete records whose expiry is older than `cutoff`. Maintenance
    /// only; correctness never depends on it.
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

/// Generates an opaque, URL-safe random token value.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
