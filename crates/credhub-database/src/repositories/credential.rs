//! Stored credential repository implementation.
//!
//! Rotation correctness rests on `consume`: a conditional UPDATE whose
//! affected-row count decides which of two concurrent callers wins the
//! compare-and-set on the `revoked` flag.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use credhub_core::error::{AppError, ErrorKind};
use credhub_core::result::AppResult;
use credhub_entity::credential::StoredCredential;

/// Repository for persisted renewal and registration credentials.
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    /// Create a new credential repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new active credential record.
    pub async fn insert(&self, credential: &StoredCredential) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO stored_credentials (token, subject, family, kind, expires_at, revoked, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&credential.token)
        .bind(credential.subject)
        .bind(credential.family)
        .bind(credential.kind)
        .bind(credential.expires_at)
        .bind(credential.revoked)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert credential", e)
        })?;
        Ok(())
    }

    /// Find a credential that is unrevoked and unexpired as of `now`.
    ///
    /// Expired-but-unrevoked rows are invisible here but stay in the
    /// table for audit.
    pub async fn find_active(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<StoredCredential>> {
        sqlx::query_as::<_, StoredCredential>(
            "SELECT * FROM stored_credentials WHERE token = $1 AND revoked = FALSE AND expires_at > $2",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find credential", e))
    }

    /// Atomically revoke an active credential.
    ///
    /// Returns `true` only for the caller whose UPDATE flipped the flag;
    /// a concurrent second caller sees `revoked = TRUE` already and gets
    /// `false`.
    pub async fn consume(&self, token: &str, now: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE stored_credentials SET revoked = TRUE \
             WHERE token = $1 AND revoked = FALSE AND expires_at > $2",
        )
        .bind(token)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume credential", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Idempotently revoke a credential regardless of its current state.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        sqlx::query("UPDATE stored_credentials SET revoked = TRUE WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke credential", e)
            })?;
        Ok(())
    }

    /// Revoke every credential sharing the given family identifier.
    pub async fn revoke_family(&self, family: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE stored_credentials SET revoked = TRUE WHERE family = $1 AND revoked = FALSE")
                .bind(family)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to revoke family", e)
                })?;
        Ok(result.rows_affected())
    }

    /// Delete records whose expiry is older than `cutoff`.
    ///
    /// Maintenance only; lookups already ignore expired rows.
    pub async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM stored_credentials WHERE expires_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge credentials", e)
            })?;
        Ok(result.rows_affected())
    }
}
