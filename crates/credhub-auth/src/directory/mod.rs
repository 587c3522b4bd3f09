//! The user directory collaborator contract.
//!
//! The lifecycle core treats users as external records: it looks accounts
//! up by login identifier, verifies passwords, and records profile
//! completion. It never mutates anything else.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use credhub_core::result::AppResult;
use credhub_entity::user::ProfileDetails;

pub use memory::MemoryUserDirectory;
pub use postgres::PgUserDirectory;

/// The verified identity handed to the session issuer.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    /// The subject (user ID).
    pub subject: Uuid,
    /// Whether registration has completed for this account.
    pub profile_complete: bool,
}

/// Contract the credential core requires from the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a new account with an incomplete profile. Fails with
    /// `Conflict` when the username is taken.
    async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> AppResult<Uuid>;

    /// Verify a password for the given login identifier.
    ///
    /// Rejections are uniform: an unknown username and a wrong password
    /// both fail with the same `Unauthorized` message.
    async fn verify_password(&self, username: &str, password: &str) -> AppResult<Identity>;

    /// Record the profile details and mark the profile complete.
    async fn mark_profile_complete(&self, subject: Uuid, details: &ProfileDetails)
    -> AppResult<()>;
}
