//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the CredHub directory.
///
/// The lifecycle core never mutates users directly; signup creates them
/// with an incomplete profile and registration marks them complete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier — the credential subject.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name, set during registration.
    pub display_name: Option<String>,
    /// Whether registration has completed for this account.
    ///
    /// Until this flips to `true` the account only receives provisional
    /// credentials.
    pub profile_complete: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data required to create a new user at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Profile details supplied when completing registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDetails {
    /// Display name to record on the profile.
    pub display_name: String,
    /// Email address (optional, overrides the signup value if present).
    pub email: Option<String>,
}
