//! PostgreSQL-backed user directory.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use credhub_core::error::AppError;
use credhub_core::result::AppResult;
use credhub_database::repositories::user::UserRepository;
use credhub_entity::user::{CreateUser, ProfileDetails};

use crate::password::PasswordHasher;

use super::{Identity, UserDirectory};

/// User directory backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    /// Underlying repository.
    repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl PgUserDirectory {
    /// Creates a directory over the given repository.
    pub fn new(repo: Arc<UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> AppResult<Uuid> {
        let user = self
            .repo
            .create(&CreateUser {
                username: username.to_string(),
                email: email.map(String::from),
                password_hash: self.hasher.hash_password(password)?,
            })
            .await?;
        Ok(user.id)
    }

    async fn verify_password(&self, username: &str, password: &str) -> AppResult<Identity> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        // Best effort; a failed timestamp update must not fail the login.
        let _ = self.repo.update_last_login(user.id, Utc::now()).await;

        Ok(Identity {
            subject: user.id,
            profile_complete: user.profile_complete,
        })
    }

    async fn mark_profile_complete(
        &self,
        subject: Uuid,
        details: &ProfileDetails,
    ) -> AppResult<()> {
        self.repo.set_profile_complete(subject, details).await
    }
}
