//! In-memory user directory for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use credhub_core::error::AppError;
use credhub_core::result::AppResult;
use credhub_entity::user::{ProfileDetails, User};

use crate::password::PasswordHasher;

use super::{Identity, UserDirectory};

/// In-memory user directory keyed by username.
#[derive(Debug, Clone)]
pub struct MemoryUserDirectory {
    /// Accounts keyed by username.
    users: Arc<Mutex<HashMap<String, User>>>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new(hasher: Arc<PasswordHasher>) -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            hasher,
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> AppResult<Uuid> {
        let mut users = self.users.lock().await;
        if users.contains_key(username) {
            return Err(AppError::conflict("Username is already taken"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.map(String::from),
            password_hash: self.hasher.hash_password(password)?,
            display_name: None,
            profile_complete: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        let id = user.id;
        users.insert(username.to_string(), user);
        Ok(id)
    }

    async fn verify_password(&self, username: &str, password: &str) -> AppResult<Identity> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(username)
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        user.last_login_at = Some(Utc::now());
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
        let mut users = self.users.lock().await;
        let user = users
            .values_mut()
            .find(|user| user.id == subject)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        user.display_name = Some(details.display_name.clone());
        if let Some(email) = &details.email {
            user.email = Some(email.clone());
        }
        user.profile_complete = true;
        user.updated_at = Utc::now();
        Ok(())
    }
}
