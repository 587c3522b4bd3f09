//! Access credential creation with configurable signing.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use credhub_core::config::auth::AuthConfig;
use credhub_core::error::AppError;
use credhub_entity::credential::Scope;

use super::claims::Claims;

/// A freshly issued access credential.
#[derive(Debug, Clone)]
pub struct AccessCredential {
    /// The signed token string.
    pub token: String,
    /// The claims embedded in the token.
    pub claims: Claims,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed access credentials.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder").finish()
    }
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Issues an access credential for `subject` under the caller-supplied
    /// family identifier, valid for `ttl` from now.
    pub fn issue(
        &self,
        subject: Uuid,
        scope: Scope,
        family: Uuid,
        ttl: Duration,
    ) -> Result<AccessCredential, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: subject,
            fam: family,
            scope,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access credential: {e}")))?;

        Ok(AccessCredential {
            token,
            claims,
            expires_at,
        })
    }
}
