//! Access credential verification.
//!
//! One decode path, two modes. Strict mode enforces expiry and backs the
//! access guard. Lenient mode tolerates expiry for rotation and logout,
//! where an expired access credential is expected; callers read
//! [`Claims::is_expired`] if they care. Malformed or mis-signed input is
//! rejected in both modes.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use credhub_core::config::auth::AuthConfig;
use credhub_core::error::AppError;

use super::claims::Claims;

/// Validates access credential tokens.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation that enforces expiry.
    strict: Validation,
    /// Validation that tolerates expiry.
    lenient: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder").finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut strict = Validation::new(Algorithm::HS256);
        strict.validate_exp = true;
        strict.leeway = 0;

        let mut lenient = Validation::new(Algorithm::HS256);
        lenient.validate_exp = false;
        lenient.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            strict,
            lenient,
        }
    }

    /// Decodes and validates an access credential token.
    ///
    /// With `enforce_expiry` an expired token fails like any other invalid
    /// token; without it the claims of an expired-but-well-formed token
    /// are returned.
    pub fn verify(&self, token: &str, enforce_expiry: bool) -> Result<Claims, AppError> {
        let validation = if enforce_expiry {
            &self.strict
        } else {
            &self.lenient
        };

        let token_data =
            decode::<Claims>(token, &self.decoding_key, validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Credential has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid credential format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid credential signature")
                }
                _ => AppError::unauthorized(format!("Credential validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
