//! The access guard applied to protected-resource requests.

use std::sync::Arc;

use credhub_core::error::AppError;
use credhub_core::result::AppResult;
use credhub_entity::credential::Scope;

use crate::jwt::{Claims, TokenDecoder};

/// Authorizes protected requests from the access credential alone.
///
/// Validity is self-contained: the guard decodes and checks expiry and
/// scope, and never consults the credential store. Revocation takes
/// effect at the next rotation, bounded by the access window.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    /// Access credential decoder.
    decoder: Arc<TokenDecoder>,
}

impl AccessGuard {
    /// Creates a new access guard.
    pub fn new(decoder: Arc<TokenDecoder>) -> Self {
        Self { decoder }
    }

    /// Authorizes a request, requiring at least `required` scope.
    ///
    /// Provisional credentials only ever satisfy the registration
    /// endpoint's requirement.
    pub fn authorize(&self, access_token: &str, required: Scope) -> AppResult<Claims> {
        let claims = self.decoder.verify(access_token, true)?;

        if !claims.scope.satisfies(required) {
            return Err(AppError::unauthorized("Insufficient scope"));
        }

        Ok(claims)
    }
}
