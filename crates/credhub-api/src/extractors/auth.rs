//! `AuthUser` extractor — pulls the access credential from the
//! Authorization header and runs it through the access guard.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use credhub_auth::jwt::Claims;
use credhub_core::error::AppError;
use credhub_entity::credential::Scope;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated subject for full-scope protected routes.
///
/// The guard is store-free; this extractor costs no I/O.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl std::ops::Deref for AuthUser {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.guard.authorize(token, Scope::Full)?;
        Ok(AuthUser(claims))
    }
}

/// Extract the bearer token from an Authorization header.
///
/// Handlers that run their own verification mode (rotation and logout
/// tolerate expiry, registration enforces the registration window) take
/// the raw token through this instead of the `AuthUser` extractor.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}
