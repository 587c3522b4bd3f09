//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use credhub_auth::session::issuer::IssuedSession;
use credhub_entity::credential::Scope;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Issued session response, returned by login, register, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Scope of the access credential.
    pub scope: Scope,
    /// Access credential.
    pub access_token: String,
    /// Access credential expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Renewal credential (full sessions only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_token: Option<String>,
    /// Renewal credential expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_expires_at: Option<DateTime<Utc>>,
    /// Registration credential (provisional sessions only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_token: Option<String>,
}

impl From<IssuedSession> for SessionResponse {
    fn from(session: IssuedSession) -> Self {
        Self {
            scope: session.scope,
            access_token: session.access_token,
            access_expires_at: session.access_expires_at,
            renewal_token: session.renewal_token,
            renewal_expires_at: session.renewal_expires_at,
            registration_token: session.registration_token,
        }
    }
}

/// Signup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Created user ID.
    pub id: Uuid,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
