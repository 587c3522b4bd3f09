//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration completion request body.
///
/// The provisional access credential travels in the Authorization header;
/// the single-use registration credential rides here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Registration credential issued at login.
    #[validate(length(min = 1, message = "Registration token is required"))]
    pub registration_token: String,
    /// Display name to record on the profile.
    #[validate(length(min = 1, max = 255))]
    pub display_name: String,
    /// Email address (optional).
    pub email: Option<String>,
}

/// Credential rotation request body.
///
/// The (possibly expired) access credential travels in the Authorization
/// header; the renewal credential rides here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Renewal credential bound to the presented access credential.
    #[validate(length(min = 1, message = "Renewal token is required"))]
    pub renewal_token: String,
}
