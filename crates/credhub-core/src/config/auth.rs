//! Authentication and credential-window configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// The three windows control the lifetime of the three credential kinds:
/// short-lived access credentials, longer-lived renewal credentials, and
/// the single-use registration credential issued to incomplete profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access credential TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Renewal credential TTL in hours.
    #[serde(default = "default_renewal_ttl")]
    pub renewal_ttl_hours: u64,
    /// Registration window in seconds: the lifetime of both the
    /// provisional access credential and its registration credential.
    #[serde(default = "default_registration_ttl")]
    pub registration_ttl_seconds: u64,
    /// Minimum password length accepted at signup.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_seconds: default_access_ttl(),
            renewal_ttl_hours: default_renewal_ttl(),
            registration_ttl_seconds: default_registration_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    900
}

fn default_renewal_ttl() -> u64 {
    24
}

fn default_registration_ttl() -> u64 {
    900
}

fn default_password_min() -> usize {
    8
}
