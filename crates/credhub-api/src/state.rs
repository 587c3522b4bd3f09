//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use credhub_auth::directory::UserDirectory;
use credhub_auth::session::guard::AccessGuard;
use credhub_auth::session::issuer::SessionIssuer;
use credhub_auth::session::protocol::RenewalProtocol;
use credhub_auth::session::registration::RegistrationProtocol;
use credhub_auth::session::revocation::RevocationHandler;
use credhub_auth::store::CredentialStore;
use credhub_core::config::AppConfig;

use crate::catalog::ResourceCatalog;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// User directory collaborator.
    pub directory: Arc<dyn UserDirectory>,
    /// Persisted credential store.
    pub store: Arc<dyn CredentialStore>,
    /// Session issuer.
    pub issuer: Arc<SessionIssuer>,
    /// Rotation protocol.
    pub renewal: Arc<RenewalProtocol>,
    /// Registration protocol.
    pub registration: Arc<RegistrationProtocol>,
    /// Revocation handler.
    pub revocation: Arc<RevocationHandler>,
    /// Access guard.
    pub guard: Arc<AccessGuard>,
    /// Protected-resource collaborator.
    pub resources: Arc<dyn ResourceCatalog>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}
