//! Session revocation (logout).

use std::sync::Arc;

use tracing::info;

use credhub_core::result::AppResult;

use crate::jwt::TokenDecoder;
use crate::store::CredentialStore;

/// Terminates a credential family early.
#[derive(Clone)]
pub struct RevocationHandler {
    /// Access credential decoder.
    decoder: Arc<TokenDecoder>,
    /// Persisted credential store.
    store: Arc<dyn CredentialStore>,
}

impl RevocationHandler {
    /// Creates a new revocation handler.
    pub fn new(decoder: Arc<TokenDecoder>, store: Arc<dyn CredentialStore>) -> Self {
        Self { decoder, store }
    }

    /// Logs out the session behind the presented access credential.
    ///
    /// Expiry is tolerated; a user must be able to log out with an
    /// expired access credential. Idempotent: revoking an already-revoked
    /// family succeeds silently, and success does not depend on any
    /// stored record existing.
    pub async fn logout(&self, access_token: &str) -> AppResult<()> {
        let claims = self.decoder.verify(access_token, false)?;

        self.store.revoke_family(claims.fam).await?;

        info!(subject = %claims.sub, family = %claims.fam, "Logged out, family revoked");
        Ok(())
    }
}
