//! Shared test helpers for integration tests.
//!
//! The test application runs on the in-memory providers with a one-second
//! access window, so expiry behavior is observable without external
//! services.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use credhub_core::config::AppConfig;

use credhub_api::catalog::{MemoryResourceCatalog, ResourceCatalog};
use credhub_api::state::AppState;
use credhub_auth::directory::{MemoryUserDirectory, UserDirectory};
use credhub_auth::jwt::{TokenDecoder, TokenEncoder};
use credhub_auth::password::PasswordHasher;
use credhub_auth::session::guard::AccessGuard;
use credhub_auth::session::issuer::SessionIssuer;
use credhub_auth::session::protocol::RenewalProtocol;
use credhub_auth::session::registration::RegistrationProtocol;
use credhub_auth::session::revocation::RevocationHandler;
use credhub_auth::store::{CredentialStore, MemoryCredentialStore};

/// Access credential TTL used by the test app, in seconds.
pub const ACCESS_TTL_SECONDS: u64 = 1;

/// A decoded test response.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (`Null` for empty bodies).
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The axum router for making test requests
    pub router: Router,
    /// Resource catalog handle for seeding
    pub catalog: Arc<MemoryResourceCatalog>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application on in-memory providers.
    pub async fn new() -> Self {
        let mut config = AppConfig::load("test").expect("Failed to load test config");
        config.store.provider = "memory".to_string();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.access_ttl_seconds = ACCESS_TTL_SECONDS;
        config.auth.registration_ttl_seconds = 60;

        let password_hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(TokenEncoder::new(&config.auth));
        let decoder = Arc::new(TokenDecoder::new(&config.auth));

        let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        let directory: Arc<dyn UserDirectory> =
            Arc::new(MemoryUserDirectory::new(Arc::clone(&password_hasher)));
        let catalog = Arc::new(MemoryResourceCatalog::new());

        let issuer = Arc::new(SessionIssuer::new(
            Arc::clone(&encoder),
            Arc::clone(&store),
            config.auth.clone(),
        ));
        let renewal = Arc::new(RenewalProtocol::new(
            Arc::clone(&decoder),
            Arc::clone(&store),
            Arc::clone(&issuer),
        ));
        let registration = Arc::new(RegistrationProtocol::new(
            Arc::clone(&decoder),
            Arc::clone(&store),
            Arc::clone(&issuer),
            Arc::clone(&directory),
        ));
        let revocation = Arc::new(RevocationHandler::new(
            Arc::clone(&decoder),
            Arc::clone(&store),
        ));
        let guard = Arc::new(AccessGuard::new(Arc::clone(&decoder)));

        let state = AppState {
            config: Arc::new(config.clone()),
            directory,
            store,
            issuer,
            renewal,
            registration,
            revocation,
            guard,
            resources: Arc::clone(&catalog) as Arc<dyn ResourceCatalog>,
        };

        Self {
            router: credhub_api::router::build_router(state),
            catalog,
            config,
        }
    }

    /// Issue a request against the router.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    /// Sign up a user; panics on failure.
    pub async fn signup(&self, username: &str, password: &str) {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    /// Log in and return the session payload.
    pub async fn login(&self, username: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"].clone()
    }

    /// Complete registration and return the upgraded session payload.
    pub async fn register(&self, access_token: &str, registration_token: &str) -> Value {
        let response = self.try_register(access_token, registration_token).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["data"].clone()
    }

    /// Attempt registration without asserting the outcome.
    pub async fn try_register(&self, access_token: &str, registration_token: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "registration_token": registration_token,
                "display_name": "Integration Tester",
            })),
            Some(access_token),
        )
        .await
    }

    /// Attempt a rotation.
    pub async fn refresh(&self, access_token: &str, renewal_token: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({
                "renewal_token": renewal_token,
            })),
            Some(access_token),
        )
        .await
    }

    /// Attempt a logout.
    pub async fn logout(&self, access_token: &str) -> TestResponse {
        self.request("POST", "/api/auth/logout", None, Some(access_token))
            .await
    }

    /// Attempt a protected resource access.
    pub async fn resources(&self, token: Option<&str>) -> TestResponse {
        self.request("GET", "/api/resources", None, token).await
    }

    /// Seed a resource directly into the catalog.
    pub async fn seed_resource(&self, name: &str) {
        self.catalog.add(name).await.unwrap();
    }

    /// Sign up, log in, and register in one step; returns a full session.
    pub async fn full_session(&self, username: &str, password: &str) -> Value {
        self.signup(username, password).await;
        let provisional = self.login(username, password).await;
        self.register(
            provisional["access_token"].as_str().unwrap(),
            provisional["registration_token"].as_str().unwrap(),
        )
        .await
    }
}

/// Wait past the access credential TTL.
///
/// Expiry timestamps have one-second granularity, so the wait pads a
/// full extra second past the window.
pub async fn wait_for_access_expiry() {
    tokio::time::sleep(std::time::Duration::from_millis(
        (ACCESS_TTL_SECONDS + 1) * 1000 + 300,
    ))
    .await;
}

/// Pull a string field out of a session payload.
pub fn field<'a>(session: &'a Value, name: &str) -> &'a str {
    session[name]
        .as_str()
        .unwrap_or_else(|| panic!("session payload missing '{name}'"))
}
