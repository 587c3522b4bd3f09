//! CredHub Server — Credential Lifecycle Service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use credhub_core::config::AppConfig;
use credhub_core::error::AppError;

use credhub_api::catalog::{MemoryResourceCatalog, PgResourceCatalog, ResourceCatalog};
use credhub_auth::directory::{MemoryUserDirectory, PgUserDirectory, UserDirectory};
use credhub_auth::jwt::{TokenDecoder, TokenEncoder};
use credhub_auth::password::PasswordHasher;
use credhub_auth::session::guard::AccessGuard;
use credhub_auth::session::issuer::SessionIssuer;
use credhub_auth::session::protocol::RenewalProtocol;
use credhub_auth::session::registration::RegistrationProtocol;
use credhub_auth::session::revocation::RevocationHandler;
use credhub_auth::store::{CredentialStore, MemoryCredentialStore, PgCredentialStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CREDHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CredHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Shared auth primitives ───────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let encoder = Arc::new(TokenEncoder::new(&config.auth));
    let decoder = Arc::new(TokenDecoder::new(&config.auth));

    // ── Step 2: Stores and collaborators per provider ────────────
    tracing::info!(provider = %config.store.provider, "Initializing stores");

    let (store, directory, resources): (
        Arc<dyn CredentialStore>,
        Arc<dyn UserDirectory>,
        Arc<dyn ResourceCatalog>,
    ) = match config.store.provider.as_str() {
        "memory" => (
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryUserDirectory::new(Arc::clone(&password_hasher))),
            Arc::new(MemoryResourceCatalog::new()),
        ),
        _ => {
            tracing::info!("Connecting to database...");
            let pool = credhub_database::DatabasePool::connect(&config.database)
                .await?
                .into_pool();

            tracing::info!("Running database migrations...");
            credhub_database::migration::run_migrations(&pool).await?;

            let user_repo = Arc::new(
                credhub_database::repositories::user::UserRepository::new(pool.clone()),
            );
            let credential_repo = Arc::new(
                credhub_database::repositories::credential::CredentialRepository::new(pool.clone()),
            );
            let resource_repo = Arc::new(
                credhub_database::repositories::resource::ResourceRepository::new(pool.clone()),
            );

            (
                Arc::new(PgCredentialStore::new(credential_repo)),
                Arc::new(PgUserDirectory::new(
                    user_repo,
                    Arc::clone(&password_hasher),
                )),
                Arc::new(PgResourceCatalog::new(resource_repo)),
            )
        }
    };

    // ── Step 3: Lifecycle components ─────────────────────────────
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

    // ── Step 4: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 5: Background purge task ────────────────────────────
    let purge_handle = if config.store.purge_interval_hours > 0 {
        let store = Arc::clone(&store);
        let interval = Duration::from_secs(config.store.purge_interval_hours * 3600);
        let grace = chrono::Duration::hours(config.store.purge_grace_hours as i64);
        let mut shutdown = shutdown_rx.clone();

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let cutoff = chrono::Utc::now() - grace;
                        match store.purge_expired(cutoff).await {
                            Ok(purged) => {
                                tracing::info!(purged, "Purged long-expired credentials")
                            }
                            Err(e) => tracing::error!(error = %e, "Credential purge failed"),
                        }
                    }
                    _ = shutdown.changed() => break,
                }
            }
        }))
    } else {
        tracing::info!("Credential purge task disabled");
        None
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = credhub_api::state::AppState {
        config: Arc::new(config.clone()),
        directory,
        store,
        issuer,
        renewal,
        registration,
        revocation,
        guard,
        resources,
    };

    let app = credhub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CredHub server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 8: Wait for background tasks ────────────────────────
    if let Some(handle) = purge_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        let _ = tokio::time::timeout(grace, handle).await;
    }

    tracing::info!("CredHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
