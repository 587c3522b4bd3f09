//! The protected-resource collaborator contract.
//!
//! Resource semantics are opaque here: the handler receives a verified
//! subject from the access guard and lists whatever the catalog holds.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use credhub_core::result::AppResult;
use credhub_database::repositories::resource::ResourceRepository;
use credhub_entity::resource::Resource;

/// Contract the resource handlers require from the resource store.
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// List all resources.
    async fn list(&self) -> AppResult<Vec<Resource>>;

    /// Add a named resource.
    async fn add(&self, name: &str) -> AppResult<Resource>;
}

/// In-memory resource catalog for single-node deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceCatalog {
    /// Stored resources.
    items: Arc<Mutex<Vec<Resource>>>,
}

impl MemoryResourceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceCatalog for MemoryResourceCatalog {
    async fn list(&self) -> AppResult<Vec<Resource>> {
        Ok(self.items.lock().await.clone())
    }

    async fn add(&self, name: &str) -> AppResult<Resource> {
        let resource = Resource {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.items.lock().await.push(resource.clone());
        Ok(resource)
    }
}

/// PostgreSQL-backed resource catalog.
#[derive(Debug, Clone)]
pub struct PgResourceCatalog {
    /// Underlying repository.
    repo: Arc<ResourceRepository>,
}

impl PgResourceCatalog {
    /// Creates a catalog over the given repository.
    pub fn new(repo: Arc<ResourceRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ResourceCatalog for PgResourceCatalog {
    async fn list(&self) -> AppResult<Vec<Resource>> {
        self.repo.list().await
    }

    async fn add(&self, name: &str) -> AppResult<Resource> {
        self.repo.create(name).await
    }
}
