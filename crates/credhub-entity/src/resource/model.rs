//! Protected resource model.
//!
//! Resources are opaque to the credential core: the access guard hands the
//! catalog a verified subject and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named resource gated by a valid full-scope access credential.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: Uuid,
    /// Resource name.
    pub name: String,
    /// When the resource was created.
    pub created_at: DateTime<Utc>,
}
