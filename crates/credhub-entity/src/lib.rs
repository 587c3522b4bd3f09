//! # credhub-entity
//!
//! Domain entity models for CredHub.
//!
//! - `user` — user accounts and profile data
//! - `credential` — persisted credential records, kinds, and scopes
//! - `resource` — protected resources gated by a valid access credential

pub mod credential;
pub mod resource;
pub mod user;

pub use credential::{CredentialKind, Scope, StoredCredential};
pub use resource::Resource;
pub use user::{CreateUser, ProfileDetails, User};
