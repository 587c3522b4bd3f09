//! Persisted credential records, kinds, and access scopes.

pub mod kind;
pub mod model;
pub mod scope;

pub use kind::CredentialKind;
pub use model::StoredCredential;
pub use scope::Scope;
