//! # credhub-api
//!
//! HTTP transport layer for CredHub. Maps the four lifecycle operations
//! (login, register, refresh, logout) plus signup and protected-resource
//! access onto an axum router. Credentials travel in the `Authorization`
//! bearer header; bodies are JSON.

pub mod catalog;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
