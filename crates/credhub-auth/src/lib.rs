//! # credhub-auth
//!
//! The credential lifecycle core of CredHub.
//!
//! ## Modules
//!
//! - `jwt` — access credential encoding and two-mode verification
//! - `password` — Argon2id password hashing and verification
//! - `store` — the renewal store abstraction with memory and Postgres backends
//! - `directory` — the user directory collaborator contract
//! - `session` — issuance, rotation, revocation, and the access guard

pub mod directory;
pub mod jwt;
pub mod password;
pub mod session;
pub mod store;

pub use directory::{Identity, UserDirectory};
pub use jwt::{Claims, TokenDecoder, TokenEncoder};
pub use password::PasswordHasher;
pub use session::{AccessGuard, RegistrationProtocol, RenewalProtocol, RevocationHandler, SessionIssuer};
pub use store::CredentialStore;
