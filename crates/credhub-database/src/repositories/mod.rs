//! Database repositories.

pub mod credential;
pub mod resource;
pub mod user;

pub use credential::CredentialRepository;
pub use resource::ResourceRepository;
pub use user::UserRepository;
