//! Session lifecycle: issuance, rotation, registration upgrade,
//! revocation, and the access guard.

pub mod guard;
pub mod issuer;
pub mod protocol;
pub mod registration;
pub mod revocation;

pub use guard::AccessGuard;
pub use issuer::{IssuedSession, SessionIssuer};
pub use protocol::{RenewalProtocol, binding_holds};
pub use registration::RegistrationProtocol;
pub use revocation::RevocationHandler;
