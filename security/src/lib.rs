// security/src/lib.rs

//! Authentication for CareBase: the session manager that owns the signed-in
//! profile, and the credential policies it consults.

pub mod credentials;
pub mod session;

pub use credentials::{
    create_verifier, hash_password, Argon2CredentialVerifier, CredentialVerifier, DemoCredentialVerifier,
};
pub use session::{SessionManager, SessionSettings, SessionSnapshot};
