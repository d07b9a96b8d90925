// security/src/credentials.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use log::{debug, info, warn};
use rand_core::OsRng;

use carebase_lib::config::{AuthConfig, CredentialPolicy};
use models::{CareError, CareResult, User};

/// Decides whether a password is acceptable for an already resolved account.
///
/// The account lookup itself happens before this is called; an unknown
/// email never reaches a verifier.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, user: &User, password: &str) -> CareResult<()>;
}

/// Accepts any non-empty password. The demo dataset carries no secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCredentialVerifier;

impl CredentialVerifier for DemoCredentialVerifier {
    fn verify(&self, user: &User, password: &str) -> CareResult<()> {
        if password.is_empty() {
            return Err(CareError::InvalidInput("Password is required".to_string()));
        }
        debug!("Demo policy accepted password for {}", user.email);
        Ok(())
    }
}

/// Checks passwords against Argon2 PHC strings, keyed by lowercased email.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialVerifier {
    hashes: HashMap<String, String>,
}

impl Argon2CredentialVerifier {
    pub fn new(hashes: HashMap<String, String>) -> Self {
        let hashes = hashes
            .into_iter()
            .map(|(email, hash)| (email.trim().to_lowercase(), hash))
            .collect();
        Argon2CredentialVerifier { hashes }
    }

    /// Reads a YAML map of `email: <argon2 hash>`.
    pub fn from_yaml_file(path: &Path) -> CareResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CareError::Configuration(format!("Failed to read credentials file {}: {}", path.display(), e))
        })?;
        let hashes: HashMap<String, String> = serde_yaml::from_str(&content).map_err(|e| {
            CareError::Configuration(format!("Failed to parse credentials file {}: {}", path.display(), e))
        })?;
        info!("Loaded {} credential hashes from {}", hashes.len(), path.display());
        Ok(Self::new(hashes))
    }
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn verify(&self, user: &User, password: &str) -> CareResult<()> {
        let Some(stored) = self.hashes.get(&user.email.to_lowercase()) else {
            warn!("No credential hash on file for {}", user.email);
            return Err(CareError::invalid_credentials());
        };
        let password_hash = PasswordHash::new(stored).map_err(|e| {
            CareError::Configuration(format!("Malformed password hash for {}: {}", user.email, e))
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &password_hash) {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Password) => Err(CareError::invalid_credentials()),
            Err(e) => Err(CareError::Authentication(format!("Failed to verify password: {}", e))),
        }
    }
}

/// Hashes a password with Argon2 and a random salt, producing a PHC string
/// suitable for a credentials file.
pub fn hash_password(password: &str) -> CareResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CareError::Authentication(format!("Failed to hash password with Argon2: {}", e)))
}

/// Builds the verifier selected by `config.credential_policy`.
pub fn create_verifier(config: &AuthConfig) -> CareResult<Arc<dyn CredentialVerifier>> {
    match config.credential_policy {
        CredentialPolicy::Demo => Ok(Arc::new(DemoCredentialVerifier)),
        CredentialPolicy::Argon2 => {
            let path = config.credentials_file.as_deref().ok_or_else(|| {
                CareError::Configuration("argon2 credential policy requires auth.credentials_file".to_string())
            })?;
            Ok(Arc::new(Argon2CredentialVerifier::from_yaml_file(path)?))
        }
    }
}
