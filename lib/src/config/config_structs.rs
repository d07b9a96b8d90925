// lib/src/config/config_structs.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::config_defaults::*;
use models::errors::ValidationError;

/// Where the persisted session record lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreType {
    /// Durable, survives process restarts.
    Sled,
    /// Process-local; forgotten at exit.
    InMemory,
}

impl FromStr for SessionStoreType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sled" => Ok(SessionStoreType::Sled),
            "in_memory" | "inmemory" | "memory" => Ok(SessionStoreType::InMemory),
            _ => Err(ValidationError::InvalidValue(format!("unknown session store type: {}", s))),
        }
    }
}

impl fmt::Display for SessionStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStoreType::Sled => f.write_str("sled"),
            SessionStoreType::InMemory => f.write_str("in_memory"),
        }
    }
}

/// How login treats the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPolicy {
    /// Any non-empty password is accepted. Demo data has no secrets.
    Demo,
    /// Passwords are checked against Argon2 hashes from `credentials_file`.
    Argon2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_store_type")]
    pub store: SessionStoreType,
    #[serde(default = "default_session_key")]
    pub key: String,
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

impl SessionConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            store: default_session_store_type(),
            key: default_session_key(),
            login_delay_ms: default_login_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_credential_policy")]
    pub credential_policy: CredentialPolicy,
    /// YAML map of email to Argon2 PHC hash. Required by the `argon2` policy.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            credential_policy: default_credential_policy(),
            credentials_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// JSON dataset to serve instead of the built-in demo data.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

/// Top-level configuration, usually read from `carebase.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: default_data_directory(),
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn session_db_path(&self) -> PathBuf {
        self.data_directory.join(SESSION_DB_DIRECTORY)
    }

    /// Makes every relative path in the config relative to `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        fn rebase(path: &mut PathBuf, base: &Path) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }

        rebase(&mut self.data_directory, base);
        if let Some(path) = self.auth.credentials_file.as_mut() {
            rebase(path, base);
        }
        if let Some(path) = self.dataset.fixture_path.as_mut() {
            rebase(path, base);
        }
    }
}
