// lib/src/config/config_defaults.rs
use std::path::PathBuf;

pub use crate::config::config_constants::*;
use crate::config::config_structs::{CredentialPolicy, SessionStoreType};

pub fn default_data_directory() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIRECTORY)
}
pub fn default_session_key() -> String { DEFAULT_SESSION_KEY.to_string() }
pub fn default_login_delay_ms() -> u64 { DEFAULT_LOGIN_DELAY_MS }
pub fn default_session_store_type() -> SessionStoreType { SessionStoreType::Sled }
pub fn default_credential_policy() -> CredentialPolicy { CredentialPolicy::Demo }

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
