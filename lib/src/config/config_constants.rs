// lib/src/config/config_constants.rs

pub const DEFAULT_CONFIG_FILE: &str = "carebase.yaml";
pub const CONFIG_PATH_ENV_VAR: &str = "CAREBASE_CONFIG";
pub const DEFAULT_DATA_DIRECTORY: &str = "./carebase_data";
/// Subdirectory of the data directory holding the sled session database.
pub const SESSION_DB_DIRECTORY: &str = "sessions";
/// Storage key of the persisted session record.
pub const DEFAULT_SESSION_KEY: &str = "healthcareUser";
/// Simulated round trip of the login call.
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
