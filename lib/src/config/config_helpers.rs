// lib/src/config/config_helpers.rs
use std::env;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::config::config_defaults::default_config_path;
use crate::config::config_constants::CONFIG_PATH_ENV_VAR;
use crate::config::config_structs::AppConfig;
use models::{CareError, CareResult};

/// Loads the application configuration.
///
/// The file is `config_file_path` if given, else `$CAREBASE_CONFIG`, else
/// `./carebase.yaml`. Only the last one may be absent, in which case the
/// defaults are returned.
pub fn load_app_config(config_file_path: Option<PathBuf>) -> CareResult<AppConfig> {
    let named = config_file_path.or_else(|| env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from));
    let path_to_use = match named {
        Some(path) => path,
        None => {
            let default_path = default_config_path();
            if !default_path.exists() {
                debug!("No config file at {}, using defaults", default_path.display());
                return Ok(AppConfig::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&path_to_use).map_err(|e| {
        CareError::Configuration(format!("Failed to read config file {}: {}", path_to_use.display(), e))
    })?;
    let mut config: AppConfig = serde_yaml::from_str(&config_content).map_err(|e| {
        CareError::Configuration(format!("Failed to parse config file {}: {}", path_to_use.display(), e))
    })?;

    if let Some(base) = path_to_use.parent() {
        config.resolve_relative_to(base);
    }
    info!("Loaded configuration from {}", path_to_use.display());
    Ok(config)
}
