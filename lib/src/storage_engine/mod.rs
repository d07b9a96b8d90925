// lib/src/storage_engine/mod.rs

// Module declarations
pub mod data_store;
pub mod dataset;
pub mod inmemory_store;
pub mod session_store;

// Re-export key types and traits for external use
pub use data_store::DataStore;
pub use dataset::Dataset;
pub use inmemory_store::InMemoryDataStore;
pub use session_store::{InMemorySessionStore, SessionStore, SledSessionStore};
pub use crate::config::SessionStoreType;

use std::sync::Arc;

use log::info;

use crate::config::{AppConfig, DatasetConfig};
use models::CareResult;

/// Builds the data store from the configured fixture, or from the built-in
/// demo dataset when none is configured.
pub fn load_data_store(config: &DatasetConfig) -> CareResult<Arc<dyn DataStore>> {
    let dataset = match &config.fixture_path {
        Some(path) => {
            info!("Loading dataset from {}", path.display());
            Dataset::from_json_file(path)?
        }
        None => Dataset::demo()?,
    };
    Ok(Arc::new(InMemoryDataStore::new(dataset)?))
}

/// Creates the session store selected by `config.session.store`.
pub fn create_session_store(config: &AppConfig) -> CareResult<Arc<dyn SessionStore>> {
    match config.session.store {
        SessionStoreType::Sled => {
            let store = SledSessionStore::open(&config.session_db_path())?;
            Ok(Arc::new(store) as Arc<dyn SessionStore>)
        }
        SessionStoreType::InMemory => Ok(Arc::new(InMemorySessionStore::new()) as Arc<dyn SessionStore>),
    }
}
