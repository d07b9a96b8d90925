// lib/src/lib.rs

//! Read-side core of CareBase: the fixed domain data store, the durable
//! slot the signed-in profile is persisted to, configuration loading, and the
//! pure view derivations (role scoping, filters, period grouping) that the
//! dashboard pages render.

pub mod config;
pub mod dashboards;
pub mod navigation;
pub mod storage_engine;
pub mod views;

pub use models::{CareError, CareResult};

pub use crate::config::{load_app_config, AppConfig, AuthConfig, CredentialPolicy, DatasetConfig, SessionConfig};
pub use crate::storage_engine::{
    create_session_store, load_data_store, DataStore, Dataset, InMemoryDataStore,
    InMemorySessionStore, SessionStore, SessionStoreType, SledSessionStore,
};
