// lib/src/storage_engine/session_store.rs
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use log::{debug, info};
use sled::{Db, Tree};

use models::{CareError, CareResult};

/// Key/value slot holding the serialized session record.
///
/// Calls are synchronous: logout has to clear the record before it returns.
pub trait SessionStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    fn load(&self, key: &str) -> CareResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &[u8]) -> CareResult<()>;

    /// Removes `key`. Removing a key that is not there is not an error.
    fn remove(&self, key: &str) -> CareResult<()>;
}

/// Sled-backed session storage. Writes are flushed before returning so a
/// session survives the process that created it.
pub struct SledSessionStore {
    tree: Tree,
}

impl SledSessionStore {
    /// Opens (or creates) the sled database at `path`.
    pub fn open(path: &Path) -> CareResult<Self> {
        info!("Opening session database at {}", path.display());
        let db = sled::open(path)?;
        Self::new(&db)
    }

    /// Uses the "sessions" tree of an already opened database.
    pub fn new(db: &Db) -> CareResult<Self> {
        let tree = db.open_tree("sessions")?;
        Ok(Self { tree })
    }
}

impl SessionStore for SledSessionStore {
    fn load(&self, key: &str) -> CareResult<Option<Vec<u8>>> {
        Ok(self.tree.get(key)?.map(|value| value.to_vec()))
    }

    fn save(&self, key: &str, value: &[u8]) -> CareResult<()> {
        self.tree.insert(key, value)?;
        self.tree.flush()?;
        debug!("Persisted {} bytes under session key {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> CareResult<()> {
        if self.tree.remove(key)?.is_some() {
            self.tree.flush()?;
            debug!("Removed session key {}", key);
        }
        Ok(())
    }
}

/// Process-local session storage, used by tests and the `in_memory` setting.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned<E>(_: E) -> CareError {
    CareError::Storage("session store lock poisoned".to_string())
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, key: &str) -> CareResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &[u8]) -> CareResult<()> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> CareResult<()> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn exercise(store: &dyn SessionStore) {
        assert_eq!(store.load("healthcareUser").unwrap(), None);
        store.save("healthcareUser", b"first").unwrap();
        store.save("healthcareUser", b"second").unwrap();
        assert_eq!(store.load("healthcareUser").unwrap(), Some(b"second".to_vec()));
        store.remove("healthcareUser").unwrap();
        store.remove("healthcareUser").unwrap();
        assert_eq!(store.load("healthcareUser").unwrap(), None);
    }

    #[test]
    fn in_memory_store_overwrites_and_removes() {
        exercise(&InMemorySessionStore::new());
    }

    #[test]
    fn sled_store_overwrites_and_removes() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        exercise(&SledSessionStore::new(&db).unwrap());
    }

    #[test]
    fn sled_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sessions");
        {
            let store = SledSessionStore::open(&path).unwrap();
            store.save("healthcareUser", b"{\"role\":\"admin\"}").unwrap();
        }
        let reopened = SledSessionStore::open(&path).unwrap();
        assert_eq!(
            reopened.load("healthcareUser").unwrap(),
            Some(b"{\"role\":\"admin\"}".to_vec())
        );
    }
}
