// security/src/session.rs
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use carebase_lib::config::{AppConfig, SessionConfig};
use carebase_lib::storage_engine::{create_session_store, load_data_store, DataStore, SessionStore};
use models::{CareError, CareResult, Credentials, UserProfile};

use crate::credentials::{create_verifier, CredentialVerifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Key the signed-in profile is persisted under.
    pub key: String,
    /// Artificial wait before credentials are checked.
    pub login_delay: Duration,
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        SessionSettings {
            key: config.key.clone(),
            login_delay: config.login_delay(),
        }
    }
}

/// Point-in-time copy of the session, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

#[derive(Debug)]
struct SessionState {
    current_user: Option<UserProfile>,
    is_loading: bool,
    last_error: Option<String>,
}

/// Owns the authenticated identity for the lifetime of the process.
///
/// There is exactly one signed-in profile or none. It is persisted as JSON
/// under `SessionSettings::key` so the next process can pick it up through
/// [`SessionManager::restore_session`]. Concurrent logins are not
/// serialized: the last one to complete wins.
pub struct SessionManager {
    data_store: Arc<dyn DataStore>,
    session_store: Arc<dyn SessionStore>,
    verifier: Arc<dyn CredentialVerifier>,
    settings: SessionSettings,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Creates a manager in the `Initializing` state. Call
    /// [`restore_session`](Self::restore_session) before reading it.
    pub fn new(
        data_store: Arc<dyn DataStore>,
        session_store: Arc<dyn SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        settings: SessionSettings,
    ) -> Self {
        SessionManager {
            data_store,
            session_store,
            verifier,
            settings,
            state: RwLock::new(SessionState {
                current_user: None,
                is_loading: true,
                last_error: None,
            }),
        }
    }

    /// Wires the data store, session store and credential policy named in
    /// `config`.
    pub fn from_config(config: &AppConfig) -> CareResult<Self> {
        let data_store = load_data_store(&config.dataset)?;
        let session_store = create_session_store(config)?;
        let verifier = create_verifier(&config.auth)?;
        Ok(Self::new(data_store, session_store, verifier, SessionSettings::from(&config.session)))
    }

    pub fn data_store(&self) -> &Arc<dyn DataStore> {
        &self.data_store
    }

    /// Reloads a previously persisted profile.
    ///
    /// A record that no longer decodes is removed and the session starts
    /// unauthenticated; that failure is logged, not returned. Loading is
    /// finished when this returns, whatever the outcome.
    pub fn restore_session(&self) -> CareResult<Option<UserProfile>> {
        let restored = self.read_persisted();
        let mut state = self.write_state();
        state.is_loading = false;

        match restored {
            Ok(Some(profile)) => {
                info!("Restored session for {} ({})", profile.email(), profile.role());
                state.current_user = Some(profile.clone());
                Ok(Some(profile))
            }
            Ok(None) => {
                debug!("No persisted session under key {}", self.settings.key);
                state.current_user = None;
                Ok(None)
            }
            Err(CareError::PersistedStateCorrupt(reason)) => {
                warn!("Discarding persisted session: {}", reason);
                state.current_user = None;
                drop(state);
                self.session_store.remove(&self.settings.key)?;
                Ok(None)
            }
            Err(e) => {
                state.current_user = None;
                Err(e)
            }
        }
    }

    /// Signs in with `email` and `password`.
    ///
    /// Blank input is rejected immediately. Otherwise the call waits for the
    /// configured login delay, resolves the account by email (ignoring
    /// case), checks the password and the role record, then persists the
    /// profile. Failures are also recorded as the session's last error.
    pub async fn login(&self, email: &str, password: &str) -> CareResult<UserProfile> {
        let credentials = Credentials::new(email, password);
        if let Err(e) = credentials.validate() {
            self.write_state().last_error = Some(e.to_string());
            return Err(e);
        }

        {
            let mut state = self.write_state();
            state.is_loading = true;
            state.last_error = None;
        }
        // Dropping this future mid-delay must not leave the session loading.
        let _loading = LoadingGuard(&self.state);

        tokio::time::sleep(self.settings.login_delay).await;

        match self.authenticate(&credentials).and_then(|profile| self.commit(profile)) {
            Ok(profile) => {
                info!("Signed in {} as {}", profile.email(), profile.role());
                Ok(profile)
            }
            Err(e) => {
                warn!("Login failed for {}: {}", credentials.email, e);
                self.write_state().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Runs [`login`](Self::login) as a detached task. The login completes
    /// and updates the session even if the handle is dropped.
    pub fn spawn_login(self: &Arc<Self>, email: impl Into<String>, password: impl Into<String>) -> JoinHandle<CareResult<UserProfile>> {
        let manager = Arc::clone(self);
        let email = email.into();
        let password = password.into();
        tokio::spawn(async move { manager.login(&email, &password).await })
    }

    /// Clears the in-memory session and the persisted record. Calling it
    /// while signed out is a no-op.
    pub fn logout(&self) -> CareResult<()> {
        let mut state = self.write_state();
        if let Some(profile) = state.current_user.take() {
            info!("Signed out {}", profile.email());
        }
        self.session_store.remove(&self.settings.key)
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.read_state().current_user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().current_user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.read_state().last_error.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read_state();
        SessionSnapshot {
            current_user: state.current_user.clone(),
            is_authenticated: state.current_user.is_some(),
            is_loading: state.is_loading,
            last_error: state.last_error.clone(),
        }
    }

    fn authenticate(&self, credentials: &Credentials) -> CareResult<UserProfile> {
        let user = self
            .data_store
            .find_user_by_email(&credentials.email)
            .ok_or_else(CareError::invalid_credentials)?;
        self.verifier.verify(user, &credentials.password)?;
        self.data_store
            .find_profile(user)
            .ok_or_else(CareError::user_details_not_found)
    }

    /// Persists `profile` and makes it the current user. Both happen under
    /// the state lock so the stored record always names the in-memory user.
    fn commit(&self, profile: UserProfile) -> CareResult<UserProfile> {
        let encoded = serde_json::to_vec(&profile)?;
        let mut state = self.write_state();
        self.session_store.save(&self.settings.key, &encoded)?;
        state.current_user = Some(profile.clone());
        Ok(profile)
    }

    fn read_persisted(&self) -> CareResult<Option<UserProfile>> {
        let Some(bytes) = self.session_store.load(&self.settings.key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| CareError::PersistedStateCorrupt(e.to_string()))
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LoadingGuard<'a>(&'a RwLock<SessionState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebase_lib::storage_engine::{Dataset, InMemoryDataStore, InMemorySessionStore, SledSessionStore};
    use models::Role;
    use tempfile::tempdir;

    use crate::credentials::DemoCredentialVerifier;

    const DEMO_EMAILS: [&str; 5] = [
        "john@example.com",
        "jane@example.com",
        "sarah@example.com",
        "michael@example.com",
        "admin@example.com",
    ];

    fn settings() -> SessionSettings {
        SessionSettings {
            key: "healthcareUser".to_string(),
            login_delay: Duration::from_millis(1),
        }
    }

    fn manager_with(data_store: Arc<dyn DataStore>, session_store: Arc<dyn SessionStore>) -> SessionManager {
        SessionManager::new(data_store, session_store, Arc::new(DemoCredentialVerifier), settings())
    }

    fn demo_manager(session_store: Arc<dyn SessionStore>) -> SessionManager {
        manager_with(Arc::new(InMemoryDataStore::demo().unwrap()), session_store)
    }

    #[test]
    fn starts_loading_and_unauthenticated() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        let snapshot = manager.snapshot();
        assert!(snapshot.is_loading);
        assert!(!snapshot.is_authenticated);
        assert_eq!(snapshot.current_user, None);
    }

    #[tokio::test]
    async fn every_demo_account_can_sign_in() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        manager.restore_session().unwrap();

        for email in DEMO_EMAILS {
            let profile = manager.login(email, "password").await.unwrap();
            let stored = manager.data_store().find_user_by_email(email).unwrap();
            assert_eq!(profile.email(), email);
            assert_eq!(profile.id(), &stored.id);
            assert_eq!(profile.role(), stored.role);
            assert!(manager.is_authenticated());
            assert!(!manager.is_loading());
            assert_eq!(manager.current_user().as_ref().map(|p| p.email()), Some(email));
        }
    }

    #[tokio::test]
    async fn login_ignores_email_case() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        let profile = manager.login("SARAH@Example.COM", "x").await.unwrap();
        assert_eq!(profile.role(), Role::Doctor);
        assert_eq!(profile.id(), "d1");
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_and_remembered() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        let err = manager.login("nobody@example.com", "x").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        let snapshot = manager.snapshot();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.last_error.as_deref(), Some("Invalid email or password"));
    }

    #[tokio::test]
    async fn blank_input_fails_before_lookup() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        assert!(matches!(manager.login("", "x").await, Err(CareError::InvalidInput(_))));
        assert!(matches!(manager.login("john@example.com", "").await, Err(CareError::InvalidInput(_))));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn successful_login_clears_previous_error() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        let _ = manager.login("nobody@example.com", "x").await;
        manager.login("john@example.com", "x").await.unwrap();
        assert_eq!(manager.last_error(), None);
    }

    #[tokio::test]
    async fn missing_role_record_is_an_integrity_error() {
        let mut dataset = Dataset::demo().unwrap();
        dataset.patients.retain(|p| p.id != "p2");
        let session_store = Arc::new(InMemorySessionStore::new());
        let manager = manager_with(Arc::new(InMemoryDataStore::new(dataset).unwrap()), session_store.clone());

        let err = manager.login("jane@example.com", "x").await.unwrap_err();
        assert!(matches!(err, CareError::Integrity(_)));
        assert_eq!(err.to_string(), "User details not found");
        assert!(!manager.is_authenticated());
        assert_eq!(session_store.load("healthcareUser").unwrap(), None);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let session_store = Arc::new(InMemorySessionStore::new());
        let manager = demo_manager(session_store.clone());
        manager.login("admin@example.com", "x").await.unwrap();

        manager.logout().unwrap();
        manager.logout().unwrap();
        assert!(!manager.is_authenticated());
        assert_eq!(session_store.load("healthcareUser").unwrap(), None);
    }

    #[tokio::test]
    async fn restore_returns_the_signed_in_profile() {
        let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let first = demo_manager(session_store.clone());
        let profile = first.login("michael@example.com", "x").await.unwrap();

        let second = demo_manager(session_store);
        assert_eq!(second.restore_session().unwrap(), Some(profile.clone()));
        assert_eq!(second.current_user(), Some(profile));
        assert!(!second.is_loading());
    }

    #[tokio::test]
    async fn restore_survives_a_reopened_sled_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sessions");
        let profile = {
            let manager = demo_manager(Arc::new(SledSessionStore::open(&path).unwrap()));
            manager.login("john@example.com", "x").await.unwrap()
        };

        let manager = demo_manager(Arc::new(SledSessionStore::open(&path).unwrap()));
        assert_eq!(manager.restore_session().unwrap(), Some(profile));
    }

    #[test]
    fn corrupt_record_is_removed_on_restore() {
        let session_store = Arc::new(InMemorySessionStore::new());
        session_store.save("healthcareUser", b"{not json").unwrap();
        let manager = demo_manager(session_store.clone());

        assert_eq!(manager.restore_session().unwrap(), None);
        assert!(!manager.is_loading());
        assert!(!manager.is_authenticated());
        assert_eq!(manager.last_error(), None);
        assert_eq!(session_store.load("healthcareUser").unwrap(), None);
    }

    #[test]
    fn record_with_unknown_role_is_treated_as_corrupt() {
        let session_store = Arc::new(InMemorySessionStore::new());
        session_store
            .save("healthcareUser", br#"{"id":"x1","name":"X","email":"x@example.com","role":"nurse"}"#)
            .unwrap();
        let manager = demo_manager(session_store.clone());

        assert_eq!(manager.restore_session().unwrap(), None);
        assert_eq!(session_store.load("healthcareUser").unwrap(), None);
    }

    #[tokio::test]
    async fn dropped_login_does_not_stay_loading() {
        let manager = SessionManager::new(
            Arc::new(InMemoryDataStore::demo().unwrap()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(DemoCredentialVerifier),
            SessionSettings {
                key: "healthcareUser".to_string(),
                login_delay: Duration::from_secs(60),
            },
        );
        manager.restore_session().unwrap();

        let pending = manager.login("john@example.com", "x");
        let timed_out = tokio::time::timeout(Duration::from_millis(5), pending).await;
        assert!(timed_out.is_err());
        assert!(!manager.is_loading());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn detached_login_completes_without_its_handle() {
        let manager = Arc::new(demo_manager(Arc::new(InMemorySessionStore::new())));
        drop(manager.spawn_login("jane@example.com", "x"));

        for _ in 0..100 {
            if manager.is_authenticated() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(manager.current_user().map(|p| p.id().to_string()), Some("p2".to_string()));
    }

    #[tokio::test]
    async fn concurrent_logins_leave_one_winner() {
        let manager = demo_manager(Arc::new(InMemorySessionStore::new()));
        let (a, b) = tokio::join!(
            manager.login("john@example.com", "x"),
            manager.login("sarah@example.com", "x")
        );
        assert!(a.is_ok() && b.is_ok());

        let winner = manager.current_user().unwrap();
        assert!(winner.id() == "p1" || winner.id() == "d1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn persisted_record_matches_the_winner_of_racing_logins() {
        let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let manager = Arc::new(demo_manager(session_store.clone()));

        for _ in 0..25 {
            let first = manager.spawn_login("john@example.com", "x");
            let second = manager.spawn_login("sarah@example.com", "x");
            first.await.unwrap().unwrap();
            second.await.unwrap().unwrap();

            let bytes = session_store.load("healthcareUser").unwrap().unwrap();
            let persisted: UserProfile = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(Some(persisted), manager.current_user());
        }
    }
}
