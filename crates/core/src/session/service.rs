//! Session manager service
//!
//! Combines the identity provider client, the token store, and the backend
//! auth gateway into the single component that owns session state.

use std::sync::Arc;

use nexuspulse_common::auth::{generate_state, validate_state, ProviderClient};
use nexuspulse_domain::User;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::ports::{AuthGateway, GatewayError, StoredSession, TokenStore};
use super::SessionError;

/// Internal session state machine.
///
/// `Authenticated` carries the full session so the invariant "user and
/// access token are set together" holds by construction.
#[derive(Debug, Clone)]
enum SessionState {
    Uninitialized,
    Initializing,
    Unauthenticated,
    Authenticated(StoredSession),
}

/// Read-only view of the current session, immutable per render.
///
/// `is_authenticated` holds exactly when both the access token and the user
/// are present; no reachable state has only one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Cached user profile, when authenticated
    pub user: Option<User>,
    /// Bearer token, when authenticated
    pub access_token: Option<String>,
    /// `true` until `initialize()` has completed
    pub loading: bool,
}

impl SessionSnapshot {
    /// Whether both credential and profile are present
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Pending login redirect: the shell must navigate to `authorization_url`;
/// no further local code runs until the provider redirects back to the
/// callback route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    /// Provider authorization endpoint with the code-flow query attached
    pub authorization_url: String,
}

/// Pending logout redirect: local state is already cleared by the time this
/// value exists; the shell navigates to `end_session_url` to finish the
/// provider sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutRedirect {
    /// Provider end-session endpoint with the post-logout redirect attached
    pub end_session_url: String,
}

/// Session manager for the NexusPulse client
///
/// The only component permitted to mutate session state. Constructed once at
/// application startup and shared through the view tree root; all readers
/// observe it through [`SessionManager::snapshot`].
pub struct SessionManager {
    provider: Arc<ProviderClient>,
    store: Arc<dyn TokenStore>,
    gateway: Arc<dyn AuthGateway>,
    state: RwLock<SessionState>,
    pending_state: RwLock<Option<String>>,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// # Arguments
    /// * `provider` - Validated identity provider client
    /// * `store` - Durable token store
    /// * `gateway` - Backend auth endpoint gateway
    #[must_use]
    pub fn new(
        provider: Arc<ProviderClient>,
        store: Arc<dyn TokenStore>,
        gateway: Arc<dyn AuthGateway>,
    ) -> Self {
        Self {
            provider,
            store,
            gateway,
            state: RwLock::new(SessionState::Uninitialized),
            pending_state: RwLock::new(None),
        }
    }

    /// Hydrate the session from the token store
    ///
    /// Runs exactly once at application start; later calls are no-ops. Never
    /// performs a network call and never fails: an empty or corrupted store
    /// simply yields the unauthenticated state. The authorization gate waits
    /// on `loading` turning false before making its first decision.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, SessionState::Uninitialized) {
                return;
            }
            *state = SessionState::Initializing;
        }

        let loaded = self.store.load().await;

        let mut state = self.state.write().await;
        *state = match loaded {
            Ok(Some(session)) => {
                info!(user = %session.user.email, "Session restored from token store");
                SessionState::Authenticated(session)
            }
            Ok(None) => {
                debug!("No persisted session found");
                SessionState::Unauthenticated
            }
            Err(err) => {
                warn!(error = %err, "Token store unavailable; starting unauthenticated");
                SessionState::Unauthenticated
            }
        };
    }

    /// Begin the login flow
    ///
    /// Generates a CSRF state token, records it as pending, and returns the
    /// authorization URL for the shell to navigate to. Local session state is
    /// not touched; the flow resumes on the callback route after a full page
    /// reload. A second call before the redirect fires replaces the pending
    /// state.
    pub async fn login(&self) -> LoginRedirect {
        let state = generate_state();
        *self.pending_state.write().await = Some(state.clone());

        info!("Generated login redirect");

        LoginRedirect { authorization_url: self.provider.authorization_url(&state) }
    }

    /// Complete the login flow from the provider's redirect callback
    ///
    /// Parses the callback URL, validates the CSRF state when one was
    /// recorded, exchanges the code for a backend-issued token, persists the
    /// result, and updates the in-memory session in a single write. On any
    /// failure the session stays unauthenticated.
    ///
    /// # Errors
    /// Returns [`SessionError::Callback`] when the callback carries no code
    /// (no network call is made), the state does not match, or the exchange
    /// is refused. The error message is the server's when available, else
    /// "Authentication failed".
    pub async fn complete_callback(&self, callback_url: &str) -> Result<(), SessionError> {
        let callback = self.provider.parse_callback(callback_url)?;

        // Page reloads between redirect-out and redirect-back drop the
        // in-memory pending state; only enforce the match when both sides
        // survived.
        let expected = self.pending_state.write().await.take();
        if let (Some(expected), Some(actual)) = (expected.as_deref(), callback.state.as_deref()) {
            if !validate_state(expected, actual) {
                return Err(SessionError::Callback("State mismatch".to_string()));
            }
        }

        let redirect_uri = self.provider.redirect_uri();
        let response = self
            .gateway
            .exchange_code(&callback.code, &redirect_uri)
            .await
            .map_err(|err| match err {
                GatewayError::Rejected(message) => SessionError::Callback(message),
                GatewayError::Unavailable(message) => {
                    warn!(error = %message, "Token exchange unreachable");
                    SessionError::Callback("Authentication failed".to_string())
                }
            })?;

        let session = StoredSession::from(response);

        if let Err(err) = self.store.save(&session).await {
            // Persistence is best-effort once the exchange succeeded; the
            // session just won't survive a restart.
            warn!(error = %err, "Failed to persist session");
        }

        *self.state.write().await = SessionState::Authenticated(session);

        info!("Login completed");
        Ok(())
    }

    /// Log out
    ///
    /// Best-effort revokes the refresh token, then unconditionally clears
    /// the token store and the in-memory session, and only then returns the
    /// provider end-session URL for the shell to navigate to. Revocation and
    /// storage failures are logged and swallowed; logout always completes
    /// locally before the redirect is initiated.
    pub async fn logout(&self) -> LogoutRedirect {
        *self.pending_state.write().await = None;

        let refresh_token = match &*self.state.read().await {
            SessionState::Authenticated(session) => session.refresh_token.clone(),
            _ => None,
        };

        if let Some(token) = refresh_token {
            if let Err(err) = self.gateway.revoke(&token).await {
                warn!(error = %err, "Token revocation failed; continuing local logout");
            }
        }

        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "Failed to clear token store");
        }

        *self.state.write().await = SessionState::Unauthenticated;

        info!("Logged out");

        LogoutRedirect { end_session_url: self.provider.end_session_url() }
    }

    /// Read-only view of the current session
    pub async fn snapshot(&self) -> SessionSnapshot {
        match &*self.state.read().await {
            SessionState::Uninitialized | SessionState::Initializing => {
                SessionSnapshot { user: None, access_token: None, loading: true }
            }
            SessionState::Unauthenticated => {
                SessionSnapshot { user: None, access_token: None, loading: false }
            }
            SessionState::Authenticated(session) => SessionSnapshot {
                user: Some(session.user.clone()),
                access_token: Some(session.access_token.clone()),
                loading: false,
            },
        }
    }

    /// Whether a complete session is present
    pub async fn is_authenticated(&self) -> bool {
        matches!(&*self.state.read().await, SessionState::Authenticated(_))
    }

    /// Current bearer token, when authenticated
    pub async fn access_token(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Authenticated(session) => Some(session.access_token.clone()),
            _ => None,
        }
    }

    /// Current user profile, when authenticated
    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated(session) => Some(session.user.clone()),
            _ => None,
        }
    }

    /// Whether a login flow is awaiting its redirect callback
    pub async fn has_pending_login(&self) -> bool {
        self.pending_state.read().await.is_some()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("provider", &self.provider).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use nexuspulse_common::auth::ProviderConfig;
    use nexuspulse_domain::{AuthResponse, NexusPulseError, Role};

    use super::*;

    /// In-memory token store with switchable failure modes.
    #[derive(Default)]
    struct TestStore {
        session: Mutex<Option<StoredSession>>,
        fail_clear: bool,
    }

    #[async_trait]
    impl TokenStore for TestStore {
        async fn load(&self) -> nexuspulse_domain::Result<Option<StoredSession>> {
            Ok(self.session.lock().unwrap().clone())
        }

        async fn save(&self, session: &StoredSession) -> nexuspulse_domain::Result<()> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> nexuspulse_domain::Result<()> {
            if self.fail_clear {
                return Err(NexusPulseError::Storage("keychain locked".to_string()));
            }
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    /// Gateway double that records call counts and can be set to fail.
    struct TestGateway {
        exchange_calls: AtomicUsize,
        revoke_calls: AtomicUsize,
        exchange_result: fn() -> Result<AuthResponse, GatewayError>,
        revoke_result: fn() -> Result<(), GatewayError>,
    }

    impl Default for TestGateway {
        fn default() -> Self {
            Self {
                exchange_calls: AtomicUsize::new(0),
                revoke_calls: AtomicUsize::new(0),
                exchange_result: || Ok(auth_response("t1", None)),
                revoke_result: || Ok(()),
            }
        }
    }

    #[async_trait]
    impl AuthGateway for TestGateway {
        async fn exchange_code(
            &self,
            _code: &str,
            _redirect_uri: &str,
        ) -> Result<AuthResponse, GatewayError> {
            self.exchange_calls.fetch_add(1, Ordering::SeqCst);
            (self.exchange_result)()
        }

        async fn revoke(&self, _refresh_token: &str) -> Result<(), GatewayError> {
            self.revoke_calls.fetch_add(1, Ordering::SeqCst);
            (self.revoke_result)()
        }
    }

    fn sample_user(role: Role) -> User {
        let now = "2024-03-01T09:00:00Z".parse().unwrap();
        User {
            id: "u-1".to_string(),
            email: "jamie@nexuspulse.dev".to_string(),
            first_name: "Jamie".to_string(),
            last_name: "Reyes".to_string(),
            full_name: "Jamie Reyes".to_string(),
            role,
            manager_id: None,
            location_id: "loc-1".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn auth_response(token: &str, refresh: Option<&str>) -> AuthResponse {
        AuthResponse {
            token: token.to_string(),
            user: sample_user(Role::Employee),
            refresh_token: refresh.map(str::to_string),
        }
    }

    fn stored_session(token: &str, refresh: Option<&str>) -> StoredSession {
        StoredSession {
            access_token: token.to_string(),
            refresh_token: refresh.map(str::to_string),
            user: sample_user(Role::Manager),
        }
    }

    fn provider() -> Arc<ProviderClient> {
        let config = ProviderConfig::new(
            "http://localhost:8080".to_string(),
            "nexuspulse".to_string(),
            "nexuspulse-frontend".to_string(),
            "http://localhost:3000".to_string(),
        );
        Arc::new(ProviderClient::new(config).unwrap())
    }

    fn manager_with(store: TestStore, gateway: TestGateway) -> (SessionManager, Arc<TestGateway>) {
        let gateway = Arc::new(gateway);
        let manager = SessionManager::new(provider(), Arc::new(store), gateway.clone());
        (manager, gateway)
    }

    fn callback_url(code: &str) -> String {
        format!("http://localhost:3000/auth/callback?code={code}")
    }

    #[tokio::test]
    async fn snapshot_is_loading_before_initialize() {
        let (manager, _) = manager_with(TestStore::default(), TestGateway::default());

        let snapshot = manager.snapshot().await;
        assert!(snapshot.loading);
        assert!(!snapshot.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_on_empty_store_is_unauthenticated() {
        let (manager, gateway) = manager_with(TestStore::default(), TestGateway::default());

        manager.initialize().await;

        let snapshot = manager.snapshot().await;
        assert!(!snapshot.loading);
        assert!(!snapshot.is_authenticated());
        assert_eq!(gateway.exchange_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn initialize_restores_persisted_session_without_network() {
        let store = TestStore::default();
        *store.session.lock().unwrap() = Some(stored_session("abc", Some("r1")));
        let (manager, gateway) = manager_with(store, TestGateway::default());

        manager.initialize().await;

        let snapshot = manager.snapshot().await;
        assert!(!snapshot.loading);
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.access_token.as_deref(), Some("abc"));
        assert_eq!(snapshot.user.as_ref().map(|u| u.role), Some(Role::Manager));
        assert_eq!(gateway.exchange_calls.load(Ordering::SeqCst), 0);
        assert_eq!(gateway.revoke_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn initialize_runs_only_once() {
        let store = TestStore::default();
        let (manager, _) = manager_with(store, TestGateway::default());

        manager.initialize().await;

        // A session appearing in the store later must not be picked up by a
        // second initialize.
        let session = manager.snapshot().await;
        manager.initialize().await;
        assert_eq!(manager.snapshot().await, session);
    }

    #[tokio::test]
    async fn login_records_pending_state_and_builds_redirect() {
        let (manager, _) = manager_with(TestStore::default(), TestGateway::default());
        manager.initialize().await;

        let redirect = manager.login().await;

        assert!(redirect.authorization_url.contains("response_type=code"));
        assert!(manager.has_pending_login().await);
        // Local session state is untouched by login.
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn complete_callback_authenticates_and_persists() {
        let store = TestStore::default();
        let (manager, gateway) = manager_with(store, TestGateway::default());
        manager.initialize().await;

        manager.complete_callback(&callback_url("XYZ")).await.unwrap();

        let snapshot = manager.snapshot().await;
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.access_token.as_deref(), Some("t1"));
        assert_eq!(gateway.exchange_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn callback_round_trips_through_a_fresh_manager() {
        let store = Arc::new(TestStore::default());
        let gateway = Arc::new(TestGateway::default());
        let manager = SessionManager::new(provider(), store.clone(), gateway.clone());
        manager.initialize().await;
        manager.complete_callback(&callback_url("XYZ")).await.unwrap();
        let first = manager.snapshot().await;

        // A fresh manager over the same store reconstructs the same state.
        let fresh = SessionManager::new(provider(), store, gateway);
        fresh.initialize().await;

        assert_eq!(fresh.snapshot().await, first);
        assert!(fresh.is_authenticated().await);
    }

    #[tokio::test]
    async fn callback_without_code_makes_no_network_call() {
        let (manager, gateway) = manager_with(TestStore::default(), TestGateway::default());
        manager.initialize().await;

        let err = manager
            .complete_callback("http://localhost:3000/auth/callback?state=s")
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::Callback("No authorization code received".to_string()));
        assert_eq!(gateway.exchange_calls.load(Ordering::SeqCst), 0);
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn callback_with_mismatched_state_is_rejected() {
        let (manager, gateway) = manager_with(TestStore::default(), TestGateway::default());
        manager.initialize().await;
        manager.login().await;

        let err = manager
            .complete_callback("http://localhost:3000/auth/callback?code=XYZ&state=forged")
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::Callback("State mismatch".to_string()));
        assert_eq!(gateway.exchange_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn callback_after_reload_skips_state_check() {
        // No login() on this manager instance: the pending state was lost to
        // the page reload, so the echoed state cannot be checked.
        let (manager, _) = manager_with(TestStore::default(), TestGateway::default());
        manager.initialize().await;

        let result = manager
            .complete_callback("http://localhost:3000/auth/callback?code=XYZ&state=whatever")
            .await;

        assert!(result.is_ok());
        assert!(manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn rejected_exchange_surfaces_server_message() {
        let gateway = TestGateway {
            exchange_result: || Err(GatewayError::Rejected("Invalid authorization code".into())),
            ..TestGateway::default()
        };
        let (manager, _) = manager_with(TestStore::default(), gateway);
        manager.initialize().await;

        let err = manager.complete_callback(&callback_url("bad")).await.unwrap_err();

        assert_eq!(err, SessionError::Callback("Invalid authorization code".to_string()));
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn unreachable_exchange_falls_back_to_generic_message() {
        let gateway = TestGateway {
            exchange_result: || Err(GatewayError::Unavailable("connection refused".into())),
            ..TestGateway::default()
        };
        let (manager, _) = manager_with(TestStore::default(), gateway);
        manager.initialize().await;

        let err = manager.complete_callback(&callback_url("XYZ")).await.unwrap_err();

        assert_eq!(err, SessionError::Callback("Authentication failed".to_string()));
    }

    #[tokio::test]
    async fn logout_revokes_clears_and_returns_end_session_redirect() {
        let store = TestStore::default();
        *store.session.lock().unwrap() = Some(stored_session("abc", Some("r1")));
        let (manager, gateway) = manager_with(store, TestGateway::default());
        manager.initialize().await;

        let redirect = manager.logout().await;

        assert!(redirect.end_session_url.contains("openid-connect/logout"));
        assert_eq!(gateway.revoke_calls.load(Ordering::SeqCst), 1);
        assert!(!manager.is_authenticated().await);

        // The store is empty: a fresh manager starts unauthenticated.
        let snapshot = manager.snapshot().await;
        assert!(snapshot.access_token.is_none() && snapshot.user.is_none());
    }

    #[tokio::test]
    async fn logout_without_refresh_token_skips_revocation() {
        let store = TestStore::default();
        *store.session.lock().unwrap() = Some(stored_session("abc", None));
        let (manager, gateway) = manager_with(store, TestGateway::default());
        manager.initialize().await;

        manager.logout().await;

        assert_eq!(gateway.revoke_calls.load(Ordering::SeqCst), 0);
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_completes_locally_when_revocation_fails() {
        let store = TestStore::default();
        *store.session.lock().unwrap() = Some(stored_session("abc", Some("r1")));
        let gateway = TestGateway {
            revoke_result: || Err(GatewayError::Unavailable("timeout".into())),
            ..TestGateway::default()
        };
        let (manager, gateway) = manager_with(store, gateway);
        manager.initialize().await;

        let redirect = manager.logout().await;

        assert_eq!(gateway.revoke_calls.load(Ordering::SeqCst), 1);
        assert!(!manager.is_authenticated().await);
        assert!(!redirect.end_session_url.is_empty());
    }

    #[tokio::test]
    async fn logout_completes_locally_when_store_clear_fails() {
        let store = TestStore { fail_clear: true, ..TestStore::default() };
        *store.session.lock().unwrap() = Some(stored_session("abc", None));
        let (manager, _) = manager_with(store, TestGateway::default());
        manager.initialize().await;

        manager.logout().await;

        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn no_reachable_state_has_exactly_one_credential() {
        let (manager, _) = manager_with(TestStore::default(), TestGateway::default());

        for snapshot in [
            manager.snapshot().await,
            {
                manager.initialize().await;
                manager.snapshot().await
            },
            {
                manager.complete_callback(&callback_url("XYZ")).await.unwrap();
                manager.snapshot().await
            },
            {
                manager.logout().await;
                manager.snapshot().await
            },
        ] {
            assert_eq!(snapshot.access_token.is_some(), snapshot.user.is_some());
        }
    }

    #[tokio::test]
    async fn logout_clears_pending_login() {
        let (manager, _) = manager_with(TestStore::default(), TestGateway::default());
        manager.initialize().await;
        manager.login().await;
        assert!(manager.has_pending_login().await);

        manager.logout().await;

        assert!(!manager.has_pending_login().await);
    }
}
