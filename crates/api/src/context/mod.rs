//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use nexuspulse_common::auth::{ProviderClient, ProviderConfig};
use nexuspulse_core::{AuthorizationGate, SessionManager, TokenStore};
use nexuspulse_domain::{AppConfig, NexusPulseError, Result};
use nexuspulse_infra::{
    AdminApi, ApiClient, ApiClientConfig, AuthApi, EmployeeApi, KeyringTokenStore, ManagerApi,
    SessionTokenProvider,
};
use tracing::info;

const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Application context - holds all services and dependencies
///
/// Built once at startup and shared with the view layer. The session
/// manager inside is the single mutable session instance for the process.
pub struct AppContext {
    /// Validated configuration the context was built from
    pub config: AppConfig,
    /// The session manager (login, callback, logout, snapshots)
    pub session: Arc<SessionManager>,
    /// Route gating over session snapshots
    pub gate: AuthorizationGate,
    /// Backend auth endpoints (refresh, profile fetch)
    pub auth: Arc<AuthApi>,
    /// Employee-facing endpoints
    pub employee: EmployeeApi,
    /// Manager-facing endpoints
    pub manager: ManagerApi,
    /// Admin-facing endpoints
    pub admin: AdminApi,
}

impl AppContext {
    /// Build the full context and hydrate the session
    ///
    /// Persists sessions in the OS keychain. By the time this returns, the
    /// session has settled and the gate's first decision observes
    /// `loading = false`.
    ///
    /// # Errors
    /// Returns [`NexusPulseError::Config`] when the configuration or
    /// provider client is invalid, or when the HTTP client cannot be built.
    pub async fn init(config: AppConfig) -> Result<Self> {
        Self::init_with_store(config, Arc::new(KeyringTokenStore::new())).await
    }

    /// Build the context over a caller-supplied token store
    ///
    /// Tests inject an in-memory store here to avoid the OS keychain.
    ///
    /// # Errors
    /// Returns [`NexusPulseError::Config`] when the configuration or
    /// provider client is invalid, or when the HTTP client cannot be built.
    pub async fn init_with_store(
        config: AppConfig,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        config.validate()?;

        let provider_config = ProviderConfig::new(
            config.keycloak.base_url.clone(),
            config.keycloak.realm.clone(),
            config.keycloak.client_id.clone(),
            config.keycloak.app_url.clone(),
        );
        let provider = Arc::new(
            ProviderClient::new(provider_config)
                .map_err(|e| NexusPulseError::Config(e.to_string()))?,
        );

        let api_config =
            ApiClientConfig { base_url: config.api.base_url.clone(), timeout: API_TIMEOUT };

        // Auth endpoints are pre-session calls and carry no bearer.
        let auth_client = Arc::new(
            ApiClient::new(api_config.clone())
                .map_err(|e| NexusPulseError::Config(e.to_string()))?,
        );
        let auth = Arc::new(AuthApi::new(auth_client));

        let session = Arc::new(SessionManager::new(provider, store, auth.clone()));

        let token_provider = Arc::new(SessionTokenProvider::new(session.clone()));
        let api_client = Arc::new(
            ApiClient::with_auth(api_config, token_provider)
                .map_err(|e| NexusPulseError::Config(e.to_string()))?,
        );

        let context = Self {
            config,
            gate: AuthorizationGate,
            auth,
            employee: EmployeeApi::new(api_client.clone()),
            manager: ManagerApi::new(api_client.clone()),
            admin: AdminApi::new(api_client),
            session,
        };

        context.session.initialize().await;
        info!("Application context initialized");

        Ok(context)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").field("config", &self.config).finish_non_exhaustive()
    }
}
