//! Port interfaces for the session lifecycle
//!
//! These traits define the boundaries between the session manager and
//! infrastructure implementations (durable token storage, the backend auth
//! endpoints).

use async_trait::async_trait;
use nexuspulse_domain::{AuthResponse, Result, User};

/// Durable session state as persisted by a [`TokenStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    /// Backend-issued JWT bearer token
    pub access_token: String,
    /// Refresh token, used only for logout revocation in this client
    pub refresh_token: Option<String>,
    /// Cached user profile snapshot
    pub user: User,
}

/// Trait for durable session persistence
///
/// Implementations must treat a partially-present or corrupted record as
/// "not authenticated" (`Ok(None)`), never as a fatal error, and `clear`
/// must succeed when the keys are already absent.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted session, if a complete one exists
    ///
    /// # Errors
    /// Returns an error only for storage-access failures; missing or
    /// unparseable entries load as `Ok(None)`.
    async fn load(&self) -> Result<Option<StoredSession>>;

    /// Persist the session (all provided fields)
    ///
    /// # Errors
    /// Returns an error if the storage write fails.
    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Remove all persisted session state (idempotent)
    ///
    /// # Errors
    /// Returns an error if the storage delete fails; absent keys are not an
    /// error.
    async fn clear(&self) -> Result<()>;
}

/// Error type for auth gateway operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend refused the request and supplied a message
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or returned an unusable response
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

/// Trait for the backend authentication endpoints
///
/// Implemented over the REST API client in the infrastructure layer and
/// mocked in session tests.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange an authorization code for a backend-issued token
    /// (`POST /auth/token`)
    ///
    /// # Errors
    /// Returns [`GatewayError::Rejected`] with the server's message when the
    /// exchange is refused, [`GatewayError::Unavailable`] otherwise.
    async fn exchange_code(&self, code: &str, redirect_uri: &str)
        -> std::result::Result<AuthResponse, GatewayError>;

    /// Revoke a refresh token (`POST /auth/logout`)
    ///
    /// # Errors
    /// Returns an error when revocation fails; callers treat this as
    /// best-effort.
    async fn revoke(&self, refresh_token: &str) -> std::result::Result<(), GatewayError>;
}

impl From<AuthResponse> for StoredSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.token,
            refresh_token: response.refresh_token,
            user: response.user,
        }
    }
}
