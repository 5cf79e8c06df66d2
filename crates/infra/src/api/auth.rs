//! Backend authentication endpoints and bearer token sourcing

use std::sync::Arc;

use async_trait::async_trait;
use nexuspulse_core::{AuthGateway, GatewayError, SessionManager};
use nexuspulse_domain::{AuthResponse, User};
use serde::Serialize;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;

/// Source of the bearer token attached to authenticated requests
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current access token, or `None` when no session exists
    ///
    /// # Errors
    /// Returns an error if the token cannot be determined.
    async fn access_token(&self) -> Result<Option<String>, ApiError>;
}

/// Token provider reading the in-memory session.
///
/// Never touches storage or the network; an expired token is handed out
/// as-is and surfaces as an auth error from the backend.
pub struct SessionTokenProvider {
    session: Arc<SessionManager>,
}

impl SessionTokenProvider {
    /// Wrap a session manager as a token source
    #[must_use]
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl AccessTokenProvider for SessionTokenProvider {
    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.session.access_token().await)
    }
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    code: &'a str,
    redirect_uri: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct LogoutRequest<'a> {
    refresh_token: &'a str,
}


/// Client for the backend's `/auth` endpoints
///
/// Token exchange and refresh are pre-session calls and carry no bearer;
/// construct this over an unauthenticated [`ApiClient`].
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    /// Create the auth endpoint client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange an authorization code for a backend session
    /// (`POST /auth/token`)
    ///
    /// # Errors
    /// Returns an error if the backend refuses the code or is unreachable.
    #[instrument(skip(self, code))]
    pub async fn exchange_token(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AuthResponse, ApiError> {
        debug!("Exchanging authorization code");
        self.client.post("/auth/token", &TokenExchangeRequest { code, redirect_uri }).await
    }

    /// Obtain a fresh session from a refresh token (`POST /auth/refresh`)
    ///
    /// # Errors
    /// Returns an error if the refresh token is rejected or the backend is
    /// unreachable.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        self.client.post("/auth/refresh", &RefreshRequest { refresh_token }).await
    }

    /// Revoke a refresh token at the provider (`POST /auth/logout`)
    ///
    /// # Errors
    /// Returns an error if revocation fails.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        // Older backends answer 200 with a message body, newer ones 204;
        // accept either.
        let _: serde_json::Value =
            self.client.post("/auth/logout", &LogoutRequest { refresh_token }).await?;
        Ok(())
    }

    /// Fetch the authenticated user's profile (`GET /auth/me`)
    ///
    /// Requires a bearer token; only meaningful over an authenticated
    /// client.
    ///
    /// # Errors
    /// Returns an error if the token is missing or rejected.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me", &[]).await
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AuthResponse, GatewayError> {
        self.exchange_token(code, redirect_uri).await.map_err(map_gateway_error)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), GatewayError> {
        self.logout(refresh_token).await.map_err(map_gateway_error)
    }
}

/// The backend's own message survives for refusals; transport-level and
/// server-side failures become "unavailable".
fn map_gateway_error(err: ApiError) -> GatewayError {
    match err {
        ApiError::Auth(message) | ApiError::Client(message) => GatewayError::Rejected(message),
        other => GatewayError::Unavailable(other.to_string()),
    }
}

impl std::fmt::Debug for AuthApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthApi").field("client", &self.client).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn refusals_keep_the_server_message() {
        let err = map_gateway_error(ApiError::Client("Invalid authorization code".to_string()));
        assert_eq!(err, GatewayError::Rejected("Invalid authorization code".to_string()));
    }

    #[test]
    fn transport_failures_become_unavailable() {
        assert!(matches!(
            map_gateway_error(ApiError::Network("connection refused".to_string())),
            GatewayError::Unavailable(_)
        ));
        assert!(matches!(
            map_gateway_error(ApiError::Timeout(Duration::from_secs(30))),
            GatewayError::Unavailable(_)
        ));
        assert!(matches!(
            map_gateway_error(ApiError::Server("boom".to_string())),
            GatewayError::Unavailable(_)
        ));
    }
}
