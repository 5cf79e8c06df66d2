//! Validated identity provider client
//!
//! Builds the authorization and end-session URLs for the redirect-based
//! authorization-code flow and interprets the provider's redirect callback.
//! Construction validates the configuration up front; a misconfigured client
//! is a [`ProviderError::Config`], never a first-use surprise.

use tracing::debug;
use url::Url;

use super::types::{ProviderConfig, AUTH_SCOPES};

/// Error type for provider client operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider client cannot be constructed from the given configuration
    Config(String),

    /// The redirect callback is missing or carries invalid parameters, or
    /// the provider reported an error
    Callback(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Callback(msg) => write!(f, "Callback error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Parameters the provider appended to the callback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCallback {
    /// Authorization code to exchange for a token
    pub code: String,
    /// CSRF state echoed back by the provider, when present
    pub state: Option<String>,
}

/// Identity provider client for one configured Keycloak realm
///
/// The client produces URLs; the embedding shell performs the actual
/// full-page navigation. One instance is constructed at application startup
/// and shared for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
}

impl ProviderClient {
    /// Create a provider client from validated configuration
    ///
    /// # Errors
    /// Returns [`ProviderError::Config`] when any required field is empty.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        for (name, value) in [
            ("provider base URL", &config.base_url),
            ("realm", &config.realm),
            ("client id", &config.client_id),
            ("app URL", &config.app_url),
        ] {
            if value.trim().is_empty() {
                return Err(ProviderError::Config(format!("{name} must not be empty")));
            }
        }

        Ok(Self { config })
    }

    /// Build the authorization URL for browser-based login
    ///
    /// The caller navigates the page to this URL; the provider redirects back
    /// to the callback route with `code` and `state` query parameters.
    #[must_use]
    pub fn authorization_url(&self, state: &str) -> String {
        let params = [
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", &self.config.redirect_uri()),
            ("scope", AUTH_SCOPES),
            ("state", state),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        debug!(realm = %self.config.realm, "Built authorization URL");

        format!("{}?{}", self.config.authorization_endpoint(), query)
    }

    /// Build the end-session URL for provider sign-out
    ///
    /// The caller navigates to this URL after local state is cleared; the
    /// provider redirects back to the app origin.
    #[must_use]
    pub fn end_session_url(&self) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("post_logout_redirect_uri", &self.config.post_logout_redirect_uri()),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.end_session_endpoint(), query)
    }

    /// Parse the provider's redirect callback
    ///
    /// Reads `code`, `state`, and error parameters from the callback URL's
    /// query string. No network activity happens here; a missing code fails
    /// immediately.
    ///
    /// # Errors
    /// Returns [`ProviderError::Callback`] when:
    /// - the URL cannot be parsed
    /// - the provider reported an `error` parameter
    /// - the `code` parameter is missing or empty
    pub fn parse_callback(&self, callback_url: &str) -> Result<AuthorizationCallback, ProviderError> {
        let url = Url::parse(callback_url)
            .map_err(|e| ProviderError::Callback(format!("Invalid callback URL: {e}")))?;

        let mut code = None;
        let mut state = None;
        let mut error = None;
        let mut error_description = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "error_description" => error_description = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            let message = error_description.unwrap_or(error);
            return Err(ProviderError::Callback(message));
        }

        match code {
            Some(code) if !code.is_empty() => Ok(AuthorizationCallback { code, state }),
            _ => Err(ProviderError::Callback("No authorization code received".to_string())),
        }
    }

    /// Redirect URI registered for the authorization-code exchange
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        self.config.redirect_uri()
    }

    /// Get a reference to the provider configuration
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
