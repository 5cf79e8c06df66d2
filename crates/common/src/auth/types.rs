//! Identity provider configuration types

/// OAuth scopes requested during login.
pub const AUTH_SCOPES: &str = "openid profile email";

/// Path of the in-app callback route the provider redirects back to.
pub const CALLBACK_PATH: &str = "/auth/callback";

/// Configuration for one Keycloak realm.
///
/// All fields are deployment-time values; validation happens in
/// [`ProviderClient::new`](super::provider::ProviderClient::new) so a
/// misconfigured deployment fails before any redirect is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Keycloak base URL (e.g. `http://localhost:8080`)
    pub base_url: String,
    /// Realm name (e.g. `nexuspulse`)
    pub realm: String,
    /// OIDC client identifier
    pub client_id: String,
    /// Public application URL used to build the redirect URIs
    pub app_url: String,
}

impl ProviderConfig {
    /// Create a new provider configuration
    #[must_use]
    pub fn new(base_url: String, realm: String, client_id: String, app_url: String) -> Self {
        Self { base_url, realm, client_id, app_url }
    }

    /// Authorization endpoint for the configured realm
    #[must_use]
    pub fn authorization_endpoint(&self) -> String {
        format!("{}/realms/{}/protocol/openid-connect/auth", self.trimmed_base(), self.realm)
    }

    /// End-session endpoint for the configured realm
    #[must_use]
    pub fn end_session_endpoint(&self) -> String {
        format!("{}/realms/{}/protocol/openid-connect/logout", self.trimmed_base(), self.realm)
    }

    /// Redirect URI the provider sends the authorization code to
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("{}{CALLBACK_PATH}", self.app_url.trim_end_matches('/'))
    }

    /// Post-logout redirect target (the app origin)
    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> String {
        self.app_url.trim_end_matches('/').to_string()
    }

    fn trimmed_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ProviderConfig {
        ProviderConfig::new(
            "http://localhost:8080".to_string(),
            "nexuspulse".to_string(),
            "nexuspulse-frontend".to_string(),
            "http://localhost:3000".to_string(),
        )
    }

    #[test]
    fn endpoints_follow_keycloak_realm_layout() {
        let config = sample_config();

        assert_eq!(
            config.authorization_endpoint(),
            "http://localhost:8080/realms/nexuspulse/protocol/openid-connect/auth"
        );
        assert_eq!(
            config.end_session_endpoint(),
            "http://localhost:8080/realms/nexuspulse/protocol/openid-connect/logout"
        );
    }

    #[test]
    fn redirect_uris_derive_from_app_url() {
        let config = sample_config();

        assert_eq!(config.redirect_uri(), "http://localhost:3000/auth/callback");
        assert_eq!(config.post_logout_redirect_uri(), "http://localhost:3000");
    }

    #[test]
    fn trailing_slashes_are_tolerated() {
        let mut config = sample_config();
        config.base_url = "http://localhost:8080/".to_string();
        config.app_url = "http://localhost:3000/".to_string();

        assert!(config.authorization_endpoint().contains("8080/realms"));
        assert_eq!(config.redirect_uri(), "http://localhost:3000/auth/callback");
    }
}
