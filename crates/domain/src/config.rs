//! Deployment-time configuration
//!
//! All values are supplied through environment variables with localhost
//! defaults suitable for development. Validation happens at startup so that
//! misconfiguration surfaces as a [`NexusPulseError::Config`] before any
//! login or logout flow is initiated.

use crate::errors::{NexusPulseError, Result};

/// Environment variable for the Keycloak base URL.
pub const ENV_KEYCLOAK_URL: &str = "NEXUSPULSE_KEYCLOAK_URL";
/// Environment variable for the Keycloak realm name.
pub const ENV_KEYCLOAK_REALM: &str = "NEXUSPULSE_KEYCLOAK_REALM";
/// Environment variable for the OIDC client identifier.
pub const ENV_KEYCLOAK_CLIENT_ID: &str = "NEXUSPULSE_KEYCLOAK_CLIENT_ID";
/// Environment variable for the public application URL.
pub const ENV_APP_URL: &str = "NEXUSPULSE_APP_URL";
/// Environment variable for the backend REST API base URL.
pub const ENV_API_URL: &str = "NEXUSPULSE_API_URL";

const DEFAULT_KEYCLOAK_URL: &str = "http://localhost:8080";
const DEFAULT_KEYCLOAK_REALM: &str = "nexuspulse";
const DEFAULT_CLIENT_ID: &str = "nexuspulse-frontend";
const DEFAULT_APP_URL: &str = "http://localhost:3000";
const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Identity provider configuration (one Keycloak realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeycloakConfig {
    /// Keycloak base URL, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Realm name, e.g. `nexuspulse`
    pub realm: String,
    /// OIDC client identifier registered with the realm
    pub client_id: String,
    /// Public application URL used to build redirect URIs
    pub app_url: String,
}

impl KeycloakConfig {
    /// Load from environment variables, falling back to development defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env_or(ENV_KEYCLOAK_URL, DEFAULT_KEYCLOAK_URL),
            realm: env_or(ENV_KEYCLOAK_REALM, DEFAULT_KEYCLOAK_REALM),
            client_id: env_or(ENV_KEYCLOAK_CLIENT_ID, DEFAULT_CLIENT_ID),
            app_url: env_or(ENV_APP_URL, DEFAULT_APP_URL),
        }
    }

    /// Validate that every required field is non-empty.
    ///
    /// # Errors
    /// Returns [`NexusPulseError::Config`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("keycloak base URL", &self.base_url),
            ("keycloak realm", &self.realm),
            ("client id", &self.client_id),
            ("app URL", &self.app_url),
        ] {
            if value.trim().is_empty() {
                return Err(NexusPulseError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Backend REST API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL for the REST API, e.g. `http://localhost:5000/api`
    pub base_url: String,
}

impl ApiConfig {
    /// Load from environment variables, falling back to development defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self { base_url: env_or(ENV_API_URL, DEFAULT_API_URL) }
    }

    /// Validate that the base URL is non-empty.
    ///
    /// # Errors
    /// Returns [`NexusPulseError::Config`] when the base URL is empty.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(NexusPulseError::Config("API base URL must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Aggregated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Identity provider settings
    pub keycloak: KeycloakConfig,
    /// Backend API settings
    pub api: ApiConfig,
}

impl AppConfig {
    /// Load the complete configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self { keycloak: KeycloakConfig::from_env(), api: ApiConfig::from_env() }
    }

    /// Validate all sections.
    ///
    /// # Errors
    /// Returns [`NexusPulseError::Config`] for the first invalid section.
    pub fn validate(&self) -> Result<()> {
        self.keycloak.validate()?;
        self.api.validate()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_keycloak() -> KeycloakConfig {
        KeycloakConfig {
            base_url: "http://localhost:8080".to_string(),
            realm: "nexuspulse".to_string(),
            client_id: "nexuspulse-frontend".to_string(),
            app_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(sample_keycloak().validate().is_ok());
    }

    #[test]
    fn empty_realm_fails_validation() {
        let mut config = sample_keycloak();
        config.realm = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, NexusPulseError::Config(_)));
        assert!(err.to_string().contains("realm"));
    }

    #[test]
    fn whitespace_client_id_fails_validation() {
        let mut config = sample_keycloak();
        config.client_id = "   ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_api_base_url_fails_validation() {
        let config = ApiConfig { base_url: String::new() };
        assert!(matches!(config.validate(), Err(NexusPulseError::Config(_))));
    }
}
