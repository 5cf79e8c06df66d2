//! OIDC authorization-code flow against a Keycloak realm
//!
//! The client here never performs HTTP itself: login and logout are
//! full-navigation redirects fired by the embedding shell, and the code
//! exchange goes through the backend REST API. This module only builds the
//! provider URLs, parses what the provider appends to the callback URL, and
//! supplies CSRF state tokens.
//!
//! # Module Organization
//!
//! - **[`types`]**: Provider configuration (`ProviderConfig`)
//! - **[`state`]**: CSRF state generation and validation
//! - **[`provider`]**: Validated provider client (URLs + callback parsing)

pub mod provider;
pub mod state;
pub mod types;

// Re-export commonly used types and functions
pub use provider::{AuthorizationCallback, ProviderClient, ProviderError};
pub use state::{generate_state, validate_state};
pub use types::ProviderConfig;
