//! Client-side authentication session lifecycle
//!
//! The session manager is the only component permitted to mutate the
//! session. It orchestrates login initiation, callback completion (code to
//! token exchange through the backend), and logout sequencing, and exposes
//! the current authentication state to the rest of the application.
//!
//! # State machine
//!
//! ```text
//! Uninitialized → Initializing → { Authenticated, Unauthenticated }
//! ```
//!
//! Login leaves local state untouched (control transfers to the provider via
//! full-page redirect and resumes on the callback route); a successful
//! callback exchange is the only edge into `Authenticated`; logout is a
//! synchronous local transition back to `Unauthenticated` followed by the
//! external end-session redirect.

pub mod ports;
pub mod service;

use std::time::Duration;

use nexuspulse_common::auth::ProviderError;

/// How long the callback view shows a failure before redirecting back to the
/// entry route. Applies only to rejected exchanges, not to requests that
/// never settle.
pub const CALLBACK_ERROR_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Error type for session manager operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// Identity provider client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redirect callback is invalid or the code exchange was refused
    #[error("{0}")]
    Callback(String),
}

impl From<ProviderError> for SessionError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Config(msg) => Self::Config(msg),
            ProviderError::Callback(msg) => Self::Callback(msg),
        }
    }
}
