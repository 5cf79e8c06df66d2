//! # NexusPulse Core
//!
//! Session lifecycle business logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - The session manager service and its state machine
//! - Port/adapter interfaces (traits) for token storage and the auth API
//! - The authorization gate and role-filtered navigation model
//!
//! ## Architecture Principles
//! - Only depends on `nexuspulse-common` and `nexuspulse-domain`
//! - No HTTP or platform storage code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod access;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use access::gate::{AuthorizationGate, GateDecision, DASHBOARD_ROUTE, ENTRY_ROUTE};
pub use access::navigation::{visible_entries, NavEntry, NAV_ENTRIES};
pub use session::ports::{AuthGateway, GatewayError, StoredSession, TokenStore};
pub use session::service::{LoginRedirect, LogoutRedirect, SessionManager, SessionSnapshot};
pub use session::{SessionError, CALLBACK_ERROR_REDIRECT_DELAY};
