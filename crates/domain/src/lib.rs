//! # NexusPulse Domain
//!
//! Business domain types and models for the NexusPulse client.
//!
//! This crate contains:
//! - Wire types shared with the backend (users, leave, attendance, holidays)
//! - Domain error types and Result definitions
//! - Deployment-time configuration structures
//!
//! ## Architecture
//! - No dependencies on other NexusPulse crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::{ApiConfig, AppConfig, KeycloakConfig};
pub use errors::{NexusPulseError, Result};
pub use types::*;
