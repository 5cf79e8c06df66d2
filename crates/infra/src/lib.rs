//! # NexusPulse Infrastructure
//!
//! Adapters binding the session core to the outside world:
//! - HTTP client for the NexusPulse backend REST API
//! - OS keychain token persistence
//!
//! Implements the port traits defined in `nexuspulse-core`.

#![forbid(unsafe_code)]

pub mod api;
pub mod storage;

pub use api::{
    AccessTokenProvider, AdminApi, ApiClient, ApiClientConfig, ApiError, AttendanceReportFilter,
    AuthApi, DefaulterFilter, EmployeeApi, ManagerApi, SessionTokenProvider,
};
pub use storage::{KeyringTokenStore, MemoryTokenStore};
