//! REST API client for the NexusPulse backend
//!
//! [`ApiClient`] owns the transport; the per-surface wrappers ([`AuthApi`],
//! [`EmployeeApi`], [`ManagerApi`], [`AdminApi`]) give each backend surface
//! a typed face. Authorization decisions stay server-side; these clients
//! only forward the bearer token.

pub mod admin;
pub mod auth;
pub mod client;
pub mod employee;
pub mod errors;
pub mod manager;

pub use admin::{
    AdminApi, AllocateBalanceRequest, AttendanceDefaulters, AttendanceReport,
    AttendanceReportEntry, AttendanceReportFilter, CreateLocationRequest, CreateUserRequest,
    Defaulter, DefaulterFilter, HolidayRequest, ReportEmployee, UpdateUserRequest, UserFilter,
};
pub use auth::{AccessTokenProvider, AuthApi, SessionTokenProvider};
pub use client::{ApiClient, ApiClientConfig, QueryParams};
pub use employee::{AttendanceHistoryFilter, EmployeeApi, LeaveHistoryFilter};
pub use errors::ApiError;
pub use manager::{
    ManagerApi, MarkAttendanceRequest, TeamAttendanceFilter, TeamAttendanceSummary,
    TeamLeaveFilter,
};
