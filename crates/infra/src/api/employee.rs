//! Employee-facing backend endpoints

use std::sync::Arc;

use nexuspulse_domain::{
    ApplyLeaveRequest, AttendanceRecord, AttendanceSummary, HolidayCalendar, LeaveBalanceSummary,
    LeaveRequest, Page,
};

use super::client::ApiClient;
use super::errors::ApiError;

/// Filters for the leave history listing
#[derive(Debug, Clone, Default)]
pub struct LeaveHistoryFilter {
    pub status: Option<String>,
    pub leave_type_id: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Filters for the attendance history listing
#[derive(Debug, Clone, Default)]
pub struct AttendanceHistoryFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Client for `/employee` endpoints; requires an authenticated [`ApiClient`]
#[derive(Debug)]
pub struct EmployeeApi {
    client: Arc<ApiClient>,
}

impl EmployeeApi {
    /// Create the employee endpoint client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Leave balances for a year, defaulting server-side to the current one
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn leave_balance(&self, year: Option<i32>) -> Result<LeaveBalanceSummary, ApiError> {
        self.client.get("/employee/balance", &[("year", year.map(|y| y.to_string()))]).await
    }

    /// Submit a leave request
    ///
    /// # Errors
    /// Returns an error if the request is invalid or fails.
    pub async fn apply_leave(&self, request: &ApplyLeaveRequest) -> Result<LeaveRequest, ApiError> {
        self.client.post("/employee/leave", request).await
    }

    /// Paginated leave history
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn leave_history(
        &self,
        filter: &LeaveHistoryFilter,
    ) -> Result<Page<LeaveRequest>, ApiError> {
        self.client
            .get(
                "/employee/leave",
                &[
                    ("status", filter.status.clone()),
                    ("leave_type_id", filter.leave_type_id.clone()),
                    ("year", filter.year.map(|y| y.to_string())),
                    ("page", filter.page.map(|p| p.to_string())),
                    ("per_page", filter.per_page.map(|p| p.to_string())),
                ],
            )
            .await
    }

    /// Fetch a single leave request
    ///
    /// # Errors
    /// Returns an error if the request is missing or fails.
    pub async fn leave_request(&self, leave_id: &str) -> Result<LeaveRequest, ApiError> {
        self.client.get(&format!("/employee/leave/{}", urlencoding::encode(leave_id)), &[]).await
    }

    /// Cancel a pending leave request
    ///
    /// # Errors
    /// Returns an error if the request cannot be cancelled.
    pub async fn cancel_leave(&self, leave_id: &str) -> Result<LeaveRequest, ApiError> {
        self.client.delete(&format!("/employee/leave/{}", urlencoding::encode(leave_id))).await
    }

    /// Holiday calendar for the user's location
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn holidays(&self, year: Option<i32>) -> Result<HolidayCalendar, ApiError> {
        self.client.get("/employee/holidays", &[("year", year.map(|y| y.to_string()))]).await
    }

    /// Record today's check-in
    ///
    /// # Errors
    /// Returns an error if already checked in or the request fails.
    pub async fn check_in(&self) -> Result<AttendanceRecord, ApiError> {
        self.client.post_empty("/employee/attendance/check-in").await
    }

    /// Record today's check-out
    ///
    /// # Errors
    /// Returns an error if not checked in or the request fails.
    pub async fn check_out(&self) -> Result<AttendanceRecord, ApiError> {
        self.client.post_empty("/employee/attendance/check-out").await
    }

    /// Paginated attendance history
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn attendance_history(
        &self,
        filter: &AttendanceHistoryFilter,
    ) -> Result<Page<AttendanceRecord>, ApiError> {
        self.client
            .get(
                "/employee/attendance",
                &[
                    ("start_date", filter.start_date.clone()),
                    ("end_date", filter.end_date.clone()),
                    ("month", filter.month.map(|m| m.to_string())),
                    ("year", filter.year.map(|y| y.to_string())),
                    ("page", filter.page.map(|p| p.to_string())),
                    ("per_page", filter.per_page.map(|p| p.to_string())),
                ],
            )
            .await
    }

    /// Monthly attendance rollup
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn attendance_summary(
        &self,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<AttendanceSummary, ApiError> {
        self.client
            .get(
                "/employee/attendance/summary",
                &[
                    ("month", month.map(|m| m.to_string())),
                    ("year", year.map(|y| y.to_string())),
                ],
            )
            .await
    }
}
