//! Manager-facing backend endpoints

use std::sync::Arc;

use nexuspulse_domain::{
    ApplyLeaveRequest, AttendanceRecord, AttendanceSummary, LeaveBalanceSummary, LeaveRequest,
    Page, User,
};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::errors::ApiError;

/// Filters for the team leave history listing
#[derive(Debug, Clone, Default)]
pub struct TeamLeaveFilter {
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Filters for the team attendance listing
#[derive(Debug, Clone, Default)]
pub struct TeamAttendanceFilter {
    pub date: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub user_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request body for marking a team member's attendance
#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendanceRequest {
    pub user_id: String,
    pub date: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Response of `GET /manager/team/attendance/summary`; the per-member
/// entries carry the employee reference but not the month and year.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamAttendanceSummary {
    pub month: u32,
    pub year: i32,
    pub team_summary: Vec<AttendanceSummary>,
}

#[derive(Debug, Deserialize)]
struct TeamResponse {
    team_members: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct PendingLeavesResponse {
    requests: Vec<LeaveRequest>,
}

#[derive(Debug, Serialize)]
struct RejectLeaveRequest<'a> {
    rejection_reason: &'a str,
}

/// Client for `/manager` endpoints; requires an authenticated [`ApiClient`]
/// and a manager or admin role server-side
#[derive(Debug)]
pub struct ManagerApi {
    client: Arc<ApiClient>,
}

impl ManagerApi {
    /// Create the manager endpoint client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Active direct reports
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn team(&self) -> Result<Vec<User>, ApiError> {
        let response: TeamResponse = self.client.get("/manager/team", &[]).await?;
        Ok(response.team_members)
    }

    /// Pending leave requests from the team
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn pending_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        let response: PendingLeavesResponse =
            self.client.get("/manager/leave/pending", &[]).await?;
        Ok(response.requests)
    }

    /// Paginated team leave history
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn team_leave_history(
        &self,
        filter: &TeamLeaveFilter,
    ) -> Result<Page<LeaveRequest>, ApiError> {
        self.client
            .get(
                "/manager/leave/history",
                &[
                    ("status", filter.status.clone()),
                    ("user_id", filter.user_id.clone()),
                    ("year", filter.year.map(|y| y.to_string())),
                    ("page", filter.page.map(|p| p.to_string())),
                    ("per_page", filter.per_page.map(|p| p.to_string())),
                ],
            )
            .await
    }

    /// Approve a pending leave request
    ///
    /// # Errors
    /// Returns an error if the approval is rejected or fails.
    pub async fn approve_leave(&self, leave_id: &str) -> Result<LeaveRequest, ApiError> {
        self.client
            .put_empty(&format!("/manager/leave/{}/approve", urlencoding::encode(leave_id)))
            .await
    }

    /// Reject a pending leave request with a reason
    ///
    /// # Errors
    /// Returns an error if the rejection fails.
    pub async fn reject_leave(
        &self,
        leave_id: &str,
        rejection_reason: &str,
    ) -> Result<LeaveRequest, ApiError> {
        self.client
            .put(
                &format!("/manager/leave/{}/reject", urlencoding::encode(leave_id)),
                &RejectLeaveRequest { rejection_reason },
            )
            .await
    }

    /// Apply for leave on behalf of a report
    ///
    /// # Errors
    /// Returns an error if the request is invalid or fails.
    pub async fn apply_leave_on_behalf(
        &self,
        request: &ApplyLeaveRequest,
    ) -> Result<LeaveRequest, ApiError> {
        self.client.post("/manager/leave/apply", request).await
    }

    /// Leave balances for a specific report
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn employee_balance(
        &self,
        user_id: &str,
        year: Option<i32>,
    ) -> Result<LeaveBalanceSummary, ApiError> {
        self.client
            .get(
                &format!("/manager/team/{}/balance", urlencoding::encode(user_id)),
                &[("year", year.map(|y| y.to_string()))],
            )
            .await
    }

    /// Paginated team attendance
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn team_attendance(
        &self,
        filter: &TeamAttendanceFilter,
    ) -> Result<Page<AttendanceRecord>, ApiError> {
        self.client
            .get(
                "/manager/team/attendance",
                &[
                    ("date", filter.date.clone()),
                    ("month", filter.month.map(|m| m.to_string())),
                    ("year", filter.year.map(|y| y.to_string())),
                    ("user_id", filter.user_id.clone()),
                    ("page", filter.page.map(|p| p.to_string())),
                    ("per_page", filter.per_page.map(|p| p.to_string())),
                ],
            )
            .await
    }

    /// Per-member attendance rollups for a month
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn team_attendance_summary(
        &self,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<TeamAttendanceSummary, ApiError> {
        self.client
            .get(
                "/manager/team/attendance/summary",
                &[
                    ("month", month.map(|m| m.to_string())),
                    ("year", year.map(|y| y.to_string())),
                ],
            )
            .await
    }

    /// Mark or correct a team member's attendance for a day
    ///
    /// # Errors
    /// Returns an error if the request is invalid or fails.
    pub async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, ApiError> {
        self.client.post("/manager/attendance/mark", request).await
    }
}
