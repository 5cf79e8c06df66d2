//! Admin-facing backend endpoints

use std::sync::Arc;

use nexuspulse_domain::{EmployeeRef, Holiday, LeaveBalance, Location, Page, Role, User};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::errors::ApiError;

/// Filters for the user listing
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub role: Option<Role>,
    pub location_id: Option<String>,
}

/// Request body for creating a user
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// Partial update for a user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Request body for creating a location
#[derive(Debug, Clone, Serialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub country: String,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Request body for creating or updating a holiday
#[derive(Debug, Clone, Serialize)]
pub struct HolidayRequest {
    pub name: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mandatory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Filters for the organization-wide attendance report
#[derive(Debug, Clone, Default)]
pub struct AttendanceReportFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub location_id: Option<String>,
}

/// Filters for the attendance defaulter listing
#[derive(Debug, Clone, Default)]
pub struct DefaulterFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub min_absent_days: Option<u32>,
}

/// Employee reference in report rows, including the office location name
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReportEmployee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
}

/// One employee's row in the organization-wide attendance report
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttendanceReportEntry {
    pub employee: ReportEmployee,
    pub total_days: u32,
    pub present: u32,
    pub absent: u32,
    pub half_day: u32,
    pub on_leave: u32,
    pub total_work_hours: f64,
}

/// Response of `GET /admin/attendance/reports`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttendanceReport {
    pub month: u32,
    pub year: i32,
    pub report: Vec<AttendanceReportEntry>,
}

/// One employee flagged for excessive absence
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Defaulter {
    pub employee: EmployeeRef,
    pub absent_days: u32,
}

/// Response of `GET /admin/attendance/defaulters`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AttendanceDefaulters {
    pub month: u32,
    pub year: i32,
    pub defaulters: Vec<Defaulter>,
}

/// Request body for allocating a leave balance
#[derive(Debug, Clone, Serialize)]
pub struct AllocateBalanceRequest {
    pub user_id: String,
    pub leave_type_id: String,
    pub year: i32,
    pub total_allocated: f64,
}

/// Confirmation body the backend returns for deletes and assignments
#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct HolidaysResponse {
    holidays: Vec<Holiday>,
}

#[derive(Debug, Serialize)]
struct AssignHolidaysRequest<'a> {
    holiday_ids: &'a [String],
}

/// Client for `/admin` endpoints; requires an authenticated [`ApiClient`]
/// and an admin role server-side
#[derive(Debug)]
pub struct AdminApi {
    client: Arc<ApiClient>,
}

impl AdminApi {
    /// Create the admin endpoint client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Paginated, filterable user listing
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn users(&self, filter: &UserFilter) -> Result<Page<User>, ApiError> {
        self.client
            .get(
                "/admin/users",
                &[
                    ("page", filter.page.map(|p| p.to_string())),
                    ("per_page", filter.per_page.map(|p| p.to_string())),
                    ("search", filter.search.clone()),
                    ("role", filter.role.map(|r| r.as_str().to_string())),
                    ("location_id", filter.location_id.clone()),
                ],
            )
            .await
    }

    /// Create a user
    ///
    /// # Errors
    /// Returns an error if the email is taken or the request fails.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        self.client.post("/admin/users", request).await
    }

    /// Update a user
    ///
    /// # Errors
    /// Returns an error if the user is missing or the request fails.
    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> Result<User, ApiError> {
        self.client
            .put(&format!("/admin/users/{}", urlencoding::encode(user_id)), request)
            .await
    }

    /// Deactivate a user
    ///
    /// # Errors
    /// Returns an error if the user is missing or the request fails.
    pub async fn deactivate_user(&self, user_id: &str) -> Result<(), ApiError> {
        let _: Acknowledgement =
            self.client.delete(&format!("/admin/users/{}", urlencoding::encode(user_id))).await?;
        Ok(())
    }

    /// All office locations
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        let response: LocationsResponse = self.client.get("/admin/locations", &[]).await?;
        Ok(response.locations)
    }

    /// Create a location
    ///
    /// # Errors
    /// Returns an error if the name is taken or the request fails.
    pub async fn create_location(
        &self,
        request: &CreateLocationRequest,
    ) -> Result<Location, ApiError> {
        self.client.post("/admin/locations", request).await
    }

    /// Holidays for a year, with their assigned locations
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn holidays(&self, year: Option<i32>) -> Result<Vec<Holiday>, ApiError> {
        let response: HolidaysResponse = self
            .client
            .get("/admin/holidays", &[("year", year.map(|y| y.to_string()))])
            .await?;
        Ok(response.holidays)
    }

    /// Create a holiday
    ///
    /// # Errors
    /// Returns an error if the request is invalid or fails.
    pub async fn create_holiday(&self, request: &HolidayRequest) -> Result<Holiday, ApiError> {
        self.client.post("/admin/holidays", request).await
    }

    /// Update a holiday
    ///
    /// # Errors
    /// Returns an error if the holiday is missing or the request fails.
    pub async fn update_holiday(
        &self,
        holiday_id: &str,
        request: &HolidayRequest,
    ) -> Result<Holiday, ApiError> {
        self.client
            .put(&format!("/admin/holidays/{}", urlencoding::encode(holiday_id)), request)
            .await
    }

    /// Delete a holiday
    ///
    /// # Errors
    /// Returns an error if the holiday is missing or the request fails.
    pub async fn delete_holiday(&self, holiday_id: &str) -> Result<(), ApiError> {
        let _: Acknowledgement = self
            .client
            .delete(&format!("/admin/holidays/{}", urlencoding::encode(holiday_id)))
            .await?;
        Ok(())
    }

    /// Assign holidays to a location's calendar
    ///
    /// # Errors
    /// Returns an error if the location is missing or the request fails.
    pub async fn assign_holidays_to_location(
        &self,
        location_id: &str,
        holiday_ids: &[String],
    ) -> Result<(), ApiError> {
        let _: Acknowledgement = self
            .client
            .post(
                &format!("/admin/locations/{}/holidays", urlencoding::encode(location_id)),
                &AssignHolidaysRequest { holiday_ids },
            )
            .await?;
        Ok(())
    }

    /// Organization-wide attendance rollup for a month
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn attendance_reports(
        &self,
        filter: &AttendanceReportFilter,
    ) -> Result<AttendanceReport, ApiError> {
        self.client
            .get(
                "/admin/attendance/reports",
                &[
                    ("month", filter.month.map(|m| m.to_string())),
                    ("year", filter.year.map(|y| y.to_string())),
                    ("location_id", filter.location_id.clone()),
                ],
            )
            .await
    }

    /// Employees whose monthly absences reach the threshold
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn attendance_defaulters(
        &self,
        filter: &DefaulterFilter,
    ) -> Result<AttendanceDefaulters, ApiError> {
        self.client
            .get(
                "/admin/attendance/defaulters",
                &[
                    ("month", filter.month.map(|m| m.to_string())),
                    ("year", filter.year.map(|y| y.to_string())),
                    ("min_absent_days", filter.min_absent_days.map(|d| d.to_string())),
                ],
            )
            .await
    }

    /// Allocate a per-user leave balance for a year
    ///
    /// # Errors
    /// Returns an error if the allocation already exists or the request
    /// fails.
    pub async fn allocate_leave_balance(
        &self,
        request: &AllocateBalanceRequest,
    ) -> Result<LeaveBalance, ApiError> {
        self.client.post("/admin/leave-balances/allocate", request).await
    }
}
