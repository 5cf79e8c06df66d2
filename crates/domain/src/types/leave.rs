//! Leave types, balances, and requests

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::EmployeeRef;

/// Status of a leave request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// Category of leave (annual, sick, ...) as configured server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveType {
    pub id: String,
    pub name: String,
    pub code: String,
    pub requires_approval: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days_per_request: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-user, per-year allocation for one leave type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalance {
    pub id: String,
    pub user_id: String,
    pub leave_type_id: String,
    pub leave_type: LeaveType,
    pub year: i32,
    pub total_allocated: f64,
    pub used: f64,
    pub pending: f64,
    pub available: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A leave request as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveRequest {
    pub id: String,
    pub user_id: String,
    pub leave_type_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: f64,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_by_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present on team-facing endpoints only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeRef>,
}

/// Request body for applying for leave.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplyLeaveRequest {
    pub leave_type_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    /// Set by managers applying on behalf of a report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LeaveStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(
            serde_json::from_str::<LeaveStatus>("\"cancelled\"").unwrap(),
            LeaveStatus::Cancelled
        );
    }

    #[test]
    fn apply_request_omits_absent_user_id() {
        let request = ApplyLeaveRequest {
            leave_type_id: "lt-1".to_string(),
            start_date: "2024-06-03".parse().unwrap(),
            end_date: "2024-06-04".parse().unwrap(),
            reason: "family event".to_string(),
            user_id: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["start_date"], "2024-06-03");
    }
}
