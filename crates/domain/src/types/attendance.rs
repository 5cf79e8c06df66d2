//! Attendance records and summaries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::EmployeeRef;

/// Attendance status for a single day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    OnLeave,
}

/// One day's attendance for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present on team-facing endpoints only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeRef>,
}

/// Monthly attendance rollup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceSummary {
    pub total_days: u32,
    pub present: u32,
    pub absent: u32,
    pub half_day: u32,
    pub on_leave: u32,
    pub total_work_hours: f64,
    /// Absent on per-member entries of the team summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_status_uses_snake_case() {
        assert_eq!(serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(), "\"half_day\"");
        assert_eq!(
            serde_json::from_str::<AttendanceStatus>("\"on_leave\"").unwrap(),
            AttendanceStatus::OnLeave
        );
    }
}
