//! List and summary response envelopes
//!
//! The backend wraps list payloads in small envelopes whose item key varies
//! by endpoint (`requests`, `records`, `users`, ...). These types are
//! deserialize-only from the client's perspective; serialization always
//! emits `items`.

use serde::{Deserialize, Serialize};

use super::holiday::Holiday;
use super::leave::LeaveBalance;
use super::user::Location;

/// Paginated list envelope.
///
/// The item key differs per endpoint; aliases cover every paginated list
/// the backend returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(alias = "requests", alias = "records", alias = "users")]
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}

/// Response of `GET /employee/balance` and `GET /manager/team/{id}/balance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalanceSummary {
    pub year: i32,
    pub balances: Vec<LeaveBalance>,
}

/// Response of `GET /employee/holidays`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HolidayCalendar {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub holidays: Vec<Holiday>,
}
