//! Holiday calendar entries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::Location;

/// A company or regional holiday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub is_mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Locations this holiday applies to; absent on employee-facing payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
}
