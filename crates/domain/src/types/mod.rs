//! Wire types shared with the NexusPulse backend
//!
//! Field names and casing follow the backend's JSON payloads exactly; these
//! types round-trip through serde without renaming surprises.

pub mod attendance;
pub mod holiday;
pub mod leave;
pub mod responses;
pub mod user;

pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
pub use holiday::Holiday;
pub use leave::{ApplyLeaveRequest, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};
pub use responses::{HolidayCalendar, LeaveBalanceSummary, Page};
pub use user::{AuthResponse, EmployeeRef, Location, Role, User};
