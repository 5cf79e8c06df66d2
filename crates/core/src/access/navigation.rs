//! Role-filtered sidebar navigation model

use nexuspulse_domain::Role;

/// A sidebar navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    /// Display label
    pub label: &'static str,
    /// Route path
    pub path: &'static str,
    /// Roles allowed to see this entry; `None` means visible to everyone
    pub required_roles: Option<&'static [Role]>,
}

const MANAGEMENT: &[Role] = &[Role::Manager, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// The full navigation tree, in display order
pub const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry { label: "Dashboard", path: "/dashboard", required_roles: None },
    NavEntry { label: "Apply Leave", path: "/dashboard/leave/apply", required_roles: None },
    NavEntry { label: "Leave History", path: "/dashboard/leave/history", required_roles: None },
    NavEntry {
        label: "Approvals",
        path: "/dashboard/manager/approvals",
        required_roles: Some(MANAGEMENT),
    },
    NavEntry {
        label: "Team",
        path: "/dashboard/manager/team",
        required_roles: Some(MANAGEMENT),
    },
    NavEntry { label: "User Management", path: "/dashboard/admin", required_roles: Some(ADMIN_ONLY) },
    NavEntry { label: "Holidays", path: "/dashboard/holidays", required_roles: None },
    NavEntry { label: "Attendance", path: "/dashboard/attendance", required_roles: None },
];

/// Entries visible to a user with the given role, preserving display order.
///
/// `None` (no authenticated user) yields an empty list; the sidebar only
/// renders inside the gated shell, so this is a belt check for callers that
/// render it against a snapshot directly.
#[must_use]
pub fn visible_entries(role: Option<Role>) -> Vec<NavEntry> {
    let Some(role) = role else {
        return Vec::new();
    };

    NAV_ENTRIES
        .iter()
        .filter(|entry| entry.required_roles.map_or(true, |roles| roles.contains(&role)))
        .copied()
        .collect()
}
