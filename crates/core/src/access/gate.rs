//! Authorization gate for protected routes

use nexuspulse_domain::Role;

use crate::session::service::SessionSnapshot;

/// Route the unauthenticated are redirected to
pub const ENTRY_ROUTE: &str = "/";

/// Route role-denied users are redirected to
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Outcome of gating a protected route against the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session state is still loading; render nothing yet
    Waiting,
    /// No session; redirect to [`ENTRY_ROUTE`]
    RedirectToEntry,
    /// Authenticated but lacking a required role; redirect to
    /// [`DASHBOARD_ROUTE`]
    RedirectToDashboard,
    /// Render the protected content
    Admit,
}

/// Decides whether protected content renders for the current session.
///
/// The gate never acts while the session is loading: the brief window
/// between app start and store hydration must not bounce a returning user
/// to the entry route.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Gate a route that only requires authentication
    #[must_use]
    pub fn decide(&self, session: &SessionSnapshot) -> GateDecision {
        if session.loading {
            return GateDecision::Waiting;
        }
        if !session.is_authenticated() {
            return GateDecision::RedirectToEntry;
        }
        GateDecision::Admit
    }

    /// Gate a route that additionally requires one of `required_roles`
    ///
    /// An empty role list admits any authenticated user.
    #[must_use]
    pub fn decide_route(&self, session: &SessionSnapshot, required_roles: &[Role]) -> GateDecision {
        match self.decide(session) {
            GateDecision::Admit => {}
            decision => return decision,
        }

        if required_roles.is_empty() {
            return GateDecision::Admit;
        }

        let allowed = session
            .user
            .as_ref()
            .is_some_and(|user| required_roles.contains(&user.role));
        if allowed {
            GateDecision::Admit
        } else {
            GateDecision::RedirectToDashboard
        }
    }
}

#[cfg(test)]
mod tests {
    use nexuspulse_domain::User;

    use super::*;

    fn snapshot(user: Option<User>, loading: bool) -> SessionSnapshot {
        let access_token = user.as_ref().map(|_| "token".to_string());
        SessionSnapshot { user, access_token, loading }
    }

    fn user_with_role(role: Role) -> User {
        let now = "2024-03-01T09:00:00Z".parse().unwrap();
        User {
            id: "u-1".to_string(),
            email: "jamie@nexuspulse.dev".to_string(),
            first_name: "Jamie".to_string(),
            last_name: "Reyes".to_string(),
            full_name: "Jamie Reyes".to_string(),
            role,
            manager_id: None,
            location_id: "loc-1".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn waits_while_session_is_loading() {
        let gate = AuthorizationGate;
        let session = snapshot(None, true);

        assert_eq!(gate.decide(&session), GateDecision::Waiting);
        assert_eq!(gate.decide_route(&session, &[Role::Admin]), GateDecision::Waiting);
    }

    #[test]
    fn redirects_settled_unauthenticated_to_entry() {
        let gate = AuthorizationGate;
        let session = snapshot(None, false);

        assert_eq!(gate.decide(&session), GateDecision::RedirectToEntry);
    }

    #[test]
    fn admits_authenticated_without_role_requirement() {
        let gate = AuthorizationGate;
        let session = snapshot(Some(user_with_role(Role::Employee)), false);

        assert_eq!(gate.decide(&session), GateDecision::Admit);
        assert_eq!(gate.decide_route(&session, &[]), GateDecision::Admit);
    }

    #[test]
    fn redirects_missing_role_to_dashboard() {
        let gate = AuthorizationGate;
        let session = snapshot(Some(user_with_role(Role::Employee)), false);

        assert_eq!(
            gate.decide_route(&session, &[Role::Manager, Role::Admin]),
            GateDecision::RedirectToDashboard
        );
    }

    #[test]
    fn admits_matching_role() {
        let gate = AuthorizationGate;
        let session = snapshot(Some(user_with_role(Role::Manager)), false);

        assert_eq!(
            gate.decide_route(&session, &[Role::Manager, Role::Admin]),
            GateDecision::Admit
        );
    }
}
