// Campus RBAC
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Route guard enforcing an allow-list before a protected view renders

use crate::error::{AccessError, AccessResult};
use crate::notify::{DenialNotice, Notifier};
use crate::rbac::AllowList;
use crate::session::SessionState;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default route for signed-out subjects
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Default route for signed-in subjects who are turned away
pub const DEFAULT_REDIRECT_ROUTE: &str = "/dashboard";

/// Why a guard turned the subject away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NotAuthenticated,
    AccessDenied,
    /// Session role outside the fixed set; the subject must sign in again
    UnrecognizedRole,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the protected view unchanged
    Render,
    /// Navigate elsewhere instead
    Redirect { to: String, reason: DenyReason },
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    /// Redirect target, if any
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Render => None,
            GuardDecision::Redirect { to, .. } => Some(to),
        }
    }

    /// Convert a redirect into the matching error
    pub fn into_result(self) -> AccessResult<()> {
        match self {
            GuardDecision::Render => Ok(()),
            GuardDecision::Redirect {
                to,
                reason: DenyReason::NotAuthenticated,
            } => Err(AccessError::NotAuthenticated {
                message: format!("Sign in required, redirecting to {}", to),
            }),
            GuardDecision::Redirect {
                to,
                reason: DenyReason::AccessDenied,
            } => Err(AccessError::AccessDenied {
                message: format!("Insufficient role, redirecting to {}", to),
            }),
            GuardDecision::Redirect {
                to,
                reason: DenyReason::UnrecognizedRole,
            } => Err(AccessError::NotAuthenticated {
                message: format!("Session role not recognized, sign in again at {}", to),
            }),
        }
    }
}

/// Guard wrapping one protected view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: AllowList,
    redirect_to: String,
    login_route: String,
}

impl RouteGuard {
    /// Guard with the default login and fallback routes
    pub fn new(allowed: AllowList) -> Self {
        Self {
            allowed,
            redirect_to: DEFAULT_REDIRECT_ROUTE.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }

    /// Override the fallback for denied subjects
    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = redirect_to.into();
        self
    }

    /// Override the login route
    pub fn with_login_route(mut self, login_route: impl Into<String>) -> Self {
        self.login_route = login_route.into();
        self
    }

    pub fn allowed(&self) -> &AllowList {
        &self.allowed
    }

    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Decide whether the view renders.
    ///
    /// Signed-out subjects go to the login route without any role check.
    /// Sessions with an unrecognized role are rejected: one notice, then the
    /// login route. Signed-in subjects outside the allow-list get exactly one
    /// notice and go to the fallback route.
    pub fn check(&self, session: &SessionState, notifier: &dyn Notifier) -> GuardDecision {
        let role = match session {
            SessionState::Anonymous => {
                debug!(login_route = %self.login_route, "Not authenticated, redirecting to login");
                return GuardDecision::Redirect {
                    to: self.login_route.clone(),
                    reason: DenyReason::NotAuthenticated,
                };
            }
            SessionState::Unrecognized { user_id, raw_role } => {
                warn!(user_id = %user_id, raw_role = %raw_role, login_route = %self.login_route, "Unrecognized role, forcing sign-in");
                notifier.notify(DenialNotice::unrecognized_role());
                return GuardDecision::Redirect {
                    to: self.login_route.clone(),
                    reason: DenyReason::UnrecognizedRole,
                };
            }
            SessionState::Authenticated(session) => session.role(),
        };

        if self.allowed.admits(role) {
            debug!(role = %role, allowed = %self.allowed, "Access granted");
            return GuardDecision::Render;
        }

        warn!(
            user_id = ?session.user_id(),
            role = %role,
            allowed = %self.allowed,
            redirect_to = %self.redirect_to,
            "Access denied"
        );
        notifier.notify(DenialNotice::access_denied());

        GuardDecision::Redirect {
            to: self.redirect_to.clone(),
            reason: DenyReason::AccessDenied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockNotifier;
    use crate::rbac::Role;
    use crate::session::Session;

    fn session(role: Role) -> SessionState {
        Session::new("user-1", role).into()
    }

    #[test]
    fn test_student_denied_on_staff_route() {
        let guard = RouteGuard::new(AllowList::staff());
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().withf(|notice| notice.title == "Access Denied").times(1).return_const(());

        let decision = guard.check(&session(Role::Student), &notifier);
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/dashboard".to_string(),
                reason: DenyReason::AccessDenied,
            }
        );
    }

    #[test]
    fn test_admin_renders_admin_route() {
        let guard = RouteGuard::new(AllowList::from_roles([Role::Admin, Role::SuperAdmin]));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        assert!(guard.check(&session(Role::Admin), &notifier).is_render());
    }

    #[test]
    fn test_anonymous_goes_to_login_without_notice() {
        let guard = RouteGuard::new(AllowList::new()).with_login_route("/sign-in");
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let decision = guard.check(&SessionState::Anonymous, &notifier);
        assert_eq!(decision.redirect_target(), Some("/sign-in"));
        assert!(matches!(decision.into_result(), Err(AccessError::NotAuthenticated { .. })));
    }

    #[test]
    fn test_unrecognized_role_sent_to_login() {
        let guard = RouteGuard::new(AllowList::at_least(Role::Student)).with_redirect("/dashboard");
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().withf(|notice| notice.title == "Sign-in Required").times(1).return_const(());

        let state = SessionState::Unrecognized {
            user_id: "user-2".to_string(),
            raw_role: "owner".to_string(),
        };
        let decision = guard.check(&state, &notifier);
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/login".to_string(),
                reason: DenyReason::UnrecognizedRole,
            }
        );
        assert!(matches!(decision.into_result(), Err(AccessError::NotAuthenticated { .. })));
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_value(GuardDecision::Redirect {
            to: "/login".to_string(),
            reason: DenyReason::NotAuthenticated,
        })
        .unwrap();
        assert_eq!(json["decision"], "redirect");
        assert_eq!(json["reason"], "not_authenticated");
    }
}
