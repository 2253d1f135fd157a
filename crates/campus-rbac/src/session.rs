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

//! Authenticated sessions and the session provider seam
//!
//! A [`Session`] carries the subject's role, fixed when the session is
//! established. Raw role strings from the auth backend are parsed here and
//! nowhere else.

use crate::error::{AccessError, AccessResult};
use crate::rbac::{Role, UnknownRolePolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// An authenticated subject and its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: String,
    user_id: String,
    role: Role,
    established_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for a subject whose role is already known
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            role,
            established_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

/// Authentication state as seen by guards and menus
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No signed-in subject
    #[default]
    Anonymous,

    /// Signed in with a recognized role
    Authenticated(Session),

    /// Signed in, but the backend reported a role outside the fixed set.
    /// Every protected route denies this state.
    Unrecognized { user_id: String, raw_role: String },
}

impl SessionState {
    /// Establish a session from the auth backend's raw role string
    pub fn establish(user_id: &str, raw_role: &str, policy: UnknownRolePolicy) -> AccessResult<Self> {
        match raw_role.parse::<Role>() {
            Ok(role) => {
                info!(user_id = %user_id, role = %role, "Session established");
                Ok(SessionState::Authenticated(Session::new(user_id, role)))
            }
            Err(err) => match policy {
                UnknownRolePolicy::Reject => {
                    warn!(user_id = %user_id, raw_role = %raw_role, "Rejecting session with unknown role");
                    Err(err)
                }
                UnknownRolePolicy::FailClosed => {
                    warn!(user_id = %user_id, raw_role = %raw_role, "Session has unknown role, denying all protected routes");
                    Ok(SessionState::Unrecognized {
                        user_id: user_id.to_string(),
                        raw_role: raw_role.to_string(),
                    })
                }
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, SessionState::Anonymous)
    }

    /// Role of the subject, if signed in with a recognized role
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated(session) => Some(session.role()),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(session) => Some(session.user_id()),
            SessionState::Unrecognized { user_id, .. } => Some(user_id),
        }
    }

    /// The recognized role, or the matching error for a caller that must have one
    pub fn require_role(&self) -> AccessResult<Role> {
        match self {
            SessionState::Anonymous => Err(AccessError::NotAuthenticated {
                message: "No active session".to_string(),
            }),
            SessionState::Authenticated(session) => Ok(session.role()),
            SessionState::Unrecognized { raw_role, .. } => Err(AccessError::UnknownRole { role: raw_role.clone() }),
        }
    }
}

impl From<Session> for SessionState {
    fn from(session: Session) -> Self {
        SessionState::Authenticated(session)
    }
}

/// Source of the current authentication state
pub trait SessionProvider {
    /// Current authentication state
    fn current_session(&self) -> SessionState;

    /// The subject's role, or `None` when absent
    fn current_role(&self) -> Option<Role> {
        self.current_session().role()
    }
}

impl SessionProvider for SessionState {
    fn current_session(&self) -> SessionState {
        self.clone()
    }
}

impl SessionProvider for Session {
    fn current_session(&self) -> SessionState {
        SessionState::Authenticated(self.clone())
    }

    fn current_role(&self) -> Option<Role> {
        Some(self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_establish_known_role() {
        let state = SessionState::establish("u-1", "finance", UnknownRolePolicy::Reject).unwrap();
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Finance));
        assert_eq!(state.user_id(), Some("u-1"));
        assert_eq!(state.current_role(), Some(Role::Finance));
    }

    #[test]
    fn test_establish_unknown_role_rejected() {
        let err = SessionState::establish("u-2", "owner", UnknownRolePolicy::Reject).unwrap_err();
        assert!(matches!(err, AccessError::UnknownRole { role } if role == "owner"));
    }

    #[test]
    fn test_establish_unknown_role_fail_closed() {
        let state = SessionState::establish("u-3", "owner", UnknownRolePolicy::FailClosed).unwrap();
        assert!(state.is_authenticated());
        assert_eq!(state.role(), None);
        assert!(matches!(state.require_role(), Err(AccessError::UnknownRole { .. })));
    }

    #[test]
    fn test_establish_requires_exact_role_name() {
        for raw in ["Admin", " admin ", " SuperAdmin "] {
            assert!(SessionState::establish("u-6", raw, UnknownRolePolicy::Reject).is_err(), "{raw:?}");

            let state = SessionState::establish("u-6", raw, UnknownRolePolicy::FailClosed).unwrap();
            assert_eq!(state.role(), None, "{raw:?}");
            assert!(matches!(state, SessionState::Unrecognized { .. }));
        }
    }

    #[test]
    fn test_anonymous_state() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.current_role(), None);
        assert!(matches!(state.require_role(), Err(AccessError::NotAuthenticated { .. })));
    }

    #[test]
    fn test_session_is_fixed() {
        let session = Session::new("u-4", Role::Teacher);
        assert_eq!(session.role(), Role::Teacher);
        assert!(!session.id().is_empty());
        assert_eq!(session.current_role(), Some(Role::Teacher));
        assert!(session.established_at() <= Utc::now());
    }

    #[test]
    fn test_session_state_serde() {
        let json = serde_json::to_value(SessionState::Anonymous).unwrap();
        assert_eq!(json["state"], "anonymous");

        let state = SessionState::Unrecognized {
            user_id: "u-5".to_string(),
            raw_role: "guest".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "unrecognized");
        assert_eq!(json["raw_role"], "guest");
    }
}
