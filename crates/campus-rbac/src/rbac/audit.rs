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

//! Audit logging for guard decisions

use crate::guard::{DenyReason, GuardDecision};
use crate::rbac::roles::Role;
use crate::session::SessionState;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;

/// Default number of events retained
pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

/// Audit event result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditResult {
    /// View rendered
    Granted,
    /// Signed-in subject turned away
    Denied,
    /// Signed-out subject sent to login
    LoginRequired,
    /// Session with an unrecognized role sent back to login
    SessionRejected,
}

/// Audit event entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID
    pub id: String,

    /// Event timestamp
    pub timestamp: DateTime<Utc>,

    /// Subject, when signed in
    pub user_id: Option<String>,

    /// Recognized role of the subject
    pub role: Option<Role>,

    /// Route being entered
    pub path: String,

    /// Event result
    pub result: AuditResult,
}

impl AuditEvent {
    /// Build an event from a guard decision
    pub fn from_decision(session: &SessionState, path: &str, decision: &GuardDecision) -> Self {
        let result = match decision {
            GuardDecision::Render => AuditResult::Granted,
            GuardDecision::Redirect {
                reason: DenyReason::AccessDenied,
                ..
            } => AuditResult::Denied,
            GuardDecision::Redirect {
                reason: DenyReason::NotAuthenticated,
                ..
            } => AuditResult::LoginRequired,
            GuardDecision::Redirect {
                reason: DenyReason::UnrecognizedRole,
                ..
            } => AuditResult::SessionRejected,
        };

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_id: session.user_id().map(str::to_string),
            role: session.role(),
            path: path.to_string(),
            result,
        }
    }
}

/// Bounded in-memory audit log; the oldest events are dropped first
#[derive(Debug)]
pub struct AuditLogger {
    events: RwLock<VecDeque<AuditEvent>>,
    capacity: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }

    /// Create an audit logger keeping at most `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_AUDIT_CAPACITY))),
            capacity,
        }
    }

    /// Record an event
    pub fn log_event(&self, event: AuditEvent) {
        info!(
            event_id = %event.id,
            user_id = ?event.user_id,
            path = %event.path,
            result = ?event.result,
            "Audit event"
        );

        let mut events = self.events.write();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Record a guard decision
    pub fn log_guard_decision(&self, session: &SessionState, path: &str, decision: &GuardDecision) {
        self.log_event(AuditEvent::from_decision(session, path, decision));
    }

    /// Up to `limit` most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.events.read().iter().rev().take(limit).cloned().collect()
    }

    /// Every retained denial, oldest first
    pub fn denials(&self) -> Vec<AuditEvent> {
        self.events.read().iter().filter(|event| event.result == AuditResult::Denied).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn denied() -> GuardDecision {
        GuardDecision::Redirect {
            to: "/dashboard".to_string(),
            reason: DenyReason::AccessDenied,
        }
    }

    #[test]
    fn test_event_from_decision() {
        let session: SessionState = Session::new("user-7", Role::Teacher).into();
        let event = AuditEvent::from_decision(&session, "/finance", &denied());

        assert_eq!(event.user_id.as_deref(), Some("user-7"));
        assert_eq!(event.role, Some(Role::Teacher));
        assert_eq!(event.result, AuditResult::Denied);

        let event = AuditEvent::from_decision(&SessionState::Anonymous, "/finance", &GuardDecision::Redirect {
            to: "/login".to_string(),
            reason: DenyReason::NotAuthenticated,
        });
        assert_eq!(event.user_id, None);
        assert_eq!(event.result, AuditResult::LoginRequired);

        let unrecognized = SessionState::Unrecognized {
            user_id: "user-9".to_string(),
            raw_role: "owner".to_string(),
        };
        let event = AuditEvent::from_decision(&unrecognized, "/dashboard", &GuardDecision::Redirect {
            to: "/login".to_string(),
            reason: DenyReason::UnrecognizedRole,
        });
        assert_eq!(event.user_id.as_deref(), Some("user-9"));
        assert_eq!(event.role, None);
        assert_eq!(event.result, AuditResult::SessionRejected);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let logger = AuditLogger::with_capacity(2);
        let session: SessionState = Session::new("user-8", Role::Student).into();

        logger.log_guard_decision(&session, "/a", &GuardDecision::Render);
        logger.log_guard_decision(&session, "/b", &denied());
        logger.log_guard_decision(&session, "/c", &GuardDecision::Render);

        assert_eq!(logger.len(), 2);
        let recent: Vec<String> = logger.recent(10).into_iter().map(|event| event.path).collect();
        assert_eq!(recent, vec!["/c", "/b"]);
        assert_eq!(logger.denials().len(), 1);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let logger = AuditLogger::with_capacity(0);
        assert_eq!(logger.capacity(), 1);
        logger.log_guard_decision(&SessionState::Anonymous, "/x", &GuardDecision::Render);
        logger.log_guard_decision(&SessionState::Anonymous, "/y", &GuardDecision::Render);
        assert_eq!(logger.len(), 1);

        logger.clear();
        assert!(logger.is_empty());
    }
}
