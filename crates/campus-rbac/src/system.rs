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

//! Access control facade tying the pieces together

use crate::config::AccessConfig;
use crate::error::AccessResult;
use crate::guard::{GuardDecision, RouteGuard};
use crate::navigation::{NavItem, visible_items};
use crate::notify::Notifier;
use crate::rbac::{AllowList, AuditLogger, PermissionCache, PermissionSet, Role, has_any_of, has_minimum_role};
use crate::routes::RouteTable;
use crate::session::SessionState;
use std::sync::Arc;
use tracing::{debug, info};

/// Coordinates role checks, route guards, caching and auditing
#[derive(Debug, Clone)]
pub struct AccessControl {
    config: Arc<AccessConfig>,
    routes: Arc<RouteTable>,
    cache: Arc<PermissionCache>,
    audit_logger: Arc<AuditLogger>,
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new(AccessConfig::default())
    }
}

impl AccessControl {
    /// Create from configuration
    pub fn new(config: AccessConfig) -> Self {
        let routes = Arc::new(config.route_table());
        let audit_logger = Arc::new(AuditLogger::with_capacity(config.audit_capacity));

        info!(routes = routes.len(), unknown_role = ?config.unknown_role, "Access control initialized");

        Self {
            config: Arc::new(config),
            routes,
            cache: Arc::new(PermissionCache::new()),
            audit_logger,
        }
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn audit_logger(&self) -> &AuditLogger {
        &self.audit_logger
    }

    pub fn cache(&self) -> &PermissionCache {
        &self.cache
    }

    /// Establish a session, applying the configured unknown-role policy
    pub fn establish_session(&self, user_id: &str, raw_role: &str) -> AccessResult<SessionState> {
        SessionState::establish(user_id, raw_role, self.config.unknown_role)
    }

    pub fn has_minimum_role(&self, subject: Role, required: Role) -> bool {
        has_minimum_role(subject, required)
    }

    pub fn has_any_of(&self, subject: Role, allowed: &AllowList) -> bool {
        has_any_of(subject, allowed.roles())
    }

    /// Permission set for `subject`, memoized per role
    pub fn permissions_for(&self, subject: Role) -> PermissionSet {
        self.cache.get_or_derive(subject)
    }

    /// Menu entries visible to `subject`
    pub fn navigation_for(&self, subject: Role) -> Vec<NavItem> {
        visible_items(&self.permissions_for(subject))
    }

    /// Guard for `path`, or `None` when the path is unprotected.
    ///
    /// A fallback governed by the same rule as `path` would bounce the subject
    /// back to the route it was denied, so the login route is used instead.
    pub fn guard_for(&self, path: &str) -> Option<RouteGuard> {
        self.routes.lookup(path).map(|rule| {
            let mut redirect = rule.redirect_to.as_deref().unwrap_or(&self.config.default_redirect);
            if self.routes.lookup(redirect).is_some_and(|target| target.path == rule.path) {
                redirect = self.config.login_route.as_str();
            }
            RouteGuard::new(rule.allowed_roles.clone()).with_redirect(redirect).with_login_route(&self.config.login_route)
        })
    }

    /// Run the guard for `path` and record the decision
    pub fn check_route(&self, path: &str, session: &SessionState, notifier: &dyn Notifier) -> GuardDecision {
        let decision = match self.guard_for(path) {
            Some(guard) => guard.check(session, notifier),
            None => {
                debug!(path = %path, "Unprotected route");
                GuardDecision::Render
            }
        };

        self.audit_logger.log_guard_decision(session, path, &decision);
        decision
    }

    /// Like [`check_route`](Self::check_route), but a redirect becomes an error
    pub fn require_route(&self, path: &str, session: &SessionState, notifier: &dyn Notifier) -> AccessResult<()> {
        self.check_route(path, session, notifier).into_result()
    }
}
