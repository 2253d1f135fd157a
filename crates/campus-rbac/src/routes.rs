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

//! Protected dashboard routes

use crate::rbac::{AllowList, Role};
use serde::{Deserialize, Serialize};

/// Access rule for one route and everything beneath it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Route path, starting with `/`
    pub path: String,

    /// Roles admitted, extended upward by rank
    pub allowed_roles: AllowList,

    /// Fallback for denied subjects; the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl RouteRule {
    pub fn new(path: impl Into<String>, allowed_roles: AllowList) -> Self {
        Self {
            path: path.into(),
            allowed_roles,
            redirect_to: None,
        }
    }

    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    /// Whether `path` is this route or lies beneath it
    pub(crate) fn covers(&self, path: &str) -> bool {
        let base = self.path.trim_end_matches('/');
        if base.is_empty() {
            return path.starts_with('/');
        }
        match path.strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Table of protected routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::default_routes()
    }
}

impl RouteTable {
    /// Empty table; nothing is protected
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Routes of the center dashboard
    pub fn default_routes() -> Self {
        let only = |role: Role| AllowList::from_roles([role]);

        Self {
            rules: vec![
                RouteRule::new("/dashboard", only(Role::Student)),
                RouteRule::new("/students", AllowList::staff()),
                RouteRule::new("/books", only(Role::Teacher)),
                RouteRule::new("/attendance", only(Role::Teacher)),
                RouteRule::new("/exams", only(Role::Teacher)),
                RouteRule::new("/finance", only(Role::Finance)),
                RouteRule::new("/reports", only(Role::Controller)),
                RouteRule::new("/teachers", AllowList::from_roles([Role::Admin, Role::SuperAdmin])),
                RouteRule::new("/branches", only(Role::SuperAdmin)),
                RouteRule::new("/settings", only(Role::SuperAdmin)),
            ],
        }
    }

    /// Add a rule, replacing any rule for the same path
    pub fn upsert(&mut self, rule: RouteRule) {
        match self.rules.iter_mut().find(|existing| existing.path == rule.path) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Most specific rule covering `path`
    pub fn lookup(&self, path: &str) -> Option<&RouteRule> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.rules.iter().filter(|rule| rule.covers(path)).max_by_key(|rule| rule.path.trim_end_matches('/').len())
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_nested_lookup() {
        let table = RouteTable::default_routes();
        assert_eq!(table.lookup("/students").unwrap().path, "/students");
        assert_eq!(table.lookup("/students/42/edit").unwrap().path, "/students");
        assert_eq!(table.lookup("/finance?month=3").unwrap().path, "/finance");
        assert!(table.lookup("/studentsx").is_none());
        assert!(table.lookup("/login").is_none());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut table = RouteTable::default_routes();
        table.upsert(RouteRule::new("/students/payments", AllowList::from_roles([Role::Finance])).with_redirect("/students"));

        let rule = table.lookup("/students/payments/7").unwrap();
        assert_eq!(rule.path, "/students/payments");
        assert_eq!(rule.redirect_to.as_deref(), Some("/students"));
        assert_eq!(table.lookup("/students/7").unwrap().path, "/students");
    }

    #[test]
    fn test_upsert_replaces_existing_path() {
        let mut table = RouteTable::default_routes();
        let before = table.len();
        table.upsert(RouteRule::new("/reports", AllowList::from_roles([Role::Admin])));

        assert_eq!(table.len(), before);
        assert_eq!(table.lookup("/reports").unwrap().allowed_roles.minimum(), Some(Role::Admin));
    }

    #[test]
    fn test_default_route_gates() {
        let table = RouteTable::default_routes();
        let admits = |path: &str, role: Role| table.lookup(path).unwrap().allowed_roles.admits(role);

        assert!(admits("/dashboard", Role::Student));
        assert!(!admits("/students", Role::Student));
        assert!(admits("/students", Role::Teacher));
        assert!(!admits("/finance", Role::Teacher));
        assert!(admits("/finance", Role::Controller));
        assert!(!admits("/teachers", Role::Controller));
        assert!(admits("/teachers", Role::Admin));
        assert!(!admits("/branches", Role::Admin));
        assert!(admits("/settings", Role::SuperAdmin));
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup("/dashboard").is_none());
    }
}
