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

//! Configuration for access control

use crate::error::{AccessError, AccessResult};
use crate::guard::{DEFAULT_LOGIN_ROUTE, DEFAULT_REDIRECT_ROUTE};
use crate::rbac::{DEFAULT_AUDIT_CAPACITY, UnknownRolePolicy};
use crate::routes::{RouteRule, RouteTable};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "CAMPUS_ACCESS_CONFIG";

/// Configuration for guards, sessions and the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Where signed-out subjects are sent
    pub login_route: String,

    /// Where signed-in subjects are sent when denied
    pub default_redirect: String,

    /// Handling of role strings outside the fixed set
    pub unknown_role: UnknownRolePolicy,

    /// Number of audit events retained in memory
    pub audit_capacity: usize,

    /// Extra or replacement route rules
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteRule>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            default_redirect: DEFAULT_REDIRECT_ROUTE.to_string(),
            unknown_role: UnknownRolePolicy::default(),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            routes: Vec::new(),
        }
    }
}

impl AccessConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> AccessResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> AccessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> AccessResult<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> AccessResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> AccessResult<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CAMPUS_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AccessResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(route) = lookup("CAMPUS_LOGIN_ROUTE") {
            self.login_route = route;
        }
        if let Some(route) = lookup("CAMPUS_DEFAULT_REDIRECT") {
            self.default_redirect = route;
        }
        if let Some(policy) = lookup("CAMPUS_UNKNOWN_ROLE") {
            self.unknown_role = policy.parse()?;
        }
        if let Some(capacity) = lookup("CAMPUS_AUDIT_CAPACITY") {
            self.audit_capacity = capacity.parse().map_err(|_| AccessError::InvalidConfig {
                message: format!("Invalid audit capacity: {}", capacity),
            })?;
        }
        Ok(())
    }

    /// Resolve from an explicit file, then `CAMPUS_ACCESS_CONFIG`, then defaults;
    /// environment overrides apply last.
    pub fn resolve(config_path: Option<PathBuf>) -> AccessResult<Self> {
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
            Self::load_from_file(env_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Check routes and capacity
    pub fn validate(&self) -> AccessResult<()> {
        let invalid = |message: String| Err(AccessError::InvalidConfig { message });

        for route in [&self.login_route, &self.default_redirect] {
            if !route.starts_with('/') {
                return invalid(format!("Route must start with '/': {}", route));
            }
        }
        if self.login_route == self.default_redirect {
            return invalid(format!("Login route and default redirect must differ: {}", self.login_route));
        }
        if self.audit_capacity == 0 {
            return invalid("Audit capacity must be greater than zero".to_string());
        }
        for rule in &self.routes {
            if !rule.path.starts_with('/') {
                return invalid(format!("Route must start with '/': {}", rule.path));
            }
            if let Some(redirect) = &rule.redirect_to {
                if !redirect.starts_with('/') {
                    return invalid(format!("Redirect must start with '/': {}", redirect));
                }
                if *redirect == self.login_route {
                    return invalid(format!("Redirect for {} must differ from the login route: {}", rule.path, redirect));
                }
                if rule.covers(redirect) {
                    return invalid(format!("Redirect for {} points back into the same route: {}", rule.path, redirect));
                }
            }
        }
        Ok(())
    }

    /// Default route table with the configured rules applied
    pub fn route_table(&self) -> RouteTable {
        let mut table = RouteTable::default_routes();
        for rule in &self.routes {
            table.upsert(rule.clone());
        }
        table
    }
}
