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

//! Role definitions and the fixed role hierarchy
//!
//! Roles form a closed, totally ordered set:
//! `student < teacher < finance < controller < admin < superadmin`.

use crate::error::{AccessError, AccessResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege level held by an authenticated subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Role {
    /// Enrolled student
    Student = 0,
    /// Teaching staff
    Teacher = 1,
    /// Finance office
    Finance = 2,
    /// Academic controller
    Controller = 3,
    /// Branch administrator
    Admin = 4,
    /// Full system access
    SuperAdmin = 5,
}

impl Role {
    /// All roles, least privileged first
    pub const ALL: [Role; 6] = [Role::Student, Role::Teacher, Role::Finance, Role::Controller, Role::Admin, Role::SuperAdmin];

    /// Position of this role in the hierarchy
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Finance => "finance",
            Role::Controller => "controller",
            Role::Admin => "admin",
            Role::SuperAdmin => "superadmin",
        }
    }

    /// Human-readable name
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Finance => "Finance",
            Role::Controller => "Controller",
            Role::Admin => "Administrator",
            Role::SuperAdmin => "Super Administrator",
        }
    }

    /// Look up a role by rank
    pub fn from_rank(rank: u8) -> Option<Role> {
        Role::ALL.get(rank as usize).copied()
    }

    /// Check if this role meets or exceeds `required`
    pub fn includes(self, required: Role) -> bool {
        has_minimum_role(self, required)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact match only, same as the serde names.
        Role::ALL.into_iter().find(|role| role.as_str() == s).ok_or_else(|| AccessError::UnknownRole { role: s.to_string() })
    }
}

/// Rank of a raw role string, rejecting anything outside the fixed set
pub fn rank_of(raw: &str) -> AccessResult<u8> {
    raw.parse::<Role>().map(Role::rank)
}

/// True iff `subject` ranks at or above `required`
pub fn has_minimum_role(subject: Role, required: Role) -> bool {
    subject.rank() >= required.rank()
}

/// What to do when a session carries a role string outside the fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRolePolicy {
    /// Keep the session but deny every protected route
    #[default]
    FailClosed,
    /// Refuse to establish the session; the caller forces a re-login
    Reject,
}

impl FromStr for UnknownRolePolicy {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_closed" | "fail-closed" => Ok(UnknownRolePolicy::FailClosed),
            "reject" => Ok(UnknownRolePolicy::Reject),
            other => Err(AccessError::InvalidConfig {
                message: format!("Unknown role policy: {}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_contiguous() {
        for (expected, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.rank() as usize, expected);
            assert_eq!(Role::from_rank(role.rank()), Some(*role));
        }
        assert_eq!(Role::from_rank(6), None);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("superadmin".parse::<Role>().unwrap(), Role::SuperAdmin);

        let err = "super_admin".parse::<Role>().unwrap_err();
        assert_eq!(err.error_type(), "unknown_role");
    }

    #[test]
    fn test_parsing_is_exact() {
        for raw in ["Admin", "ADMIN", " admin ", "admin\n", "SuperAdmin", " SuperAdmin "] {
            assert!(matches!(raw.parse::<Role>(), Err(AccessError::UnknownRole { role }) if role == raw), "{raw:?}");
            assert!(serde_json::from_str::<Role>(&format!("{:?}", raw)).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_rank_of_rejects_unknown() {
        assert_eq!(rank_of("controller").unwrap(), 3);
        assert!(matches!(rank_of("janitor"), Err(AccessError::UnknownRole { role }) if role == "janitor"));
        assert!(rank_of("").is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"superadmin\"");
        let role: Role = serde_json::from_str("\"finance\"").unwrap();
        assert_eq!(role, Role::Finance);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }

    #[test]
    fn test_has_minimum_role() {
        assert!(has_minimum_role(Role::Admin, Role::Teacher));
        assert!(!has_minimum_role(Role::Teacher, Role::Admin));
        assert!(Role::Controller.includes(Role::Finance));
    }

    #[test]
    fn test_unknown_role_policy_parsing() {
        assert_eq!(UnknownRolePolicy::default(), UnknownRolePolicy::FailClosed);
        assert_eq!("reject".parse::<UnknownRolePolicy>().unwrap(), UnknownRolePolicy::Reject);
        assert_eq!("fail-closed".parse::<UnknownRolePolicy>().unwrap(), UnknownRolePolicy::FailClosed);
        assert!("open".parse::<UnknownRolePolicy>().is_err());
    }
}
