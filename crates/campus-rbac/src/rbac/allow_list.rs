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

//! Allow-lists of roles for route and resource protection

use crate::rbac::roles::{Role, has_minimum_role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// True iff `subject` is listed in `allowed` or outranks any listed role.
///
/// An empty allow-list admits nobody.
pub fn has_any_of<I>(subject: Role, allowed: I) -> bool
where
    I: IntoIterator<Item = Role>,
{
    allowed.into_iter().any(|role| role == subject || has_minimum_role(subject, role))
}

/// Set of roles permitted to reach a resource, extended upward by rank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList {
    roles: BTreeSet<Role>,
}

impl AllowList {
    /// Create an empty allow-list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allow-list from the given roles
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self { roles: roles.into_iter().collect() }
    }

    /// Every role from `minimum` upward
    pub fn at_least(minimum: Role) -> Self {
        Self::from_roles(Role::ALL.into_iter().filter(|role| has_minimum_role(*role, minimum)))
    }

    /// Staff-only: teacher and everything above
    pub fn staff() -> Self {
        Self::at_least(Role::Teacher)
    }

    /// Add a role
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Whether `role` is literally listed
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Lowest-ranked listed role, which acts as the effective gate
    pub fn minimum(&self) -> Option<Role> {
        self.roles.iter().next().copied()
    }

    /// Listed roles, least privileged first
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Check whether `subject` may pass
    pub fn admits(&self, subject: Role) -> bool {
        has_any_of(subject, self.roles())
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.roles.iter().map(|role| role.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl FromIterator<Role> for AllowList {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::from_roles(iter)
    }
}
