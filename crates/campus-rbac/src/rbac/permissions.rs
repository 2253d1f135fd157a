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

//! Permission definitions and derivation
//!
//! Every UI-level action has a minimum role recorded in [`ACTION_TABLE`].
//! A [`PermissionSet`] is derived from a role by comparing it against that table.

use crate::error::AccessError;
use crate::rbac::roles::{Role, has_minimum_role};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named action gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    ViewDashboard,
    /// Staff-only student records
    ViewStudents,
    ViewBooks,
    ViewAttendance,
    ViewExams,
    ViewFinance,
    ViewReports,
    /// Teacher roster
    ViewTeachers,
    ManageBranch,
    ManageSystem,
}

/// Minimum role for every action, in [`Action::ALL`] order
pub const ACTION_TABLE: [(Action, Role); 10] = [
    (Action::ViewDashboard, minimum_role_for(Action::ViewDashboard)),
    (Action::ViewStudents, minimum_role_for(Action::ViewStudents)),
    (Action::ViewBooks, minimum_role_for(Action::ViewBooks)),
    (Action::ViewAttendance, minimum_role_for(Action::ViewAttendance)),
    (Action::ViewExams, minimum_role_for(Action::ViewExams)),
    (Action::ViewFinance, minimum_role_for(Action::ViewFinance)),
    (Action::ViewReports, minimum_role_for(Action::ViewReports)),
    (Action::ViewTeachers, minimum_role_for(Action::ViewTeachers)),
    (Action::ManageBranch, minimum_role_for(Action::ManageBranch)),
    (Action::ManageSystem, minimum_role_for(Action::ManageSystem)),
];

impl Action {
    pub const ALL: [Action; 10] = [
        Action::ViewDashboard,
        Action::ViewStudents,
        Action::ViewBooks,
        Action::ViewAttendance,
        Action::ViewExams,
        Action::ViewFinance,
        Action::ViewReports,
        Action::ViewTeachers,
        Action::ManageBranch,
        Action::ManageSystem,
    ];

    /// Key used in serialized permission maps
    pub const fn key(self) -> &'static str {
        match self {
            Action::ViewDashboard => "viewDashboard",
            Action::ViewStudents => "viewStudents",
            Action::ViewBooks => "viewBooks",
            Action::ViewAttendance => "viewAttendance",
            Action::ViewExams => "viewExams",
            Action::ViewFinance => "viewFinance",
            Action::ViewReports => "viewReports",
            Action::ViewTeachers => "viewTeachers",
            Action::ManageBranch => "manageBranch",
            Action::ManageSystem => "manageSystem",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Action {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL.into_iter().find(|action| action.key() == s).ok_or_else(|| AccessError::InvalidConfig {
            message: format!("Unknown action: {}", s),
        })
    }
}

/// Minimum role required for `action`
pub const fn minimum_role_for(action: Action) -> Role {
    match action {
        Action::ViewDashboard => Role::Student,
        Action::ViewStudents | Action::ViewBooks | Action::ViewAttendance | Action::ViewExams => Role::Teacher,
        Action::ViewFinance => Role::Finance,
        Action::ViewReports => Role::Controller,
        Action::ViewTeachers => Role::Admin,
        Action::ManageBranch | Action::ManageSystem => Role::SuperAdmin,
    }
}

/// Feature flags derived from a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub view_dashboard: bool,
    pub view_students: bool,
    pub view_books: bool,
    pub view_attendance: bool,
    pub view_exams: bool,
    pub view_finance: bool,
    pub view_reports: bool,
    pub view_teachers: bool,
    pub manage_branch: bool,
    pub manage_system: bool,
}

impl PermissionSet {
    /// Flag for a single action
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::ViewDashboard => self.view_dashboard,
            Action::ViewStudents => self.view_students,
            Action::ViewBooks => self.view_books,
            Action::ViewAttendance => self.view_attendance,
            Action::ViewExams => self.view_exams,
            Action::ViewFinance => self.view_finance,
            Action::ViewReports => self.view_reports,
            Action::ViewTeachers => self.view_teachers,
            Action::ManageBranch => self.manage_branch,
            Action::ManageSystem => self.manage_system,
        }
    }

    /// Actions granted by this set, in table order
    pub fn granted(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|action| self.allows(*action))
    }
}

/// Derive the full permission set for `subject`
pub fn permissions_for(subject: Role) -> PermissionSet {
    let allowed = |action: Action| has_minimum_role(subject, minimum_role_for(action));

    PermissionSet {
        view_dashboard: allowed(Action::ViewDashboard),
        view_students: allowed(Action::ViewStudents),
        view_books: allowed(Action::ViewBooks),
        view_attendance: allowed(Action::ViewAttendance),
        view_exams: allowed(Action::ViewExams),
        view_finance: allowed(Action::ViewFinance),
        view_reports: allowed(Action::ViewReports),
        view_teachers: allowed(Action::ViewTeachers),
        manage_branch: allowed(Action::ManageBranch),
        manage_system: allowed(Action::ManageSystem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_action() {
        for (index, action) in Action::ALL.into_iter().enumerate() {
            assert_eq!(ACTION_TABLE[index], (action, minimum_role_for(action)), "{action}");
        }
    }

    #[test]
    fn test_minimum_roles() {
        assert_eq!(minimum_role_for(Action::ViewDashboard), Role::Student);
        assert_eq!(minimum_role_for(Action::ViewStudents), Role::Teacher);
        assert_eq!(minimum_role_for(Action::ViewFinance), Role::Finance);
        assert_eq!(minimum_role_for(Action::ViewReports), Role::Controller);
        assert_eq!(minimum_role_for(Action::ViewTeachers), Role::Admin);
        assert_eq!(minimum_role_for(Action::ManageBranch), Role::SuperAdmin);
        assert_eq!(minimum_role_for(Action::ManageSystem), Role::SuperAdmin);
    }

    #[test]
    fn test_teacher_permissions() {
        let first = permissions_for(Role::Teacher);
        let second = permissions_for(Role::Teacher);
        assert_eq!(first, second);

        assert!(first.view_students);
        assert!(first.view_exams);
        assert!(!first.view_finance);
        assert!(!first.view_teachers);
        assert!(!first.manage_branch);
    }

    #[test]
    fn test_superadmin_has_everything() {
        let permissions = permissions_for(Role::SuperAdmin);
        assert!(permissions.manage_branch);
        assert!(permissions.manage_system);
        assert_eq!(permissions.granted().count(), Action::ALL.len());
    }

    #[test]
    fn test_student_permissions() {
        let permissions = permissions_for(Role::Student);
        assert_eq!(permissions.granted().collect::<Vec<_>>(), vec![Action::ViewDashboard]);
    }

    #[test]
    fn test_finance_and_controller() {
        let finance = permissions_for(Role::Finance);
        assert!(finance.view_finance);
        assert!(!finance.view_reports);

        let controller = permissions_for(Role::Controller);
        assert!(controller.view_finance);
        assert!(controller.view_reports);
        assert!(!controller.view_teachers);
    }

    #[test]
    fn test_flags_match_table() {
        for role in Role::ALL {
            let permissions = permissions_for(role);
            for (action, minimum) in ACTION_TABLE {
                assert_eq!(permissions.allows(action), role >= minimum, "{role} {action}");
            }
        }
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(permissions_for(Role::Admin)).unwrap();
        assert_eq!(value["viewTeachers"], serde_json::Value::Bool(true));
        assert_eq!(value["manageBranch"], serde_json::Value::Bool(false));

        for action in Action::ALL {
            assert!(value.get(action.key()).is_some(), "{}", action.key());
            assert_eq!(action.key().parse::<Action>().unwrap(), action);
        }
    }
}
