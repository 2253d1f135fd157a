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

//! Sidebar navigation filtered by permission set

use crate::rbac::{Action, PermissionSet};
use serde::Serialize;

/// A single menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    /// Action that must be granted for the entry to show
    pub action: Action,
}

/// Full menu, in display order
pub const NAVIGATION: [NavItem; 10] = [
    NavItem { label: "Dashboard", path: "/dashboard", action: Action::ViewDashboard },
    NavItem { label: "Students", path: "/students", action: Action::ViewStudents },
    NavItem { label: "Teachers", path: "/teachers", action: Action::ViewTeachers },
    NavItem { label: "Books", path: "/books", action: Action::ViewBooks },
    NavItem { label: "Attendance", path: "/attendance", action: Action::ViewAttendance },
    NavItem { label: "Exams", path: "/exams", action: Action::ViewExams },
    NavItem { label: "Finance", path: "/finance", action: Action::ViewFinance },
    NavItem { label: "Reports", path: "/reports", action: Action::ViewReports },
    NavItem { label: "Branches", path: "/branches", action: Action::ManageBranch },
    NavItem { label: "Settings", path: "/settings", action: Action::ManageSystem },
];

/// Menu entries visible under `permissions`, order preserved
pub fn visible_items(permissions: &PermissionSet) -> Vec<NavItem> {
    NAVIGATION.iter().filter(|item| permissions.allows(item.action)).copied().collect()
}
