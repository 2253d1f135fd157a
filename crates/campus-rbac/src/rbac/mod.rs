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

//! Role-Based Access Control (RBAC)
//!
//! This module provides:
//! - The fixed six-role hierarchy and rank comparisons
//! - Allow-lists that admit listed roles and everything above them
//! - Permission sets derived from a static action table
//! - Per-role permission caching
//! - Audit logging of guard decisions

pub mod allow_list;
pub mod audit;
pub mod cache;
pub mod permissions;
pub mod roles;

pub use allow_list::*;
pub use audit::*;
pub use cache::*;
pub use permissions::*;
pub use roles::*;
