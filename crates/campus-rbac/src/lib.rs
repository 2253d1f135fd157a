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

//! Campus RBAC
//!
//! Role-based access control for the education center dashboard: a fixed
//! six-role hierarchy, permission sets for feature gating, and route guards
//! that decide whether a protected view renders or redirects.

pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod notify;
pub mod rbac;
pub mod routes;
pub mod session;
pub mod system;

pub use config::AccessConfig;
pub use error::{AccessError, AccessResult};
pub use guard::{DenyReason, GuardDecision, RouteGuard};
pub use notify::{CollectingNotifier, DenialNotice, Notifier, Severity, TracingNotifier};
pub use rbac::{Action, AllowList, PermissionSet, Role, UnknownRolePolicy, has_any_of, has_minimum_role, permissions_for, rank_of};
pub use session::{Session, SessionProvider, SessionState};
pub use system::AccessControl;
