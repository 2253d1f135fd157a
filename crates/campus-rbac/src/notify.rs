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

//! Denial notices handed to the host UI

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Notice severity, mapped by the host to a toast or banner style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// User-visible notice emitted when a guard denies access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialNotice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl DenialNotice {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    /// Standard notice for a route the subject may not enter
    pub fn access_denied() -> Self {
        Self::new("Access Denied", "You don't have permission to access this page.", Severity::Error)
    }

    /// Notice for a session whose role is not recognized
    pub fn unrecognized_role() -> Self {
        Self::new("Sign-in Required", "Your account role is not recognized. Please sign in again.", Severity::Warning)
    }
}

/// Receives denial notices; presentation is the host's concern
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, notice: DenialNotice);
}

/// Notifier that only writes the notice to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: DenialNotice) {
        warn!(title = %notice.title, severity = ?notice.severity, "{}", notice.message);
    }
}

/// Notifier that queues notices for the host to drain
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<DenialNotice>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notice
    pub fn drain(&self) -> Vec<DenialNotice> {
        std::mem::take(&mut *self.notices.lock())
    }

    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: DenialNotice) {
        self.notices.lock().push(notice);
    }
}
