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

//! Error handling for access control

use thiserror::Error;

/// Access control error types
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("Not authenticated: {message}")]
    NotAuthenticated { message: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AccessError {
    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            AccessError::UnknownRole { .. } => "unknown_role",
            AccessError::NotAuthenticated { .. } => "not_authenticated",
            AccessError::AccessDenied { .. } => "access_denied",
            AccessError::InvalidConfig { .. } => "invalid_config",
            AccessError::TomlError(_) => "config_parse_error",
            AccessError::TomlSerializeError(_) => "config_serialize_error",
            AccessError::IoError(_) => "io_error",
        }
    }

    /// Whether the user can recover by navigating elsewhere or signing in again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AccessError::NotAuthenticated { .. } | AccessError::AccessDenied { .. } | AccessError::UnknownRole { .. })
    }
}

/// Result type alias for access control operations
pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = AccessError::UnknownRole { role: "janitor".to_string() };
        assert_eq!(err.error_type(), "unknown_role");
        assert_eq!(err.to_string(), "Unknown role: janitor");

        let err = AccessError::AccessDenied { message: "/finance".to_string() };
        assert_eq!(err.error_type(), "access_denied");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_errors_not_recoverable() {
        let err = AccessError::InvalidConfig { message: "bad route".to_string() };
        assert!(!err.is_recoverable());
    }
}
