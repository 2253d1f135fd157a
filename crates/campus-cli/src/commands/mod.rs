pub mod access;
pub mod config;
pub mod roles;

use anyhow::Result;
use campus_rbac::{AccessConfig, AccessControl, Role};

pub struct CommandContext {
    pub control: AccessControl,
}

impl CommandContext {
    pub fn new(config: AccessConfig) -> Self {
        Self { control: AccessControl::new(config) }
    }

    pub fn config(&self) -> &AccessConfig {
        self.control.config()
    }
}

/// Parse a role argument, rejecting names outside the fixed set
pub fn parse_role(raw: &str) -> Result<Role> {
    Ok(raw.parse::<Role>()?)
}
