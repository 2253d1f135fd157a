use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use crate::commands::CommandContext;
use anyhow::Result;
use campus_rbac::AccessConfig;
use tracing::Level;

/// CLI for inspecting campus dashboard access control
#[derive(Parser, Debug)]
#[command(name = "campus", about = "Campus dashboard access control")]
pub struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for configuration inspection
#[derive(Subcommand, Debug)]
#[command(about = "Inspect access control configuration")]
pub enum ConfigCommands {
    /// Show current effective configuration
    Show,
    /// Write the effective configuration to a file
    Write { path: PathBuf },
}

/// Top-level commands for campus
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List roles and their ranks
    Roles,

    /// Show the permission set derived from a role
    Permissions {
        /// Role name, e.g. teacher
        role: String,
    },

    /// Decide whether a route renders for a subject
    Check {
        /// Route path, e.g. /students
        path: String,

        /// Role reported by the auth backend
        #[arg(long, conflicts_with = "anonymous", required_unless_present = "anonymous")]
        role: Option<String>,

        /// Check as a signed-out subject
        #[arg(long)]
        anonymous: bool,
    },

    /// List navigation entries visible to a role
    Nav {
        /// Role name
        role: String,
    },

    /// List protected routes
    Routes,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    // Load configuration
    let config = resolve_config(cli.config)?;

    // Create command context
    let ctx = CommandContext::new(config);

    // Dispatch commands
    match cli.command {
        Commands::Roles => {
            commands::roles::list_roles()?;
        }
        Commands::Permissions { role } => {
            commands::access::show_permissions(&ctx, &role)?;
        }
        Commands::Check { path, role, anonymous } => {
            commands::access::check_route(&ctx, &path, role.as_deref(), anonymous)?;
        }
        Commands::Nav { role } => {
            commands::access::show_navigation(&ctx, &role)?;
        }
        Commands::Routes => {
            commands::roles::list_routes(&ctx)?;
        }
        Commands::Config { command } => {
            commands::config::handle_config_command(&ctx, command)?;
        }
    }

    Ok(())
}

/// Explicit path, then `CAMPUS_ACCESS_CONFIG`, then the user config directory
fn resolve_config(cli_config: Option<PathBuf>) -> Result<AccessConfig> {
    let path = cli_config.or_else(|| {
        if std::env::var_os(campus_rbac::config::CONFIG_PATH_ENV).is_some() {
            return None;
        }
        dirs::config_dir().map(|dir| dir.join("campus").join("access.toml")).filter(|path| path.is_file())
    });

    Ok(AccessConfig::resolve(path)?)
}
