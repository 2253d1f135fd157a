use super::CommandContext;
use crate::ConfigCommands;
use anyhow::Result;
use std::path::Path;

pub fn handle_config_command(ctx: &CommandContext, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Write { path } => write_config(ctx, &path),
    }
}

fn show_config(ctx: &CommandContext) -> Result<()> {
    print!("{}", ctx.config().to_toml()?);
    Ok(())
}

fn write_config(ctx: &CommandContext, path: &Path) -> Result<()> {
    ctx.config().save_to_file(path)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}
