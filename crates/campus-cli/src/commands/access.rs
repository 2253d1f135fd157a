use super::{CommandContext, parse_role};
use anyhow::Result;
use campus_rbac::{CollectingNotifier, SessionState};
use serde_json::json;

pub fn show_permissions(ctx: &CommandContext, raw_role: &str) -> Result<()> {
    let role = parse_role(raw_role)?;
    let permissions = ctx.control.permissions_for(role);

    println!("{}", serde_json::to_string_pretty(&permissions)?);
    Ok(())
}

pub fn check_route(ctx: &CommandContext, path: &str, raw_role: Option<&str>, anonymous: bool) -> Result<()> {
    let session = match raw_role {
        Some(raw_role) if !anonymous => ctx.control.establish_session("cli", raw_role)?,
        _ => SessionState::Anonymous,
    };

    let notifier = CollectingNotifier::new();
    let decision = ctx.control.check_route(path, &session, &notifier);

    let output = json!({
        "path": path,
        "role": session.role(),
        "decision": decision,
        "notices": notifier.drain(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

pub fn show_navigation(ctx: &CommandContext, raw_role: &str) -> Result<()> {
    let role = parse_role(raw_role)?;
    let items = ctx.control.navigation_for(role);

    println!("Navigation for {} ({}):", role.display_name(), role);
    for item in items {
        println!("  {:<12} {}", item.label, item.path);
    }

    Ok(())
}
