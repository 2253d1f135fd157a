use super::CommandContext;
use anyhow::Result;
use campus_rbac::Role;

pub fn list_roles() -> Result<()> {
    println!("{:<6} {:<12} {:<20}", "Rank", "Role", "Name");
    println!("{}", "-".repeat(40));

    for role in Role::ALL {
        println!("{:<6} {:<12} {:<20}", role.rank(), role.as_str(), role.display_name());
    }

    Ok(())
}

pub fn list_routes(ctx: &CommandContext) -> Result<()> {
    let routes = ctx.control.routes();

    if routes.is_empty() {
        println!("No protected routes.");
        return Ok(());
    }

    println!("{:<24} {:<14} {:<16} {}", "Path", "Minimum", "Redirect", "Allowed");
    println!("{}", "-".repeat(96));

    for rule in routes.rules() {
        let minimum = rule.allowed_roles.minimum().map(|role| role.as_str()).unwrap_or("nobody");
        let redirect = rule.redirect_to.as_deref().unwrap_or(&ctx.config().default_redirect);
        println!("{:<24} {:<14} {:<16} {}", rule.path, minimum, redirect, rule.allowed_roles);
    }

    Ok(())
}
