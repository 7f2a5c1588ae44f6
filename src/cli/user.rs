use crate::{services::auth, Config, Database};
use anyhow::Result;
use std::path::Path;

use super::UserCommand;

pub async fn run(config_path: &Path, command: UserCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;

    match command {
        UserCommand::Add { email, name, admin } => {
            if auth::get_user_by_email(&db, &email)?.is_some() {
                anyhow::bail!("A user with email '{}' already exists", email);
            }
            let id = auth::create_user(&db, &email, &name, admin)?;
            tracing::info!("User '{}' created ({})", email, id);
        }
        UserCommand::List => {
            let users = auth::list_users(&db)?;
            println!("{:<38} {:<30} {:<20} {:<6}", "ID", "EMAIL", "NAME", "ADMIN");
            println!("{}", "-".repeat(96));
            for user in users {
                println!(
                    "{:<38} {:<30} {:<20} {:<6}",
                    user.id,
                    user.email,
                    user.name,
                    if user.is_admin { "yes" } else { "" }
                );
            }
        }
        UserCommand::Remove { email } => match auth::get_user_by_email(&db, &email)? {
            Some(user) => {
                auth::delete_user(&db, &user.id)?;
                tracing::info!("User '{}' removed", email);
            }
            None => tracing::warn!("User '{}' not found", email),
        },
        UserCommand::Token { email, lifetime } => {
            let user = auth::get_user_by_email(&db, &email)?
                .ok_or_else(|| anyhow::anyhow!("User '{}' not found", email))?;
            let lifetime = lifetime.as_deref().unwrap_or(&config.session.lifetime);
            let token = auth::create_session(&db, &user.id, auth::parse_lifetime(lifetime)?)?;
            tracing::info!("Issued session token for '{}' valid for {}", email, lifetime);
            println!("{}", token);
        }
        UserCommand::Admin { email, revoke } => {
            let user = auth::get_user_by_email(&db, &email)?
                .ok_or_else(|| anyhow::anyhow!("User '{}' not found", email))?;
            auth::set_admin(&db, &user.id, !revoke)?;
            tracing::info!(
                "Admin access {} for '{}'",
                if revoke { "revoked" } else { "granted" },
                email
            );
        }
    }

    Ok(())
}
