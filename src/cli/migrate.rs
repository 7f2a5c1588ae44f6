use crate::cli::MigrateCommand;
use crate::db::latest_schema_version;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, command: Option<MigrateCommand>) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;

    match command {
        None => {
            db.migrate()?;
            tracing::info!("Migrations complete (schema version {})", db.schema_version()?);
        }
        Some(MigrateCommand::Status) => status(&db)?,
    }

    Ok(())
}

fn status(db: &Database) -> Result<()> {
    let current = db.schema_version()?;
    let latest = latest_schema_version();

    println!();
    println!("  Schema version: {:03}", current);
    println!("  Latest version: {:03}", latest);
    println!();
    if current < latest {
        println!(
            "  {} pending. Run `inkshelf migrate` to apply.",
            latest - current
        );
    } else {
        println!("  All migrations applied.");
    }
    println!();

    Ok(())
}
