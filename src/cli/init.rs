use crate::services::catalog;
use crate::{Config, Database};
use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, name: Option<String>, empty: bool) -> Result<()> {
    let title = name.unwrap_or_else(|| "Inkshelf".to_string());

    std::fs::create_dir_all(path.join("data"))?;

    let config_path = path.join("inkshelf.toml");
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }
    std::fs::write(&config_path, Config::default_toml(&title)?)?;

    let config = Config::load(&config_path)?;
    let db = Database::open(&path.join(&config.database.path).to_string_lossy())?;
    db.migrate()?;

    if !empty {
        let summary = catalog::seed_demo(&db)?;
        tracing::info!(
            "Seeded demo catalog: {} series, {} chapters",
            summary.series,
            summary.chapters
        );
    }

    tracing::info!("Created new Inkshelf library at {:?}", path);
    tracing::info!("Run 'inkshelf user add --email ... --name ...' to create a reader");
    tracing::info!("Run 'inkshelf serve' to start the server");

    Ok(())
}
