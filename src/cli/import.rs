use crate::services::catalog;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, file: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;
    db.migrate()?;

    if !file.exists() {
        anyhow::bail!("Import file not found: {}", file.display());
    }
    let json = std::fs::read_to_string(file)?;
    let summary = catalog::import_json(&db, &json)
        .map_err(|e| anyhow::anyhow!("Import of {} failed: {}", file.display(), e))?;

    println!(
        "Imported {} series and {} chapters from {}",
        summary.series,
        summary.chapters,
        file.display()
    );
    Ok(())
}
