use crate::models::Chapter;
use crate::services::reader::ReaderState;
use crate::services::session::Session;
use crate::services::{catalog, history};
use crate::{Config, Database};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub async fn run(
    config_path: &Path,
    series_id: &str,
    chapter_id: &str,
    page: usize,
    user: Option<String>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path)?;

    let session = match user.as_deref() {
        Some(email) => {
            let session = Session::for_email(&db, email)?;
            if !session.is_signed_in() {
                anyhow::bail!("No user registered as '{}'", email);
            }
            session
        }
        None => Session::anonymous(),
    };

    let series = catalog::get_series(&db, series_id)?
        .ok_or_else(|| anyhow::anyhow!("Series '{}' not found", series_id))?;
    let chapters = catalog::list_chapters(&db, series_id)?;
    let mut reader = ReaderState::open(&chapters, chapter_id, page)?;

    println!("{}", series.title);
    println!("Keys: a/d page, p/n chapter, f fullscreen, h controls, q quit");
    record(&db, &session, &chapters, &reader)?;
    show(&chapters, &reader);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let key = line.trim();
        if key.eq_ignore_ascii_case("q") {
            break;
        }
        if key.is_empty() {
            continue;
        }
        if reader.handle_key(key) {
            record(&db, &session, &chapters, &reader)?;
        }
        show(&chapters, &reader);
    }

    Ok(())
}

fn record(db: &Database, session: &Session, chapters: &[Chapter], reader: &ReaderState) -> Result<()> {
    let (Some(user), Some(chapter)) = (session.user(), chapters.get(reader.chapter_index())) else {
        return Ok(());
    };
    history::record_read(db, &user.id, &chapter.id, reader.page() as u32)?;
    Ok(())
}

fn show(chapters: &[Chapter], reader: &ReaderState) {
    let Some(chapter) = chapters.get(reader.chapter_index()) else {
        return;
    };
    let image = chapter
        .pages
        .get(reader.page() - 1)
        .map(String::as_str)
        .unwrap_or("");
    let mut flags = Vec::new();
    if reader.is_fullscreen() {
        flags.push("fullscreen");
    }
    if !reader.controls_visible() {
        flags.push("controls hidden");
    }
    print!(
        "[{} {}/{}] page {}/{} {}",
        chapter.title,
        reader.chapter_index() + 1,
        reader.chapter_count(),
        reader.page(),
        reader.page_count(),
        image
    );
    if !flags.is_empty() {
        print!(" ({})", flags.join(", "));
    }
    println!();
    let _ = io::stdout().flush();
}
