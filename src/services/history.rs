//! Reading history. One entry per user and series, overwritten on every
//! read.

use crate::models::{HistoryEntry, ReadingHistory, Series};
use crate::services::catalog;
use crate::services::follows::LibraryError;
use crate::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row};
use std::collections::HashMap;

const HISTORY_COLUMNS: &str = "id, user_id, series_id, chapter_id, last_read_page, read_at";

fn row_to_history(row: &Row) -> rusqlite::Result<ReadingHistory> {
    Ok(ReadingHistory {
        id: row.get(0)?,
        user_id: row.get(1)?,
        series_id: row.get(2)?,
        chapter_id: row.get(3)?,
        last_read_page: row.get(4)?,
        read_at: row.get(5)?,
    })
}

/// Records that `user_id` is on `page` of `chapter_id`. Creates the
/// series entry on first read and updates it afterwards.
pub fn record_read(
    db: &Database,
    user_id: &str,
    chapter_id: &str,
    page: u32,
) -> Result<ReadingHistory> {
    let chapter = catalog::get_chapter(db, chapter_id)?
        .ok_or_else(|| LibraryError::ChapterNotFound(chapter_id.to_string()))?;
    record_read_at(db, user_id, &chapter.series_id, chapter_id, page, Utc::now())
}

pub(crate) fn record_read_at(
    db: &Database,
    user_id: &str,
    series_id: &str,
    chapter_id: &str,
    page: u32,
    read_at: DateTime<Utc>,
) -> Result<ReadingHistory> {
    let conn = db.get()?;
    conn.execute(
        r#"
        INSERT INTO reading_history (id, user_id, series_id, chapter_id, last_read_page, read_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(user_id, series_id) DO UPDATE SET
            chapter_id = excluded.chapter_id,
            last_read_page = excluded.last_read_page,
            read_at = excluded.read_at
        "#,
        rusqlite::params![
            uuid::Uuid::new_v4().to_string(),
            user_id,
            series_id,
            chapter_id,
            page.max(1),
            read_at
        ],
    )?;
    let entry = conn.query_row(
        &format!(
            "SELECT {} FROM reading_history WHERE user_id = ? AND series_id = ?",
            HISTORY_COLUMNS
        ),
        (user_id, series_id),
        row_to_history,
    )?;
    Ok(entry)
}

pub fn get_entry(db: &Database, user_id: &str, series_id: &str) -> Result<Option<ReadingHistory>> {
    let conn = db.get()?;
    let entry = conn
        .query_row(
            &format!(
                "SELECT {} FROM reading_history WHERE user_id = ? AND series_id = ?",
                HISTORY_COLUMNS
            ),
            (user_id, series_id),
            row_to_history,
        )
        .optional()?;
    Ok(entry)
}

/// History of one user, most recent first.
pub fn list_history(db: &Database, user_id: &str) -> Result<Vec<ReadingHistory>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM reading_history WHERE user_id = ? ORDER BY read_at DESC",
        HISTORY_COLUMNS
    ))?;
    let entries = stmt
        .query_map([user_id], row_to_history)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

pub fn remove_entry(db: &Database, user_id: &str, entry_id: &str) -> Result<()> {
    let conn = db.get()?;
    let removed = conn.execute(
        "DELETE FROM reading_history WHERE id = ? AND user_id = ?",
        (entry_id, user_id),
    )?;
    if removed == 0 {
        return Err(LibraryError::EntryNotFound(entry_id.to_string()).into());
    }
    Ok(())
}

/// Returns the number of entries removed.
pub fn clear(db: &Database, user_id: &str) -> Result<usize> {
    let conn = db.get()?;
    let removed = conn.execute("DELETE FROM reading_history WHERE user_id = ?", [user_id])?;
    Ok(removed)
}

/// Distinct users with a read at or after `since`.
pub fn count_active_readers(db: &Database, since: DateTime<Utc>) -> Result<i64> {
    let conn = db.get()?;
    // read_at is stored as UTC text, which orders chronologically.
    let count = conn.query_row(
        "SELECT COUNT(DISTINCT user_id) FROM reading_history WHERE read_at >= ?1",
        [since],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Pairs each history record with its series, dropping records whose
/// series has left the catalog.
pub fn join(entries: Vec<ReadingHistory>, catalog: &[Series]) -> Vec<HistoryEntry> {
    let by_id: HashMap<&str, &Series> = catalog.iter().map(|s| (s.id.as_str(), s)).collect();
    entries
        .into_iter()
        .filter_map(|history| {
            let series = by_id.get(history.series_id.as_str())?;
            Some(HistoryEntry {
                series: (*series).clone(),
                history,
            })
        })
        .collect()
}

pub fn history_entries(db: &Database, user_id: &str) -> Result<Vec<HistoryEntry>> {
    let catalog = catalog::snapshot(db)?;
    Ok(join(list_history(db, user_id)?, &catalog))
}
