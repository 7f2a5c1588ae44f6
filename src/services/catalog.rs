//! Read access to the catalog store, plus bulk import.
//!
//! Readers always take a full [`snapshot`] and run the in-memory pipeline
//! over it; the store never filters or sorts on their behalf.

use crate::models::{Chapter, Series};
use crate::Database;
use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;

const SERIES_COLUMNS: &str = "id, title, description, cover_image, series_type, status, genres, author, artist, release_year, rating, total_chapters, total_volumes, views, followers, created_at, updated_at, last_chapter_date";

const CHAPTER_COLUMNS: &str = "id, series_id, title, chapter_number, volume_number, pages, release_date, views, created_at, updated_at";

/// A catalog export as accepted by [`import`].
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub series: usize,
    pub chapters: usize,
}

/// Parses a text column into an enum, failing the row on unknown values.
fn enum_column<T: FromStr>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unrecognized value '{}'", raw).into(),
        )
    })
}

fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn row_to_series(row: &Row) -> rusqlite::Result<Series> {
    Ok(Series {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        cover_image: row.get(3)?,
        series_type: enum_column(row, 4)?,
        status: enum_column(row, 5)?,
        genres: json_column(row, 6)?,
        author: row.get(7)?,
        artist: row.get(8)?,
        release_year: row.get(9)?,
        rating: row.get(10)?,
        total_chapters: row.get(11)?,
        total_volumes: row.get(12)?,
        views: row.get(13)?,
        followers: row.get(14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
        last_chapter_date: row.get(17)?,
    })
}

fn row_to_chapter(row: &Row) -> rusqlite::Result<Chapter> {
    Ok(Chapter {
        id: row.get(0)?,
        series_id: row.get(1)?,
        title: row.get(2)?,
        chapter_number: row.get(3)?,
        volume_number: row.get(4)?,
        pages: json_column(row, 5)?,
        release_date: row.get(6)?,
        views: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// The full catalog in store order (insertion order).
pub fn snapshot(db: &Database) -> Result<Vec<Series>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM series ORDER BY rowid ASC",
        SERIES_COLUMNS
    ))?;
    let series = stmt
        .query_map([], row_to_series)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(series)
}

pub fn get_series(db: &Database, id: &str) -> Result<Option<Series>> {
    let conn = db.get()?;
    let series = conn
        .query_row(
            &format!("SELECT {} FROM series WHERE id = ?", SERIES_COLUMNS),
            [id],
            row_to_series,
        )
        .optional()?;
    Ok(series)
}

pub fn count_series(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count = conn.query_row("SELECT COUNT(*) FROM series", [], |row| row.get(0))?;
    Ok(count)
}

/// Chapters of a series in reading order.
pub fn list_chapters(db: &Database, series_id: &str) -> Result<Vec<Chapter>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM chapters WHERE series_id = ? ORDER BY chapter_number ASC, rowid ASC",
        CHAPTER_COLUMNS
    ))?;
    let chapters = stmt
        .query_map([series_id], row_to_chapter)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(chapters)
}

pub fn get_chapter(db: &Database, id: &str) -> Result<Option<Chapter>> {
    let conn = db.get()?;
    let chapter = conn
        .query_row(
            &format!("SELECT {} FROM chapters WHERE id = ?", CHAPTER_COLUMNS),
            [id],
            row_to_chapter,
        )
        .optional()?;
    Ok(chapter)
}

/// Every genre label used in `catalog`, sorted and de-duplicated.
pub fn genres(catalog: &[Series]) -> Vec<String> {
    let mut genres: Vec<String> = catalog.iter().flat_map(|s| s.genres.clone()).collect();
    genres.sort();
    genres.dedup();
    genres
}

fn validate_series(series: &Series) -> Result<()> {
    if series.id.trim().is_empty() {
        bail!("Series id cannot be empty");
    }
    if series.title.trim().is_empty() {
        bail!("Series '{}' has an empty title", series.id);
    }
    if !series.has_consistent_dates() {
        bail!(
            "Series '{}' has a last chapter date before its creation date",
            series.id
        );
    }
    Ok(())
}

fn validate_chapter(chapter: &Chapter) -> Result<()> {
    if chapter.id.trim().is_empty() {
        bail!("Chapter id cannot be empty");
    }
    if chapter.chapter_number == 0 {
        bail!("Chapter '{}' must have a positive chapter number", chapter.id);
    }
    if chapter.pages.is_empty() {
        bail!("Chapter '{}' has no pages", chapter.id);
    }
    Ok(())
}

/// `col = excluded.col` for every non-key column. Upserting in place keeps
/// follows and history attached to re-imported series.
fn update_clause(columns: &str) -> String {
    columns
        .split(',')
        .map(str::trim)
        .filter(|c| *c != "id")
        .map(|c| format!("{0} = excluded.{0}", c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Inserts or updates every series and chapter in `snapshot` inside one
/// transaction. Chapters must reference a series that is either in the
/// snapshot or already stored.
pub fn import(db: &Database, snapshot: &CatalogSnapshot) -> Result<ImportSummary> {
    for series in &snapshot.series {
        validate_series(series)?;
    }
    for chapter in &snapshot.chapters {
        validate_chapter(chapter)?;
    }

    let mut conn = db.get()?;
    let tx = conn.transaction()?;

    for s in &snapshot.series {
        tx.execute(
            &format!(
                "INSERT INTO series ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18) ON CONFLICT(id) DO UPDATE SET {}",
                SERIES_COLUMNS,
                update_clause(SERIES_COLUMNS)
            ),
            rusqlite::params![
                s.id,
                s.title,
                s.description,
                s.cover_image,
                s.series_type.to_string(),
                s.status.to_string(),
                serde_json::to_string(&s.genres)?,
                s.author,
                s.artist,
                s.release_year,
                s.rating,
                s.total_chapters,
                s.total_volumes,
                s.views,
                s.followers,
                s.created_at,
                s.updated_at,
                s.last_chapter_date,
            ],
        )?;
    }

    for c in &snapshot.chapters {
        let known: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM series WHERE id = ?)",
            [&c.series_id],
            |row| row.get(0),
        )?;
        if !known {
            bail!(
                "Chapter '{}' references unknown series '{}'",
                c.id,
                c.series_id
            );
        }
        tx.execute(
            &format!(
                "INSERT INTO chapters ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) ON CONFLICT(id) DO UPDATE SET {}",
                CHAPTER_COLUMNS,
                update_clause(CHAPTER_COLUMNS)
            ),
            rusqlite::params![
                c.id,
                c.series_id,
                c.title,
                c.chapter_number,
                c.volume_number,
                serde_json::to_string(&c.pages)?,
                c.release_date,
                c.views,
                c.created_at,
                c.updated_at,
            ],
        )?;
    }

    tx.commit()?;

    let summary = ImportSummary {
        series: snapshot.series.len(),
        chapters: snapshot.chapters.len(),
    };
    tracing::info!(
        "Imported {} series and {} chapters",
        summary.series,
        summary.chapters
    );
    Ok(summary)
}

pub fn import_json(db: &Database, json: &str) -> Result<ImportSummary> {
    let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
    import(db, &snapshot)
}

const DEMO_CATALOG: &str = include_str!("../../data/demo_catalog.json");
const DEMO_CHAPTERS_PER_SERIES: u32 = 20;
const DEMO_PAGES_PER_CHAPTER: usize = 20;

/// Loads the bundled demo catalog and generates placeholder chapters for
/// each series. Timestamps are relative to the moment of seeding.
pub fn seed_demo(db: &Database) -> Result<ImportSummary> {
    let mut snapshot: CatalogSnapshot = serde_json::from_str(DEMO_CATALOG)?;
    let now = Utc::now();

    for (i, series) in snapshot.series.iter_mut().enumerate() {
        series.created_at = now - Duration::days(365);
        series.updated_at = now - Duration::days(i as i64);
        series.last_chapter_date = Some(now - Duration::days(i as i64));
    }

    let chapters = snapshot
        .series
        .iter()
        .flat_map(|series| {
            (1..=DEMO_CHAPTERS_PER_SERIES).map(move |n| Chapter {
                id: format!("{}-ch{}", series.id, n),
                series_id: series.id.clone(),
                title: format!("Chapter {}", n),
                chapter_number: n,
                volume_number: None,
                pages: vec![series.cover_image.clone(); DEMO_PAGES_PER_CHAPTER],
                release_date: now - Duration::days(i64::from(DEMO_CHAPTERS_PER_SERIES - n)),
                views: 0,
                created_at: now,
                updated_at: now,
            })
        })
        .collect();
    snapshot.chapters = chapters;

    import(db, &snapshot)
}
