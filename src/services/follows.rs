//! Follow relations between users and series.

use crate::models::{Follow, FollowedSeries, Series};
use crate::services::catalog;
use crate::Database;
use anyhow::Result;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("series '{0}' not found")]
    SeriesNotFound(String),
    #[error("chapter '{0}' not found")]
    ChapterNotFound(String),
    #[error("entry '{0}' not found")]
    EntryNotFound(String),
}

const FOLLOW_COLUMNS: &str = "id, user_id, series_id, followed_at, notifications";

fn row_to_follow(row: &Row) -> rusqlite::Result<Follow> {
    Ok(Follow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        series_id: row.get(2)?,
        followed_at: row.get(3)?,
        notifications: row.get(4)?,
    })
}

/// Follows `series_id`. Following twice returns the existing relation.
pub fn follow(db: &Database, user_id: &str, series_id: &str) -> Result<Follow> {
    if catalog::get_series(db, series_id)?.is_none() {
        return Err(LibraryError::SeriesNotFound(series_id.to_string()).into());
    }
    let follow = Follow {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        series_id: series_id.to_string(),
        followed_at: Utc::now(),
        notifications: true,
    };
    let inserted = {
        let conn = db.get()?;
        conn.execute(
            &format!(
                "INSERT INTO follows ({}) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(user_id, series_id) DO NOTHING",
                FOLLOW_COLUMNS
            ),
            rusqlite::params![
                follow.id,
                follow.user_id,
                follow.series_id,
                follow.followed_at,
                follow.notifications
            ],
        )?
    };
    if inserted == 1 {
        tracing::debug!("User {} followed series {}", user_id, series_id);
        return Ok(follow);
    }

    // Already followed; the stored relation wins.
    get_follow(db, user_id, series_id)?.ok_or_else(|| {
        anyhow::anyhow!(
            "Follow of series '{}' was removed while it was being created",
            series_id
        )
    })
}

/// Returns whether a relation was removed.
pub fn unfollow(db: &Database, user_id: &str, series_id: &str) -> Result<bool> {
    let conn = db.get()?;
    let removed = conn.execute(
        "DELETE FROM follows WHERE user_id = ? AND series_id = ?",
        (user_id, series_id),
    )?;
    Ok(removed > 0)
}

pub fn get_follow(db: &Database, user_id: &str, series_id: &str) -> Result<Option<Follow>> {
    let conn = db.get()?;
    let follow = conn
        .query_row(
            &format!(
                "SELECT {} FROM follows WHERE user_id = ? AND series_id = ?",
                FOLLOW_COLUMNS
            ),
            (user_id, series_id),
            row_to_follow,
        )
        .optional()?;
    Ok(follow)
}

pub fn is_following(db: &Database, user_id: &str, series_id: &str) -> Result<bool> {
    Ok(get_follow(db, user_id, series_id)?.is_some())
}

/// Follows of one user, newest first.
pub fn list_follows(db: &Database, user_id: &str) -> Result<Vec<Follow>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM follows WHERE user_id = ? ORDER BY followed_at DESC",
        FOLLOW_COLUMNS
    ))?;
    let follows = stmt
        .query_map([user_id], row_to_follow)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(follows)
}

/// Flips the notification flag on one of the user's follows and returns
/// the new value.
pub fn toggle_notifications(db: &Database, user_id: &str, follow_id: &str) -> Result<bool> {
    let conn = db.get()?;
    let changed = conn.execute(
        "UPDATE follows SET notifications = NOT notifications WHERE id = ? AND user_id = ?",
        (follow_id, user_id),
    )?;
    if changed == 0 {
        return Err(LibraryError::EntryNotFound(follow_id.to_string()).into());
    }
    let enabled = conn.query_row(
        "SELECT notifications FROM follows WHERE id = ?",
        [follow_id],
        |row| row.get(0),
    )?;
    Ok(enabled)
}

pub fn count_follows(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count = conn.query_row("SELECT COUNT(*) FROM follows", [], |row| row.get(0))?;
    Ok(count)
}

/// Pairs each follow with its series. Follows whose series is no longer
/// in the catalog are dropped.
pub fn join(follows: Vec<Follow>, catalog: &[Series]) -> Vec<FollowedSeries> {
    let by_id: HashMap<&str, &Series> = catalog.iter().map(|s| (s.id.as_str(), s)).collect();
    follows
        .into_iter()
        .filter_map(|follow| match by_id.get(follow.series_id.as_str()) {
            Some(series) => Some(FollowedSeries {
                series: (*series).clone(),
                follow,
            }),
            None => {
                tracing::warn!(
                    "Dropping follow {} for missing series {}",
                    follow.id,
                    follow.series_id
                );
                None
            }
        })
        .collect()
}

/// Loads and joins the user's follows against a fresh catalog snapshot.
pub fn followed_series(db: &Database, user_id: &str) -> Result<Vec<FollowedSeries>> {
    let catalog = catalog::snapshot(db)?;
    Ok(join(list_follows(db, user_id)?, &catalog))
}

pub fn new_chapter_count(followed: &[FollowedSeries]) -> usize {
    followed.iter().filter(|f| f.has_new_chapter()).count()
}
