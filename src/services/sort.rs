//! Comparator selection for catalog and library views.

use crate::models::{FollowedSeries, HistoryEntry, Series};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use unicase::UniCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Popular,
    Rating,
    Views,
    Updated,
    Title,
    Chapters,
    Year,
    Recent,
    Oldest,
}

impl SortKey {
    /// Parses `raw`, falling back to `default` for missing or unknown keys.
    pub fn parse_or(raw: Option<&str>, default: SortKey) -> SortKey {
        raw.and_then(|s| s.parse().ok()).unwrap_or(default)
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popular" => Ok(Self::Popular),
            "rating" => Ok(Self::Rating),
            "views" => Ok(Self::Views),
            "updated" => Ok(Self::Updated),
            "title" => Ok(Self::Title),
            "chapters" => Ok(Self::Chapters),
            "year" => Ok(Self::Year),
            "recent" => Ok(Self::Recent),
            "oldest" => Ok(Self::Oldest),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Popular => "popular",
            Self::Rating => "rating",
            Self::Views => "views",
            Self::Updated => "updated",
            Self::Title => "title",
            Self::Chapters => "chapters",
            Self::Year => "year",
            Self::Recent => "recent",
            Self::Oldest => "oldest",
        };
        f.write_str(name)
    }
}

/// Anything that can be ordered by the catalog sort keys.
pub trait Sortable {
    fn series(&self) -> &Series;

    /// Timestamp of the user relation (follow or read), if any.
    fn relation_time(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Timestamp used by [`SortKey::Updated`].
    fn update_time(&self) -> Option<DateTime<Utc>> {
        Some(self.series().updated_at)
    }
}

impl Sortable for Series {
    fn series(&self) -> &Series {
        self
    }
}

impl Sortable for FollowedSeries {
    fn series(&self) -> &Series {
        &self.series
    }

    fn relation_time(&self) -> Option<DateTime<Utc>> {
        Some(self.follow.followed_at)
    }

    fn update_time(&self) -> Option<DateTime<Utc>> {
        self.series.last_chapter_date
    }
}

impl Sortable for HistoryEntry {
    fn series(&self) -> &Series {
        &self.series
    }

    fn relation_time(&self) -> Option<DateTime<Utc>> {
        Some(self.history.read_at)
    }
}

pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Returns the ordering for `key`. Callers must use a stable sort so
/// that equal keys keep their source order.
pub fn comparator<T: Sortable>(key: SortKey) -> Comparator<T> {
    match key {
        SortKey::Popular => |a, b| b.series().followers.cmp(&a.series().followers),
        SortKey::Rating => |a, b| b.series().rating.total_cmp(&a.series().rating),
        SortKey::Views => |a, b| b.series().views.cmp(&a.series().views),
        SortKey::Updated => |a, b| epoch_or(b.update_time()).cmp(&epoch_or(a.update_time())),
        SortKey::Title => |a, b| compare_titles(&a.series().title, &b.series().title),
        SortKey::Chapters => |a, b| b.series().total_chapters.cmp(&a.series().total_chapters),
        SortKey::Year => |a, b| b.series().release_year.cmp(&a.series().release_year),
        SortKey::Recent => {
            |a, b| epoch_or(b.relation_time()).cmp(&epoch_or(a.relation_time()))
        }
        SortKey::Oldest => {
            |a, b| epoch_or(a.relation_time()).cmp(&epoch_or(b.relation_time()))
        }
    }
}

/// Case-insensitive first, then by raw text so the order stays total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    UniCase::new(a)
        .cmp(&UniCase::new(b))
        .then_with(|| a.cmp(b))
}

fn epoch_or(time: Option<DateTime<Utc>>) -> DateTime<Utc> {
    time.unwrap_or(DateTime::UNIX_EPOCH)
}
