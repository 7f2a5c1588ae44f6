use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Manga,
    Manhwa,
    Manhua,
    Novel,
    Comic,
}

impl SeriesType {
    pub const ALL: [SeriesType; 5] = [
        Self::Manga,
        Self::Manhwa,
        Self::Manhua,
        Self::Novel,
        Self::Comic,
    ];
}

impl FromStr for SeriesType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manga" => Ok(Self::Manga),
            "manhwa" => Ok(Self::Manhwa),
            "manhua" => Ok(Self::Manhua),
            "novel" => Ok(Self::Novel),
            "comic" => Ok(Self::Comic),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SeriesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manga => write!(f, "manga"),
            Self::Manhwa => write!(f, "manhwa"),
            Self::Manhua => write!(f, "manhua"),
            Self::Novel => write!(f, "novel"),
            Self::Comic => write!(f, "comic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStatus {
    #[default]
    Ongoing,
    Completed,
    Hiatus,
    Canceled,
}

impl FromStr for SeriesStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "hiatus" => Ok(Self::Hiatus),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Completed => write!(f, "completed"),
            Self::Hiatus => write!(f, "hiatus"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

/// A catalog entry. Catalog records are only ever written by import;
/// everything else reads snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    pub status: SeriesStatus,
    #[serde(default)]
    pub genres: Vec<String>,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub release_year: i32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_chapters: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_volumes: Option<u32>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub followers: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_chapter_date: Option<DateTime<Utc>>,
}

impl Series {
    /// `last_chapter_date` may not predate the series itself.
    pub fn has_consistent_dates(&self) -> bool {
        self.last_chapter_date
            .map(|last| last >= self.created_at)
            .unwrap_or(true)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Card-sized projection used by the home page and dashboard lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub id: String,
    pub title: String,
    pub cover_image: String,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    pub status: SeriesStatus,
    pub rating: f64,
    pub total_chapters: u32,
    pub views_label: String,
    pub last_chapter_date: Option<DateTime<Utc>>,
}

impl From<&Series> for SeriesSummary {
    fn from(series: &Series) -> Self {
        Self {
            id: series.id.clone(),
            title: series.title.clone(),
            cover_image: series.cover_image.clone(),
            series_type: series.series_type,
            status: series.status,
            rating: series.rating,
            total_chapters: series.total_chapters,
            views_label: crate::services::format::compact_count(series.views),
            last_chapter_date: series.last_chapter_date,
        }
    }
}
