use super::Series;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingHistory {
    pub id: String,
    pub user_id: String,
    pub series_id: String,
    pub chapter_id: String,
    pub last_read_page: u32,
    pub read_at: DateTime<Utc>,
}

/// A history record joined with its series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub history: ReadingHistory,
    pub series: Series,
}
