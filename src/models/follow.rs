use super::Series;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: String,
    pub user_id: String,
    pub series_id: String,
    pub followed_at: DateTime<Utc>,
    pub notifications: bool,
}

/// A follow joined with the series it points at.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedSeries {
    pub follow: Follow,
    pub series: Series,
}

impl FollowedSeries {
    /// True when the series published a chapter after the user followed it.
    ///
    /// This assumes catalog timestamps and follow timestamps come from
    /// comparable clocks.
    pub fn has_new_chapter(&self) -> bool {
        self.series
            .last_chapter_date
            .map(|last| last > self.follow.followed_at)
            .unwrap_or(false)
    }
}
