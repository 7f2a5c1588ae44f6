use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub series_id: String,
    pub title: String,
    pub chapter_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_number: Option<u32>,
    #[serde(default)]
    pub pages: Vec<String>,
    pub release_date: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Chapter listing entry without the page list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub id: String,
    pub title: String,
    pub chapter_number: u32,
    pub volume_number: Option<u32>,
    pub page_count: usize,
    pub release_date: DateTime<Utc>,
    pub views: u64,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id.clone(),
            title: chapter.title.clone(),
            chapter_number: chapter.chapter_number,
            volume_number: chapter.volume_number,
            page_count: chapter.page_count(),
            release_date: chapter.release_date,
            views: chapter.views,
        }
    }
}
