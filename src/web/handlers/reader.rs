use super::json_single;
use crate::models::ChapterSummary;
use crate::services::filter::parse_optional_number;
use crate::services::reader::{ReaderAction, ReaderState};
use crate::services::{catalog, history};
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::CurrentSession;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub page: Option<String>,
    pub key: Option<String>,
}

/// GET /api/read/:series_id/:chapter_id
///
/// Opens the chapter at `page`, applies `key` if one was pressed, and
/// returns the resulting view. Signed-in readers get their history
/// updated with wherever they ended up.
pub async fn read(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path((series_id, chapter_id)): Path<(String, String)>,
    Query(params): Query<ReadParams>,
) -> AppResult<Json<serde_json::Value>> {
    let series = catalog::get_series(&state.db, &series_id)?
        .ok_or_else(|| AppError::not_found(format!("Series '{}' not found", series_id)))?;
    let chapters = catalog::list_chapters(&state.db, &series_id)?;

    let page = parse_optional_number(params.page.as_deref()).unwrap_or(1);
    let mut reader = ReaderState::open(&chapters, &chapter_id, page)?;

    let action = params.key.as_deref().and_then(ReaderAction::from_key);
    let changed = action.map(|a| reader.apply(a)).unwrap_or(false);

    let Some(chapter) = chapters.get(reader.chapter_index()) else {
        return Err(AppError::not_found("Chapter not found"));
    };

    if let Some(user) = session.user() {
        history::record_read(&state.db, &user.id, &chapter.id, reader.page() as u32)?;
    }

    let previous = reader
        .previous_chapter_index()
        .and_then(|i| chapters.get(i))
        .map(ChapterSummary::from);
    let next = reader
        .next_chapter_index()
        .and_then(|i| chapters.get(i))
        .map(ChapterSummary::from);

    Ok(json_single(serde_json::json!({
        "series": { "id": series.id, "title": series.title },
        "chapter": ChapterSummary::from(chapter),
        "imageUrl": chapter.pages.get(reader.page() - 1),
        "state": reader,
        "action": action,
        "changed": changed,
        "previousChapter": previous,
        "nextChapter": next,
    })))
}
