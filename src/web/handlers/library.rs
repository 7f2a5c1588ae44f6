//! The signed-in user's followed series and reading history.

use super::json_single;
use crate::services::filter::{FilterParams, QueryScope, SeriesFilter};
use crate::services::sort::SortKey;
use crate::services::{follows, history, pipeline};
use crate::web::error::AppResult;
use crate::web::extractors::CurrentSession;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct LibraryParams {
    #[serde(flatten)]
    pub filter: FilterParams,
    pub sort: Option<String>,
}

impl LibraryParams {
    fn filter(&self) -> AppResult<SeriesFilter> {
        Ok(SeriesFilter::try_from(&self.filter)?.with_scope(QueryScope::TitleAndAuthor))
    }

    fn sort(&self) -> SortKey {
        SortKey::parse_or(self.sort.as_deref(), SortKey::Recent)
    }
}

/// POST /api/series/:id/follow
pub async fn follow(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(series_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    let follow = follows::follow(&state.db, &user.id, &series_id)?;
    Ok(json_single(follow))
}

/// DELETE /api/series/:id/follow
pub async fn unfollow(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(series_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    let removed = follows::unfollow(&state.db, &user.id, &series_id)?;
    Ok(json_single(serde_json::json!({ "removed": removed })))
}

/// GET /api/followed
pub async fn followed(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<LibraryParams>,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    let filter = params.filter()?;
    let joined = follows::followed_series(&state.db, &user.id)?;
    let visible = pipeline::run(&joined, &filter, params.sort());

    Ok(Json(serde_json::json!({
        "data": visible,
        "meta": {
            "total": joined.len(),
            "visible": visible.len(),
            "new_chapter_count": follows::new_chapter_count(&joined),
        }
    })))
}

/// PATCH /api/followed/:id/notifications
pub async fn toggle_notifications(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(follow_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    let enabled = follows::toggle_notifications(&state.db, &user.id, &follow_id)?;
    Ok(json_single(serde_json::json!({ "notifications": enabled })))
}

/// GET /api/history
pub async fn history(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<LibraryParams>,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    let filter = params.filter()?;
    let joined = history::history_entries(&state.db, &user.id)?;
    let visible = pipeline::run(&joined, &filter, params.sort());

    Ok(Json(serde_json::json!({
        "data": visible,
        "meta": {
            "total": joined.len(),
            "visible": visible.len(),
        }
    })))
}

/// DELETE /api/history/:id
pub async fn remove_history_entry(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(entry_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    history::remove_entry(&state.db, &user.id, &entry_id)?;
    Ok(json_single(serde_json::json!({ "removed": 1 })))
}

/// DELETE /api/history
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    let removed = history::clear(&state.db, &user.id)?;
    tracing::info!("Cleared {} history entries for user {}", removed, user.id);
    Ok(json_single(serde_json::json!({ "removed": removed })))
}
