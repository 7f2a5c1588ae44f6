use super::{json_envelope, json_single};
use crate::models::{ChapterSummary, Series, SeriesSummary};
use crate::services::filter::{parse_optional_number, FilterParams, SeriesFilter};
use crate::services::pipeline::{self, page_window};
use crate::services::sort::SortKey;
use crate::services::{catalog, follows};
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::CurrentSession;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Query string of the browse view. Everything stays a string until the
/// filter conversion so that bad numbers degrade to "not set".
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    #[serde(flatten)]
    pub filter: FilterParams,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    #[serde(default)]
    pub all_chapters: bool,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/home
pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Json<serde_json::Value>> {
    let snapshot = catalog::snapshot(&state.db)?;
    let everything = SeriesFilter::default();
    let cfg = &state.config.catalog;

    let popular: Vec<SeriesSummary> = pipeline::run(&snapshot, &everything, SortKey::Popular)
        .iter()
        .take(cfg.popular_count)
        .map(SeriesSummary::from)
        .collect();
    let recent: Vec<SeriesSummary> = pipeline::run(&snapshot, &everything, SortKey::Updated)
        .iter()
        .take(cfg.recent_count)
        .map(SeriesSummary::from)
        .collect();

    Ok(json_single(serde_json::json!({
        "popular": popular,
        "recentUpdates": recent,
    })))
}

/// GET /api/series
pub async fn browse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<serde_json::Value>> {
    let filter = SeriesFilter::try_from(&params.filter)?;
    let sort = SortKey::parse_or(params.sort.as_deref(), SortKey::Popular);
    let (page, per_page, _) = page_window(
        parse_optional_number(params.page.as_deref()),
        parse_optional_number(params.per_page.as_deref()),
        state.config.catalog.per_page,
        state.config.catalog.max_per_page,
    );

    let snapshot = catalog::snapshot(&state.db)?;
    let visible = pipeline::run(&snapshot, &filter, sort);
    tracing::debug!(
        "Browse: {} of {} series visible (sort={})",
        visible.len(),
        snapshot.len(),
        sort
    );
    Ok(json_envelope(pipeline::paginate(visible, page, per_page)))
}

/// GET /api/genres
pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Json<serde_json::Value>> {
    let snapshot = catalog::snapshot(&state.db)?;
    Ok(json_single(catalog::genres(&snapshot)))
}

fn load_series(state: &AppState, id: &str) -> AppResult<Series> {
    catalog::get_series(&state.db, id)?
        .ok_or_else(|| AppError::not_found(format!("Series '{}' not found", id)))
}

/// GET /api/series/:id
pub async fn series_detail(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Query(params): Query<DetailParams>,
) -> AppResult<Json<serde_json::Value>> {
    let series = load_series(&state, &id)?;
    let chapters = catalog::list_chapters(&state.db, &id)?;
    let total = chapters.len();
    let limit = if params.all_chapters {
        total
    } else {
        state.config.catalog.chapter_preview
    };
    let preview: Vec<ChapterSummary> = chapters.iter().take(limit).map(ChapterSummary::from).collect();

    let is_following = match session.user() {
        Some(user) => follows::is_following(&state.db, &user.id, &id)?,
        None => false,
    };

    Ok(json_single(serde_json::json!({
        "series": series,
        "chapters": preview,
        "chapterCount": total,
        "hasMoreChapters": preview.len() < total,
        "isFollowing": is_following,
    })))
}

/// GET /api/series/:id/chapters
pub async fn chapters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    load_series(&state, &id)?;
    let chapters: Vec<ChapterSummary> = catalog::list_chapters(&state.db, &id)?
        .iter()
        .map(ChapterSummary::from)
        .collect();
    Ok(json_single(chapters))
}
