use super::json_single;
use crate::services::stats;
use crate::web::error::AppResult;
use crate::web::extractors::CurrentSession;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<serde_json::Value>> {
    session.require_admin()?;
    let stats = stats::dashboard(&state.db, state.config.catalog.recent_count)?;
    Ok(json_single(stats))
}
