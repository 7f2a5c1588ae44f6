use super::json_single;
use crate::models::UpdateProfile;
use crate::services::translation::SUPPORTED_LANGUAGES;
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::{CurrentSession, SESSION_COOKIE};
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use std::sync::Arc;

/// GET /api/me
pub async fn me(CurrentSession(session): CurrentSession) -> AppResult<Json<serde_json::Value>> {
    let user = session.require_user()?;
    Ok(json_single(user))
}

/// PATCH /api/me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    CurrentSession(mut session): CurrentSession,
    Json(update): Json<UpdateProfile>,
) -> AppResult<Json<serde_json::Value>> {
    session.require_user()?;
    let user = session
        .update_profile(&state.db, &update)
        .map_err(|e| AppError::bad_request(format!("Failed to update profile: {}", e)))?;
    tracing::info!("Profile updated for user {}", user.id);
    Ok(json_single(user))
}

/// DELETE /api/session
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<serde_json::Value>)> {
    let signed_in = session.is_signed_in();
    session.sign_out(&state.db)?;
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, json_single(serde_json::json!({ "signedOut": signed_in }))))
}

/// GET /api/languages
pub async fn languages(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let languages: Vec<_> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| serde_json::json!({ "code": code, "name": name }))
        .collect();
    json_single(serde_json::json!({
        "enabled": state.translator.is_enabled(),
        "languages": languages,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub to: String,
}

/// POST /api/translate
///
/// Never fails on engine trouble: the original text comes back instead.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateRequest>,
) -> Json<serde_json::Value> {
    let translated = state.translator.translate(&req.text, &req.to).await;
    json_single(serde_json::json!({
        "text": translated,
        "to": req.to,
        "translated": translated != req.text,
    }))
}
