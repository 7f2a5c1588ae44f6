use super::handlers;
use super::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;

pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::catalog::health))
        .route("/api/home", get(handlers::catalog::home))
        .route("/api/series", get(handlers::catalog::browse))
        .route("/api/genres", get(handlers::catalog::genres))
        .route("/api/series/:id", get(handlers::catalog::series_detail))
        .route("/api/series/:id/chapters", get(handlers::catalog::chapters))
        .route(
            "/api/read/:series_id/:chapter_id",
            get(handlers::reader::read),
        )
}

pub fn library_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/series/:id/follow",
            post(handlers::library::follow).delete(handlers::library::unfollow),
        )
        .route("/api/followed", get(handlers::library::followed))
        .route(
            "/api/followed/:id/notifications",
            patch(handlers::library::toggle_notifications),
        )
        .route(
            "/api/history",
            get(handlers::library::history).delete(handlers::library::clear_history),
        )
        .route(
            "/api/history/:id",
            delete(handlers::library::remove_history_entry),
        )
}

pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/me",
            get(handlers::account::me).patch(handlers::account::update_me),
        )
        .route("/api/session", delete(handlers::account::sign_out))
        .route("/api/languages", get(handlers::account::languages))
        .route(
            "/api/translate",
            post(handlers::account::translate).layer(DefaultBodyLimit::max(64 * 1024)),
        )
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/admin/stats", get(handlers::admin::dashboard_stats))
}
