mod error;
mod extractors;
mod handlers;
mod routes;
pub mod security;
mod state;

pub use state::AppState;

use crate::services::auth;
use crate::{Config, Database};
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Builds the full router. Split out of [`serve`] so tests can drive it
/// without a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::catalog_routes())
        .merge(routes::library_routes())
        .merge(routes::account_routes())
        .merge(routes::admin_routes())
        .layer(middleware::from_fn(security::apply_security_headers))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, db: Database, addr: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config, db.clone())?);

    tokio::spawn(async move {
        run_session_cleanup(db).await;
    });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn run_session_cleanup(db: Database) {
    let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
    loop {
        interval.tick().await;
        match auth::cleanup_expired_sessions(&db) {
            Ok(0) => {}
            Ok(n) => tracing::info!("Removed {} expired sessions", n),
            Err(e) => tracing::error!("Session cleanup failed: {}", e),
        }
    }
}
