pub mod account;
pub mod admin;
pub mod catalog;
pub mod library;
pub mod reader;

use crate::services::pipeline::Page;
use axum::response::Json;
use serde::Serialize;

pub(crate) fn json_single<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "data": data,
    }))
}

pub(crate) fn json_envelope<T: Serialize>(page: Page<T>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "data": page.items,
        "meta": {
            "total": page.total,
            "page": page.page,
            "per_page": page.per_page,
            "total_pages": page.total_pages,
        }
    }))
}
