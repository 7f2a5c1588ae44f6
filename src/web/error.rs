use crate::services::filter::FilterError;
use crate::services::follows::LibraryError;
use crate::services::reader::ReaderError;
use crate::services::session::AccessError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

pub struct AppError(anyhow::Error);

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(anyhow::Error::new(NotFound(message.into())))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(anyhow::Error::new(BadRequest(message.into())))
    }

    fn status(&self) -> StatusCode {
        if let Some(e) = self.0.downcast_ref::<AccessError>() {
            return match e {
                AccessError::SignInRequired => StatusCode::UNAUTHORIZED,
                AccessError::AdminRequired => StatusCode::FORBIDDEN,
            };
        }
        if self.0.is::<NotFound>() || self.0.is::<LibraryError>() {
            return StatusCode::NOT_FOUND;
        }
        if let Some(e) = self.0.downcast_ref::<ReaderError>() {
            return match e {
                ReaderError::UnknownChapter(_) => StatusCode::NOT_FOUND,
                ReaderError::NoChapters | ReaderError::EmptyChapter(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            };
        }
        if self.0.is::<FilterError>() || self.0.is::<BadRequest>() {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Application error: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.0);
            self.0.to_string()
        };
        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct NotFound(String);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct BadRequest(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases: Vec<(AppError, StatusCode)> = vec![
            (AccessError::SignInRequired.into(), StatusCode::UNAUTHORIZED),
            (AccessError::AdminRequired.into(), StatusCode::FORBIDDEN),
            (
                FilterError::UnknownType("webtoon".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                LibraryError::SeriesNotFound("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                ReaderError::UnknownChapter("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (AppError::not_found("gone"), StatusCode::NOT_FOUND),
            (anyhow::anyhow!("boom").into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status(), expected);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = AppError::from(anyhow::anyhow!("secret")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
