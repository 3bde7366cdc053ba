//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Error returned by handlers, rendered as `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(meetnote_core::Error),
}

impl From<meetnote_core::Error> for ApiError {
    fn from(err: meetnote_core::Error) -> Self {
        use meetnote_core::Error;
        match err {
            Error::MeetingNotFound(_) => ApiError::NotFound(err.to_string()),
            Error::EmptyContent | Error::UnsupportedMode(_) | Error::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            other => ApiError::Internal(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(err) = &self {
            tracing::error!(
                subsystem = "api",
                component = "error",
                error = %err,
                "Request failed"
            );
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
