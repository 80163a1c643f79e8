use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use agency_core::error::AppError;

use crate::dto::ErrorResponse;

/// Errors a handler can return; rendered as `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    /// The body was not valid JSON or did not fit the request shape.
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::App(err) if err.is_client_error() => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::App(err) => {
                tracing::error!("Scrape failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, axum::Json(ErrorResponse { detail })).into_response()
    }
}
