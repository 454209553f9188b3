use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::api::ApiError;

/// Client-side form checks. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name and email are required.")]
    MissingContact,

    #[error("Reason cannot exceed 200 characters.")]
    ReasonTooLong,

    #[error("Please pick a date and time slot.")]
    MissingSlot,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for the page. Backend messages pass through verbatim.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api(e) => e.user_message(fallback),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
