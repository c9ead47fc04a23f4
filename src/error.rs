use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use larder_shopping::CleanupError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    OrganizeError(#[from] CleanupError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error, message) = match self {
            AppError::ValidationError(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
            }
            AppError::OrganizeError(e) => {
                tracing::error!("Organize error: {}", e);
                (StatusCode::BAD_GATEWAY, "organize_failed", e.to_string())
            }
        };

        (
            status_code,
            Json(json!({ "error": error, "message": message })),
        )
            .into_response()
    }
}
