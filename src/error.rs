use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing or blank x-user-id header")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] freshkeep_shared::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error body returned by every API route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use freshkeep_shared::Error;

        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Unauthorized", "Missing or blank x-user-id header."),
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("InvalidInput", message),
            ),
            AppError::Domain(Error::Validate(errors)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    details: serde_json::to_value(&errors).ok(),
                    ..ErrorResponse::new("ValidationError", errors.to_string())
                },
            ),
            AppError::Domain(Error::InvalidInput(message)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("InvalidInput", message),
            ),
            AppError::Domain(Error::Server(message)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BadRequest", message),
            ),
            AppError::Domain(Error::Forbidden) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("Forbidden", "This resource belongs to a different user."),
            ),
            AppError::Domain(Error::NotFound) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NotFound", "The requested resource could not be found."),
            ),
            AppError::Domain(Error::Conflict(message)) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("Conflict", message),
            ),
            AppError::Domain(Error::Unknown(err)) => {
                tracing::error!(err = ?err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("InternalError", "An unexpected error occurred."),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
