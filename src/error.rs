// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("accessToken is old or invalid")]
    InvalidCredential,

    #[error("Log in state is unknown or already consumed: {0}")]
    InvalidState(String),

    #[error("LINE id_token verification failed: {0}")]
    InvalidExternalToken(String),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("LINE API error: {0}")]
    LineApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Unknown or consumed log-in state gets a plain-text diagnostic so
        // the browser shows something readable mid-redirect.
        if let AppError::InvalidState(msg) = &self {
            return (
                StatusCode::BAD_REQUEST,
                format!("invalid log in state: {}", msg),
            )
                .into_response();
        }

        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::InvalidCredential => {
                (StatusCode::UNAUTHORIZED, "invalid_credential", None)
            }
            AppError::InvalidState(_) => unreachable!(),
            AppError::InvalidExternalToken(msg) => {
                tracing::error!(error = %msg, "LINE id_token verification failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "invalid_external_token", None)
            }
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", Some(msg.clone()))
            }
            AppError::LineApi(msg) => (StatusCode::BAD_GATEWAY, "line_error", Some(msg.clone())),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

// async-graphql's blanket `From<T: Display>` already converts `AppError`
// into a GraphQL error, so resolvers can use `?` directly.

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
