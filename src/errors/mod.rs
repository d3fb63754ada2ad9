//! Error handling module for the news backend.
//!
//! Every failure raised by validators, handlers or the repository ends up here and is
//! rendered as a status code plus a flat `{ "msg": ... }` body.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Client-visible messages. Internal details never leave the process.
pub mod messages {
    pub const BAD_REQUEST: &str = "Bad request";
    pub const INVALID_ENDPOINT: &str = "Invalid endpoint.";
    pub const ARTICLE_ID_DOES_NOT_EXIST: &str = "article_id does not exist";
    pub const ARTICLE_NOT_FOUND: &str = "Article not found";
    pub const INTERNAL_ERROR: &str = "Internal server error";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Structurally invalid client input; the detail is only logged
    BadRequest(String),
    /// Well-formed input referencing a missing entity; carries the client message
    NotFound(String),
    /// No route matched the method and path
    InvalidEndpoint,
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidEndpoint => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(_) => messages::BAD_REQUEST.to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidEndpoint => messages::INVALID_ENDPOINT.to_string(),
            AppError::Database(_) | AppError::Internal(_) => messages::INTERNAL_ERROR.to_string(),
        }
    }

    fn detail(&self) -> &str {
        match self {
            AppError::BadRequest(detail)
            | AppError::NotFound(detail)
            | AppError::Database(detail)
            | AppError::Internal(detail) => detail,
            AppError::InvalidEndpoint => messages::INVALID_ENDPOINT,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.detail())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            msg: error.message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self.detail());
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", self.detail());
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Fallback for any method and path combination that has no handler.
pub async fn invalid_endpoint() -> AppError {
    AppError::InvalidEndpoint
}

/// Response used by the panic-catching layer so a crashed handler still yields `{ msg }`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
