use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::ServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    message: String,
    error: Option<String>,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        json_error(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        json_error(StatusCode::CONFLICT, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        json_error(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            error: Some(error.into()),
        }
    }

    /// Maps a service failure onto a status code. `context` is the message
    /// shown for server-side failures, e.g. "Failed to add word.".
    pub fn from_service(err: ServiceError, context: &str) -> Self {
        match err {
            ServiceError::InvalidRequest(message) => {
                tracing::debug!(%message, "rejected request");
                Self::bad_request(message)
            }
            ServiceError::DuplicateWord(word) => {
                tracing::debug!(%word, "duplicate word");
                Self::conflict("This word has already been added.")
            }
            ServiceError::NotFound(what) => Self::not_found(format!("{} not found.", capitalize(what))),
            other => {
                tracing::error!(error = %other, "{context}");
                Self::internal(context, other.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
            error: self.error,
        };

        (self.status, Json(body)).into_response()
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> AppError {
    AppError {
        status,
        message: message.into(),
        error: None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
