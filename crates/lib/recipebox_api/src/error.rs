//! Application error types.
//!
//! Every variant carries the internal detail for the server log; the client
//! only ever sees a fixed message in `{"error": ...}`.

use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recipebox_core::completion::CompletionError;
use recipebox_core::storage::{StorageError, StorageOp};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

pub const INVALID_DATA: &str = "Invalid data";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
pub const READ_FAILED: &str = "Could not read data.";
pub const SAVE_FAILED: &str = "Could not save data.";
pub const INGREDIENTS_REQUIRED: &str = "食材を入力してください。";
pub const TOO_MANY_REQUESTS: &str =
    "リクエストが多すぎます。しばらく時間をおいてから再度お試しください。";
pub const GENERATION_FAILED: &str = "レシピの生成中にエラーが発生しました。";
pub const SERVER_MISCONFIGURED: &str = "サーバーの設定に問題があります。";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        message: &'static str,
        detail: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server misconfigured: {0}")]
    Misconfigured(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Client input rejected with the public `message`.
    pub fn invalid(message: &'static str, detail: impl Display) -> Self {
        AppError::Validation {
            message,
            detail: detail.to_string(),
        }
    }

    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { message, .. } => (StatusCode::BAD_REQUEST, *message),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, RECIPE_NOT_FOUND),
            AppError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS),
            AppError::Misconfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_MISCONFIGURED)
            }
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED),
            AppError::Storage(e) => match e.op() {
                StorageOp::Read => (StatusCode::INTERNAL_SERVER_ERROR, READ_FAILED),
                StorageOp::Write => (StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::RateLimited(body) => AppError::RateLimited(body),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_429() {
        let err = AppError::from(CompletionError::RateLimited("slow down".into()));
        assert_eq!(
            err.status_and_message(),
            (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS)
        );
    }

    #[test]
    fn other_completion_failures_map_to_500() {
        for e in [
            CompletionError::Request("connection refused".into()),
            CompletionError::Provider {
                status: 503,
                body: "unavailable".into(),
            },
            CompletionError::Malformed("not JSON".into()),
        ] {
            let (status, message) = AppError::from(e).status_and_message();
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, GENERATION_FAILED);
        }
    }

    #[test]
    fn validation_hides_detail() {
        let err = AppError::invalid(INVALID_DATA, "missing required field: recipe_name");
        assert_eq!(
            err.status_and_message(),
            (StatusCode::BAD_REQUEST, INVALID_DATA)
        );
        assert!(err.to_string().contains("recipe_name"));
    }

    #[test]
    fn storage_errors_report_the_failed_stage() {
        let io_error = |op| StorageError::Io {
            op,
            path: "/nope/recipes.json".into(),
            source: std::io::Error::other("disk on fire"),
        };
        assert_eq!(
            AppError::from(io_error(StorageOp::Write)).status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED)
        );
        assert_eq!(
            AppError::from(io_error(StorageOp::Read)).status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, READ_FAILED)
        );
    }
}
