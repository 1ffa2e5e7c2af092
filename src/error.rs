use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream listings provider returned {status}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown search type: {0}")]
    InvalidSearchType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Error body returned to API callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::Http(_) | AppError::Json(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidSearchType(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            AppError::Upstream { body, .. } => ErrorBody {
                error: self.to_string(),
                details: Some(body.clone()).filter(|b| !b.is_empty()),
            },
            AppError::Http(e) => ErrorBody {
                error: "Failed to reach upstream listings provider".to_string(),
                details: Some(e.to_string()),
            },
            AppError::Json(e) => ErrorBody {
                error: "Upstream listings provider returned malformed JSON".to_string(),
                details: Some(e.to_string()),
            },
            _ => ErrorBody {
                error: self.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.body())).into_response()
    }
}
