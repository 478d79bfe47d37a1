//! Error types for the annotator server

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::notion::NotionError;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("File not found: {0}")]
    NotFound(String),

    /// Notion answered with something other than 200; body kept verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error("Notion API unreachable: {0}")]
    NotionUnreachable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn from_rejection(status: StatusCode, body: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(body)
        } else {
            ApiError::InvalidRequest(body)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Upstream(body) => (StatusCode::BAD_REQUEST, body.clone()),
            ApiError::NotionUnreachable(_) => {
                tracing::error!("{}", self);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            ApiError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<NotionError> for ApiError {
    fn from(err: NotionError) -> Self {
        match err {
            NotionError::Rejected { body, .. } => ApiError::Upstream(body),
            NotionError::Transport(e) => ApiError::NotionUnreachable(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::from_rejection(err.status(), err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_body_is_relayed_verbatim() {
        let body = r#"{"object":"error","status":401,"code":"unauthorized"}"#;
        let response = ApiError::Upstream(body.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ApiError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::PayloadTooLarge("x".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (ApiError::NotFound("a.pdf".into()), StatusCode::NOT_FOUND),
            (ApiError::NotionUnreachable("refused".into()), StatusCode::BAD_GATEWAY),
            (
                ApiError::Io(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
