use crate::error::WikiPlexError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

pub const MISSING_SEARCH_TERM: &str = "Search term is required";
pub const SEARCH_FAILED: &str = "Failed to process search request";

/// JSON error body for the `/api` routes: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<WikiPlexError> for ApiError {
    fn from(err: WikiPlexError) -> Self {
        match err {
            WikiPlexError::MissingSearchTerm => {
                ApiError::new(StatusCode::BAD_REQUEST, MISSING_SEARCH_TERM)
            }
            WikiPlexError::InvalidInput { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            WikiPlexError::Configuration { reason } => {
                error!("Configuration error: {}", reason);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, reason)
            }
            other => {
                error!("Search API error: {}", other);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, SEARCH_FAILED)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WikiPlexError::MissingSearchTerm, StatusCode::BAD_REQUEST, MISSING_SEARCH_TERM),
            (
                WikiPlexError::Configuration {
                    reason: "API key not configured".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key not configured",
            ),
            (
                WikiPlexError::Upstream {
                    status: 401,
                    body: "bad key".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                SEARCH_FAILED,
            ),
        ];

        for (err, status, message) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.message, message);
        }

        let api = ApiError::from(WikiPlexError::InvalidInput {
            reason: "expected a string, got number".to_string(),
        });
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.message.contains("expected a string"));
    }
}
