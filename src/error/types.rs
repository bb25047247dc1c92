//! API error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::{prompt::ValidationError, ProviderError};

/// Fixed message returned for a missing or blank question
pub const NO_QUESTION_MESSAGE: &str = "No question provided";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The question was absent, null, or blank after trimming
    #[error("No question provided")]
    Validation,

    /// Any other failure while serving the request
    #[error("{0}")]
    Request(String),

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(_: ValidationError) -> Self {
        ApiError::Validation
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Request(rejection.body_text())
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Request(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Request(msg) => tracing::error!(error = %msg, "Request failed"),
            ApiError::Validation => tracing::warn!("Rejected request without a question"),
            ApiError::NotFound => {}
        }

        let message = match self {
            ApiError::Request(msg) if msg.trim().is_empty() => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// JSON body of every error response: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(ValidationError);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), NO_QUESTION_MESSAGE);
    }

    #[test]
    fn test_provider_error_maps_to_server_error() {
        let err = ApiError::from(ProviderError::EmptyCompletion);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "completion provider returned no answer");
    }

    #[test]
    fn test_unknown_failure_maps_to_server_error() {
        let err = ApiError::from(anyhow::anyhow!("something unexpected"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "something unexpected");
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: NO_QUESTION_MESSAGE.to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No question provided" }));
    }
}
