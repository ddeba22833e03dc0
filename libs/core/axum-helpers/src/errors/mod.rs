pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: Integer error code for logging/monitoring (e.g., 1503)
/// - `error`: Machine-readable error identifier (e.g., "SERVICE_UNAVAILABLE")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1503,
///   "error": "SERVICE_UNAVAILABLE",
///   "message": "Naming provider error: rate limited"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), ErrorCode::JsonExtraction, e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    msg,
                    None,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::ServiceUnavailable,
                    msg,
                    None,
                )
            }
        };

        let body = match details {
            Some(details) => ErrorResponse::new(code, message).with_details(details),
            None => ErrorResponse::new(code, message),
        };
        (status, Json(body)).into_response()
    }
}

/// Field-keyed validation errors, e.g. `{"feedback": [{"code": "length", ...}]}`
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::json!(error_messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(fields)
}
