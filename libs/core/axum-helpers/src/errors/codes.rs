//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// HTTP method is not supported for the route
    MethodNotAllowed,

    // Server errors (1500-1999)
    /// An unexpected internal server error occurred
    InternalError,

    /// A dependency of the service is unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the SCREAMING_SNAKE_CASE identifier clients can match on.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ServiceUnavailable.as_str(), "SERVICE_UNAVAILABLE");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get the integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            // Client errors
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1005,
            Self::MethodNotAllowed => 1006,

            // Server errors
            Self::InternalError => 1500,
            Self::ServiceUnavailable => 1503,
        }
    }

    /// Get the default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
