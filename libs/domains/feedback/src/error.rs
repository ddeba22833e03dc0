use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::clustering::ClusterError;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Naming error: {0}")]
    Naming(String),

    #[error("Clustering error: {0}")]
    Clustering(#[from] ClusterError),
}

pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Convert FeedbackError to AppError for standardized HTTP error responses
impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Embedding(msg) => {
                AppError::ServiceUnavailable(format!("Embedding provider error: {}", msg))
            }
            FeedbackError::Naming(msg) => {
                AppError::ServiceUnavailable(format!("Naming provider error: {}", msg))
            }
            FeedbackError::Clustering(e) => {
                AppError::InternalServerError(format!("Clustering error: {}", e))
            }
        }
    }
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_provider_errors_are_service_unavailable() {
        let response = FeedbackError::Naming("timed out".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = FeedbackError::Embedding("401".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_cluster_error_is_internal() {
        let err: FeedbackError = ClusterError::EmptyInput.into();
        assert!(matches!(err, FeedbackError::Clustering(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
