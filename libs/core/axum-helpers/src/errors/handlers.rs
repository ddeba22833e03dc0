use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    let body = ErrorResponse::new(ErrorCode::NotFound, ErrorCode::NotFound.default_message());
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
    );
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}
