//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Rejections use the standard [`ErrorResponse`](crate::ErrorResponse) body:
/// malformed JSON is a 400, a body that does not match the target type is a
/// 422, and a failed `Validate` check is a 400 with per-field details.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Batch {
///     #[validate(length(max = 100))]
///     items: Vec<String>,
/// }
///
/// async fn submit(ValidatedJson(payload): ValidatedJson<Batch>) -> String {
///     format!("Received {} items", payload.items.len())
/// }
///
/// let app = Router::new().route("/batch", post(submit));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Batch {
        #[validate(length(max = 2))]
        items: Vec<String>,
    }

    async fn submit(ValidatedJson(batch): ValidatedJson<Batch>) -> String {
        batch.items.len().to_string()
    }

    async fn send(body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(submit));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, body) = send(r#"{"items": ["a", "b"]}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"2");
    }

    #[tokio::test]
    async fn test_validation_failure_is_400_with_details() {
        let (status, body) = send(r#"{"items": ["a", "b", "c"]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["items"][0]["code"], "length");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_422() {
        let (status, body) = send(r#"{"items": "not a list"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_syntax_error_is_400() {
        let (status, _) = send(r#"{"items": ["#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
