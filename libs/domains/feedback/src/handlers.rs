use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, ServiceUnavailableResponse,
        UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::FeedbackResult;
use crate::filter::{DateRange, FeedbackFilter};
use crate::models::{
    FeedbackBatch, FeedbackGroup, FeedbackItem, FeedbackSource, FilteredFeedbackRequest,
    GroupedResult, Importance, QueryResponse,
};
use crate::service::FeedbackService;

pub const TAG: &str = "Feedback";

/// OpenAPI documentation for the Feedback API
#[derive(OpenApi)]
#[openapi(
    paths(group_feedback, group_filtered_feedback, query_feedback),
    components(
        schemas(
            FeedbackItem,
            FeedbackGroup,
            FeedbackBatch,
            FilteredFeedbackRequest,
            FeedbackFilter,
            DateRange,
            GroupedResult,
            QueryResponse,
            Importance,
            FeedbackSource,
        ),
        responses(
            BadRequestValidationResponse,
            UnprocessableEntityResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Semantic grouping of user feedback")
    )
)]
pub struct ApiDoc;

/// Create the feedback router with all HTTP endpoints
pub fn router(service: FeedbackService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(group_feedback))
        .route("/groups", post(group_filtered_feedback))
        .route("/query", post(query_feedback))
        .with_state(shared_service)
}

/// Group a batch of feedback into named clusters
///
/// The submitted items are echoed back unchanged next to the groups. When the
/// embedding provider is unavailable all items come back in one "All Feedback"
/// group.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = FeedbackBatch,
    responses(
        (status = 200, description = "Feedback grouped", body = GroupedResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn group_feedback(
    State(service): State<Arc<FeedbackService>>,
    ValidatedJson(batch): ValidatedJson<FeedbackBatch>,
) -> FeedbackResult<Json<GroupedResult>> {
    let result = service.group(batch).await?;
    Ok(Json(result))
}

/// Filter a batch, then group the remaining items
#[utoipa::path(
    post,
    path = "/groups",
    tag = TAG,
    request_body = FilteredFeedbackRequest,
    responses(
        (status = 200, description = "Filtered feedback grouped", body = GroupedResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn group_filtered_feedback(
    State(service): State<Arc<FeedbackService>>,
    ValidatedJson(request): ValidatedJson<FilteredFeedbackRequest>,
) -> FeedbackResult<Json<GroupedResult>> {
    let result = service.group_with_filter(request).await?;
    Ok(Json(result))
}

/// Return the items of a batch that match the filters
#[utoipa::path(
    post,
    path = "/query",
    tag = TAG,
    request_body = FilteredFeedbackRequest,
    responses(
        (status = 200, description = "Matching feedback", body = QueryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn query_feedback(
    State(service): State<Arc<FeedbackService>>,
    ValidatedJson(request): ValidatedJson<FilteredFeedbackRequest>,
) -> Json<QueryResponse> {
    Json(service.query(request))
}
