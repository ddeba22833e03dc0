use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Feedback API",
        version = "0.1.0",
        description = "Groups user feedback into named clusters of similar requests"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/feedback", api = domain_feedback::ApiDoc)
    )
)]
pub struct ApiDoc;
