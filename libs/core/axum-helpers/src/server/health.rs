use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}

/// Health check endpoint handler.
///
/// Returns 200 with the app name and version whenever the process is serving.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: app.name.to_string(),
        version: app.version.to_string(),
    })
}

/// Creates a router with the /health endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
