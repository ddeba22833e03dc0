use axum::Router;

pub mod feedback;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/feedback", feedback::router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::openapi::ApiDoc;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::server::{create_router, health_router};
    use core_config::{app_info, server::ServerConfig};
    use domain_feedback::{GroupingConfig, OpenAIConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config {
            app: app_info!(),
            server: ServerConfig::default(),
            environment: Environment::Development,
            // Unroutable; these tests never reach the provider
            openai: OpenAIConfig::new("sk-test").with_base_url("http://127.0.0.1:9"),
            grouping: GroupingConfig::default(),
        };
        let state = AppState::new(config);

        create_router::<ApiDoc>(routes(&state), &state.config.server, &state.config.environment)
            .unwrap()
            .merge(health_router(state.config.app))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_binary_name() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "feedback_api");
    }

    #[tokio::test]
    async fn test_query_is_served_under_api_prefix() {
        let body = json!({
            "feedback": [
                {"id": 1, "name": "SSO", "description": "Okta", "importance": "High"},
                {"id": 2, "name": "Dark mode", "description": "Theme", "importance": "Low"}
            ],
            "filters": {"importance": ["High"]}
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/feedback/query")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_empty_batch_skips_providers() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/feedback")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"feedback": []}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["groups"], json!([]));
    }

    #[tokio::test]
    async fn test_openapi_lists_feedback_paths() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let doc = json_body(response).await;

        assert_eq!(doc["info"]["title"], "Feedback API");
        assert!(doc["paths"]["/feedback/groups"].is_object());
        assert!(doc["paths"]["/feedback/query"].is_object());
    }
}
