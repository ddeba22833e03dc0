use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, create_permissive_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::Environment;
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the listener fails to bind to the configured address
/// or the server fails while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui`, serving the spec from `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - Request tracing, security headers, CORS and response compression
/// - JSON 404 and 405 fallbacks
///
/// Health endpoints are merged in by the app with `health_router()`.
///
/// # CORS
///
/// `server_config.cors_allowed_origin` holds comma-separated origins, e.g.
/// `http://localhost:3000,https://app.example.com`. When it is unset, the
/// development environment allows any origin and production refuses to start.
///
/// # Errors
/// Returns `InvalidInput` if the origin list is malformed, or missing in
/// production.
pub fn create_router<T>(
    apis: Router,
    server_config: &ServerConfig,
    environment: &Environment,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = cors_layer(server_config, environment)?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

fn cors_layer(server_config: &ServerConfig, environment: &Environment) -> io::Result<CorsLayer> {
    match server_config.cors_allowed_origin.as_deref() {
        Some(origins) => {
            info!("CORS configured with allowed origins: {}", origins);
            create_cors_layer(origins)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))
        }
        None if environment.is_production() => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN is required in production. Example: CORS_ALLOWED_ORIGIN=https://app.example.com",
        )),
        None => {
            warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
            Ok(create_permissive_cors_layer())
        }
    }
}
