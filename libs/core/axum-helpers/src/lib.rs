//! # Axum Helpers
//!
//! Shared building blocks for the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup with OpenAPI docs, health endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validated JSON extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::{server::ServerConfig, Environment};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config, &Environment::from_env())?;
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{HealthResponse, create_app, create_router, health_router, shutdown_signal};

// Re-export HTTP middleware
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;
