//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Health endpoint
//! - Graceful shutdown on Ctrl+C / SIGTERM
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig, Environment};
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config, &Environment::Development)?;
//! let app = router.merge(health_router(app_info!()));
//! create_app(app, &config).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
