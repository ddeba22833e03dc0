//! HTTP middleware: CORS configuration and security headers.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer("https://app.example.com")?);
//! ```

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
