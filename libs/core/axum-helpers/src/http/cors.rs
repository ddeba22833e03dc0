use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug, Error)]
pub enum CorsError {
    #[error("CORS allowed origin list is empty")]
    Empty,

    #[error("Invalid CORS origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

/// Creates a CORS layer for a comma-separated list of origins.
///
/// Allows GET, POST and OPTIONS with JSON content headers and caches
/// preflight responses for an hour.
///
/// # Example
/// `create_cors_layer("http://localhost:3000, https://app.example.com")`
pub fn create_cors_layer(allowed_origins: &str) -> Result<CorsLayer, CorsError> {
    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|source| CorsError::InvalidOrigin {
                    origin: origin.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(CorsError::Empty);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_comma_separated_origins() {
        assert!(create_cors_layer("http://localhost:3000, https://app.example.com").is_ok());
    }

    #[test]
    fn test_rejects_empty_list() {
        assert!(matches!(create_cors_layer(" , "), Err(CorsError::Empty)));
    }

    #[test]
    fn test_rejects_invalid_origin() {
        let err = create_cors_layer("http://ok.example.com,bad\norigin").unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
