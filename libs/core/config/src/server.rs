use crate::{env_optional, env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS; `None` leaves CORS to the environment default
    pub cors_allowed_origin: Option<String>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            cors_allowed_origin: None,
        }
    }

    pub fn with_cors_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_allowed_origin = Some(origin.into());
        self
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8080
    /// - CORS_ALLOWED_ORIGIN: optional
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string()),
            port: env_parse_or("PORT", 8080)?,
            cors_allowed_origin: env_optional("CORS_ALLOWED_ORIGIN"),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), 8080)
    }
}
