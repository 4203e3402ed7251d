//! Server configuration.

use crate::error::{PipelineError, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;

/// Default listen address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Origin of the pipeline editor frontend.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Environment variable overriding the allowed origin.
pub const ALLOWED_ORIGIN_ENV: &str = "PIPELINE_ALLOWED_ORIGIN";

/// Settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// The single origin granted credentialed cross-origin access
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(bind: SocketAddr, allowed_origin: impl Into<String>) -> Self {
        Self {
            bind,
            allowed_origin: allowed_origin.into(),
        }
    }

    /// The allowed origin as a header value, validated before the server binds.
    pub fn cors_origin(&self) -> Result<HeaderValue> {
        let origin = self.allowed_origin.trim();
        if origin.is_empty() || origin == "*" {
            return Err(PipelineError::InvalidConfig(format!(
                "allowed origin must name a single origin, got {:?}",
                self.allowed_origin
            )));
        }

        HeaderValue::from_str(origin).map_err(|e| {
            PipelineError::InvalidConfig(format!(
                "allowed origin {:?} is not a valid header value: {e}",
                self.allowed_origin
            ))
        })
    }
}
